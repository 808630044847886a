//! The document primitive tree produced by every layout builder.
//!
//! A [`Document`] is plain data: page geometry, a tree of [`Node`]s and the
//! named styles those nodes refer to. It carries no rendering logic and is
//! consumed read-only by a render sink.

use serde::Serialize;

use crate::layout::style::{Alignment, Color, Spacing, Style, StyleSheet};

/// A4 in PDF points.
pub const A4_WIDTH: f32 = 595.28;
pub const A4_HEIGHT: f32 = 841.89;

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margins: Spacing,
}

impl PageGeometry {
    pub const fn a4(margins: Spacing) -> Self {
        PageGeometry {
            width: A4_WIDTH,
            height: A4_HEIGHT,
            margins,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - self.margins.horizontal()
    }
}

/// A rectangle painted behind the content of every page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageFill {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Document title written into the output metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub page: PageGeometry,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub page_fills: Vec<PageFill>,
    pub content: Vec<Node>,
    pub styles: StyleSheet,
    pub default_style: Style,
}

impl Document {
    pub fn new(page: PageGeometry, content: Vec<Node>, styles: StyleSheet, default_style: Style) -> Self {
        Document {
            title: None,
            page,
            page_fills: Vec::new(),
            content,
            styles,
            default_style,
        }
    }

    pub fn with_page_fill(mut self, fill: PageFill) -> Self {
        self.page_fills.push(fill);
        self
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Every text line and bullet item in tree order.
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for node in &self.content {
            node.collect_texts(&mut out);
        }
        out
    }

    /// Total number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.content.iter().map(Node::count).sum()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Nodes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Background(Background),
    Stack(Stack),
    Columns(Columns),
    Text(Text),
    Divider(Divider),
    Table(Table),
}

impl Node {
    fn children(&self) -> Vec<&Node> {
        match self {
            Node::Background(bg) => bg.children.iter().collect(),
            Node::Stack(stack) => stack.children.iter().collect(),
            Node::Columns(cols) => cols.columns.iter().map(|c| &c.node).collect(),
            Node::Table(table) => table.rows.iter().flatten().map(|c| &c.node).collect(),
            Node::Text(_) | Node::Divider(_) => Vec::new(),
        }
    }

    fn collect_texts<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Node::Text(text) = self {
            match &text.body {
                TextBody::Line(line) => out.push(line),
                TextBody::Bullets(items) => out.extend(items.iter().map(String::as_str)),
            }
        }
        for child in self.children() {
            child.collect_texts(out);
        }
    }

    fn count(&self) -> usize {
        1 + self.children().into_iter().map(Node::count).sum::<usize>()
    }
}

/// Drops the absent entries of a child list.
pub fn compact<const N: usize>(nodes: [Option<Node>; N]) -> Vec<Node> {
    nodes.into_iter().flatten().collect()
}

/// A colored band spanning the full content width.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Background {
    pub color: Color,
    /// Minimum height; the band grows when its children need more room.
    pub height: f32,
    pub padding: Spacing,
    pub margin: Spacing,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stack {
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    pub margin: Spacing,
}

impl Stack {
    pub fn new(children: Vec<Node>) -> Self {
        Stack {
            children,
            style: None,
            margin: Spacing::ZERO,
        }
    }

    pub fn style(mut self, name: &str) -> Self {
        self.style = Some(name.to_string());
        self
    }

    pub fn margin(mut self, margin: Spacing) -> Self {
        self.margin = margin;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnWidth {
    /// Shares the remaining width equally with other star columns.
    Star,
    /// Natural width of the content.
    Auto,
    Fixed(f32),
    Percent(f32),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub width: ColumnWidth,
    pub node: Node,
}

impl Column {
    pub fn star(node: impl Into<Node>) -> Self {
        Column {
            width: ColumnWidth::Star,
            node: node.into(),
        }
    }

    pub fn auto(node: impl Into<Node>) -> Self {
        Column {
            width: ColumnWidth::Auto,
            node: node.into(),
        }
    }

    pub fn percent(percent: f32, node: impl Into<Node>) -> Self {
        Column {
            width: ColumnWidth::Percent(percent),
            node: node.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Columns {
    pub columns: Vec<Column>,
    pub gap: f32,
    pub margin: Spacing,
}

impl Columns {
    pub fn new(columns: Vec<Column>) -> Self {
        Columns {
            columns,
            gap: 0.0,
            margin: Spacing::ZERO,
        }
    }

    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    pub fn margin(mut self, margin: Spacing) -> Self {
        self.margin = margin;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextBody {
    Line(String),
    Bullets(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub body: TextBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    /// Overrides the margin of the named style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Spacing>,
}

impl Text {
    pub fn line(text: impl Into<String>, style: &str) -> Self {
        Text {
            body: TextBody::Line(text.into()),
            style: Some(style.to_string()),
            alignment: None,
            margin: None,
        }
    }

    pub fn bullets(items: Vec<String>, style: &str) -> Self {
        Text {
            body: TextBody::Bullets(items),
            style: Some(style.to_string()),
            alignment: None,
            margin: None,
        }
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn margin(mut self, margin: Spacing) -> Self {
        self.margin = Some(margin);
        self
    }
}

/// A horizontal rule starting at the left edge of its container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Divider {
    pub length: f32,
    pub thickness: f32,
    pub color: Color,
    pub margin: Spacing,
}

impl Divider {
    pub fn new(length: f32, thickness: f32, color: Color) -> Self {
        Divider {
            length,
            thickness,
            color,
            margin: Spacing::ZERO,
        }
    }

    pub fn margin(mut self, margin: Spacing) -> Self {
        self.margin = margin;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Borders {
    pub width: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub node: Node,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,
    pub padding: Spacing,
}

impl Cell {
    pub fn new(node: impl Into<Node>) -> Self {
        Cell {
            node: node.into(),
            fill: None,
            padding: Spacing::ZERO,
        }
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn padding(mut self, padding: Spacing) -> Self {
        self.padding = padding;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub widths: Vec<ColumnWidth>,
    pub rows: Vec<Vec<Cell>>,
    /// `None` draws no cell borders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borders: Option<Borders>,
    pub margin: Spacing,
}

impl Table {
    pub fn new(widths: Vec<ColumnWidth>, rows: Vec<Vec<Cell>>) -> Self {
        Table {
            widths,
            rows,
            borders: None,
            margin: Spacing::ZERO,
        }
    }

    /// A one-cell table spanning the available width.
    pub fn card(cell: Cell) -> Self {
        Table::new(vec![ColumnWidth::Star], vec![vec![cell]])
    }

    pub fn borders(mut self, width: f32, color: Color) -> Self {
        self.borders = Some(Borders { width, color });
        self
    }

    pub fn margin(mut self, margin: Spacing) -> Self {
        self.margin = margin;
        self
    }
}

macro_rules! into_node {
    ($($variant:ident),*) => {
        $(impl From<$variant> for Node {
            fn from(value: $variant) -> Self {
                Node::$variant(value)
            }
        })*
    };
}

into_node!(Background, Stack, Columns, Text, Divider, Table);
