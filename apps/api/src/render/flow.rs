//! Flow layout: places document nodes on pages.
//!
//! Coordinates are points with the origin at the top-left corner of the page
//! and y growing downwards; the PDF writer flips them. Fills are kept on a
//! separate layer painted before lines and text, so a band or cell fill whose
//! size is only known after its children are placed still ends up behind
//! them.

use crate::layout::document::{
    Background, Borders, ColumnWidth, Columns, Divider, Document, Node, Stack, Table, Text, TextBody,
};
use crate::layout::style::{Alignment, Color, Decoration, Spacing, Style};
use crate::render::metrics::FontMetricTable;
use crate::render::RendererConfig;

pub const DEFAULT_FONT_SIZE: f32 = 10.0;

/// Baseline position inside a line box, as a fraction of the font size.
const ASCENT: f32 = 0.8;
const BULLET: &str = "\u{2022}";

// ────────────────────────────────────────────────────────────────────────────
// Paint operations
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontVariant {
    pub bold: bool,
    pub italic: bool,
}

impl FontVariant {
    pub const ALL: [FontVariant; 4] = [
        FontVariant { bold: false, italic: false },
        FontVariant { bold: true, italic: false },
        FontVariant { bold: false, italic: true },
        FontVariant { bold: true, italic: true },
    ];

    /// Resource name of the face inside every page's font dictionary.
    pub fn resource_name(self) -> &'static [u8] {
        match (self.bold, self.italic) {
            (false, false) => b"F1",
            (true, false) => b"F2",
            (false, true) => b"F3",
            (true, true) => b"F4",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    pub baseline: f32,
    pub text: String,
    pub font: FontVariant,
    pub size: f32,
    pub color: Color,
    pub char_spacing: f32,
    pub word_spacing: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    Fill {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Color,
    },
    Text(TextRun),
}

#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Ready(PaintOp),
    /// Reserved for a fill whose extent is not known yet.
    Pending(usize),
}

#[derive(Debug, Clone, Default)]
pub struct PageCanvas {
    under: Vec<Slot>,
    over: Vec<PaintOp>,
}

impl PageCanvas {
    /// Paint operations in drawing order: fills first, then lines and text.
    pub fn ops(&self) -> impl Iterator<Item = &PaintOp> {
        self.under
            .iter()
            .filter_map(|slot| match slot {
                Slot::Ready(op) => Some(op),
                Slot::Pending(_) => None,
            })
            .chain(self.over.iter())
    }

    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.over.iter().filter_map(|op| match op {
            PaintOp::Text(run) => Some(run),
            _ => None,
        })
    }
}

#[derive(Debug, Clone)]
pub struct LaidOutDocument {
    pub width: f32,
    pub height: f32,
    /// Never empty: a document always has at least one page.
    pub pages: Vec<PageCanvas>,
}

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

pub fn layout(document: &Document, config: &RendererConfig) -> LaidOutDocument {
    let mut flow = Flow::new(document, config);
    let inherited = document.default_style.inheritable();
    let margins = document.page.margins;

    let mut cursor = Cursor {
        page: 0,
        y: margins.top,
    };
    for node in &document.content {
        cursor = flow.node(node, margins.left, document.page.content_width(), cursor, &inherited);
    }

    LaidOutDocument {
        width: document.page.width,
        height: document.page.height,
        pages: flow.pages,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cursor {
    page: usize,
    y: f32,
}

impl Cursor {
    fn down(self, dy: f32) -> Cursor {
        Cursor {
            y: self.y + dy,
            ..self
        }
    }

    fn furthest(self, other: Cursor) -> Cursor {
        if (other.page, other.y) > (self.page, self.y) {
            other
        } else {
            self
        }
    }
}

/// Resolved text properties for one text node.
struct Face {
    font: FontVariant,
    size: f32,
    leading: f32,
    color: Color,
    char_spacing: f32,
    alignment: Alignment,
    underline: bool,
    metrics: &'static FontMetricTable,
}

impl Face {
    fn new(style: &Style, config: &RendererConfig) -> Self {
        let bold = style.bold.unwrap_or(false);
        let italic = style.italics.unwrap_or(false);
        let size = style.font_size.unwrap_or(DEFAULT_FONT_SIZE);
        Face {
            font: FontVariant { bold, italic },
            size,
            leading: size * config.line_height * style.line_height.unwrap_or(1.0),
            color: style.color.unwrap_or(Color::BLACK),
            char_spacing: style.letter_spacing.unwrap_or(0.0),
            alignment: style.alignment.unwrap_or(Alignment::Left),
            underline: style.decoration == Some(Decoration::Underline),
            metrics: config.font.metrics(bold),
        }
    }

    fn width(&self, text: &str) -> f32 {
        self.metrics.width_pt(text, self.size, self.char_spacing)
    }

    fn wrap(&self, text: &str, max_width: f32) -> Vec<String> {
        self.metrics.wrap_lines(text, max_width, self.size, self.char_spacing)
    }

    fn bullet_indent(&self) -> f32 {
        self.width(BULLET) + self.size * 0.5
    }

    /// Baseline of a line box whose top edge is at `top`.
    fn baseline(&self, top: f32) -> f32 {
        top + (self.leading - self.size) / 2.0 + self.size * ASCENT
    }
}

/// Splits `available` between column rules; star columns share what is left.
fn resolve_widths(rules: &[ColumnWidth], available: f32, gap: f32, natural: impl Fn(usize) -> f32) -> Vec<f32> {
    let gaps = gap * rules.len().saturating_sub(1) as f32;
    let mut widths = vec![0.0; rules.len()];
    let mut stars = 0usize;

    for (i, rule) in rules.iter().enumerate() {
        widths[i] = match *rule {
            ColumnWidth::Fixed(width) => width,
            ColumnWidth::Percent(percent) => available * percent / 100.0,
            ColumnWidth::Auto => natural(i).min(available),
            ColumnWidth::Star => {
                stars += 1;
                0.0
            }
        };
    }

    if stars > 0 {
        let used: f32 = widths.iter().sum();
        let share = ((available - gaps - used) / stars as f32).max(0.0);
        for (width, rule) in widths.iter_mut().zip(rules) {
            if *rule == ColumnWidth::Star {
                *width = share;
            }
        }
    }
    widths
}

// ────────────────────────────────────────────────────────────────────────────
// Flow engine
// ────────────────────────────────────────────────────────────────────────────

struct Flow<'a> {
    document: &'a Document,
    config: &'a RendererConfig,
    pages: Vec<PageCanvas>,
    next_slot: usize,
}

impl<'a> Flow<'a> {
    fn new(document: &'a Document, config: &'a RendererConfig) -> Self {
        let mut flow = Flow {
            document,
            config,
            pages: Vec::new(),
            next_slot: 0,
        };
        flow.page(0);
        flow
    }

    /// The canvas of page `index`, creating it and any page before it.
    /// New pages start with the document's page fills.
    fn page(&mut self, index: usize) -> &mut PageCanvas {
        let document = self.document;
        while self.pages.len() <= index {
            let under = document
                .page_fills
                .iter()
                .map(|fill| {
                    Slot::Ready(PaintOp::Fill {
                        x: fill.x,
                        y: fill.y,
                        width: fill.width,
                        height: fill.height,
                        color: fill.color,
                    })
                })
                .collect();
            self.pages.push(PageCanvas {
                under,
                over: Vec::new(),
            });
        }
        &mut self.pages[index]
    }

    fn top(&self) -> f32 {
        self.document.page.margins.top
    }

    fn bottom(&self) -> f32 {
        self.document.page.height - self.document.page.margins.bottom
    }

    /// Moves to the next page when `height` does not fit below the cursor.
    /// A block taller than a whole page is placed anyway.
    fn fit(&mut self, cursor: Cursor, height: f32) -> Cursor {
        if cursor.y + height <= self.bottom() || cursor.y <= self.top() + 0.5 {
            return cursor;
        }
        let next = Cursor {
            page: cursor.page + 1,
            y: self.top(),
        };
        self.page(next.page);
        next
    }

    fn paint(&mut self, page: usize, op: PaintOp) {
        self.page(page).over.push(op);
    }

    fn reserve(&mut self, page: usize) -> usize {
        let id = self.next_slot;
        self.next_slot += 1;
        self.page(page).under.push(Slot::Pending(id));
        id
    }

    /// Fills a rectangle that may run over several pages. The first page
    /// uses the reserved slot; later pages get the fill right after their
    /// page fills.
    fn fill_span(&mut self, slot: usize, start: Cursor, end: Cursor, x: f32, width: f32, color: Color) {
        let leading = self.document.page_fills.len();
        for page in start.page..=end.page {
            let top = if page == start.page { start.y } else { self.top() };
            let bottom = if page == end.page { end.y } else { self.bottom() };
            let fill = Slot::Ready(PaintOp::Fill {
                x,
                y: top,
                width,
                height: (bottom - top).max(0.0),
                color,
            });

            let canvas = self.page(page);
            if page == start.page {
                if let Some(reserved) = canvas
                    .under
                    .iter_mut()
                    .find(|s| matches!(s, Slot::Pending(id) if *id == slot))
                {
                    *reserved = fill;
                }
            } else {
                let at = leading.min(canvas.under.len());
                canvas.under.insert(at, fill);
            }
        }
    }

    /// Outlines a rectangle that may run over several pages; the edges at a
    /// page break stay open.
    fn stroke_span(&mut self, start: Cursor, end: Cursor, x: f32, width: f32, borders: Borders) {
        for page in start.page..=end.page {
            let top = if page == start.page { start.y } else { self.top() };
            let bottom = if page == end.page { end.y } else { self.bottom() };
            let mut edges = vec![(x, top, x, bottom), (x + width, top, x + width, bottom)];
            if page == start.page {
                edges.push((x, top, x + width, top));
            }
            if page == end.page {
                edges.push((x, bottom, x + width, bottom));
            }
            for (x1, y1, x2, y2) in edges {
                self.paint(
                    page,
                    PaintOp::Line {
                        x1,
                        y1,
                        x2,
                        y2,
                        width: borders.width,
                        color: borders.color,
                    },
                );
            }
        }
    }

    fn named(&self, name: Option<&str>) -> Style {
        name.and_then(|name| self.document.styles.get(name))
            .cloned()
            .unwrap_or_default()
    }

    /// Effective style and margin of a text node.
    fn text_style(&self, text: &Text, inherited: &Style) -> (Style, Spacing) {
        let named = self.named(text.style.as_deref());
        let mut style = inherited.merge(&named);
        if text.alignment.is_some() {
            style.alignment = text.alignment;
        }
        let margin = text.margin.or(named.margin).unwrap_or(Spacing::ZERO);
        (style, margin)
    }

    fn stack_style(&self, stack: &Stack, inherited: &Style) -> Style {
        match stack.style.as_deref() {
            Some(name) => inherited.merge(&self.named(Some(name)).inheritable()),
            None => inherited.clone(),
        }
    }

    // ── Placement ───────────────────────────────────────────────────────────

    fn node(&mut self, node: &Node, x: f32, width: f32, cursor: Cursor, inherited: &Style) -> Cursor {
        match node {
            Node::Text(text) => self.text(text, x, width, cursor, inherited),
            Node::Stack(stack) => self.stack(stack, x, width, cursor, inherited),
            Node::Columns(columns) => self.columns(columns, x, width, cursor, inherited),
            Node::Divider(divider) => self.divider(divider, x, width, cursor),
            Node::Table(table) => self.table(table, x, width, cursor, inherited),
            Node::Background(band) => self.background(band, x, width, cursor, inherited),
        }
    }

    fn text(&mut self, text: &Text, x: f32, width: f32, cursor: Cursor, inherited: &Style) -> Cursor {
        let (style, margin) = self.text_style(text, inherited);
        let face = Face::new(&style, self.config);
        let x = x + margin.left;
        let width = (width - margin.horizontal()).max(0.0);
        let mut cursor = cursor.down(margin.top);

        match &text.body {
            TextBody::Line(body) => {
                let lines = face.wrap(body, width);
                let count = lines.len();
                for (i, line) in lines.iter().enumerate() {
                    cursor = self.text_line(line, x, width, cursor, &face, i + 1 == count);
                }
            }
            TextBody::Bullets(items) => {
                let indent = face.bullet_indent();
                for item in items {
                    let lines = face.wrap(item, (width - indent).max(0.0));
                    let count = lines.len();
                    for (i, line) in lines.iter().enumerate() {
                        cursor = self.fit(cursor, face.leading);
                        if i == 0 {
                            let bullet = self.run(BULLET, x, cursor, &face, 0.0);
                            self.paint(cursor.page, bullet);
                        }
                        cursor = self.text_line(line, x + indent, width - indent, cursor, &face, i + 1 == count);
                    }
                }
            }
        }
        cursor.down(margin.bottom)
    }

    fn run(&self, text: &str, x: f32, cursor: Cursor, face: &Face, word_spacing: f32) -> PaintOp {
        PaintOp::Text(TextRun {
            x,
            baseline: face.baseline(cursor.y),
            text: text.to_string(),
            font: face.font,
            size: face.size,
            color: face.color,
            char_spacing: face.char_spacing,
            word_spacing,
        })
    }

    fn text_line(&mut self, line: &str, x: f32, width: f32, cursor: Cursor, face: &Face, last: bool) -> Cursor {
        let cursor = self.fit(cursor, face.leading);
        let line_width = face.width(line);
        let free = (width - line_width).max(0.0);

        let (offset, word_spacing) = match face.alignment {
            Alignment::Left => (0.0, 0.0),
            Alignment::Center => (free / 2.0, 0.0),
            Alignment::Right => (free, 0.0),
            Alignment::Justify => {
                let gaps = line.matches(' ').count();
                if last || gaps == 0 {
                    (0.0, 0.0)
                } else {
                    (0.0, free / gaps as f32)
                }
            }
        };

        let run = self.run(line, x + offset, cursor, face, word_spacing);
        self.paint(cursor.page, run);

        if face.underline {
            let drawn = if word_spacing > 0.0 { width } else { line_width };
            let y = face.baseline(cursor.y) + face.size * 0.15;
            self.paint(
                cursor.page,
                PaintOp::Line {
                    x1: x + offset,
                    y1: y,
                    x2: x + offset + drawn,
                    y2: y,
                    width: (face.size * 0.05).max(0.5),
                    color: face.color,
                },
            );
        }
        cursor.down(face.leading)
    }

    fn stack(&mut self, stack: &Stack, x: f32, width: f32, cursor: Cursor, inherited: &Style) -> Cursor {
        let style = self.stack_style(stack, inherited);
        let margin = stack.margin;
        let x = x + margin.left;
        let width = (width - margin.horizontal()).max(0.0);

        let mut cursor = cursor.down(margin.top);
        for child in &stack.children {
            cursor = self.node(child, x, width, cursor, &style);
        }
        cursor.down(margin.bottom)
    }

    fn columns(&mut self, columns: &Columns, x: f32, width: f32, cursor: Cursor, inherited: &Style) -> Cursor {
        let margin = columns.margin;
        let available = (width - margin.horizontal()).max(0.0);
        let rules: Vec<ColumnWidth> = columns.columns.iter().map(|c| c.width).collect();
        let widths = resolve_widths(&rules, available, columns.gap, |i| {
            self.natural_width(&columns.columns[i].node, inherited)
        });

        let start = cursor.down(margin.top);
        let mut end = start;
        let mut left = x + margin.left;
        for (column, width) in columns.columns.iter().zip(widths) {
            let done = self.node(&column.node, left, width, start, inherited);
            end = end.furthest(done);
            left += width + columns.gap;
        }
        end.down(margin.bottom)
    }

    fn divider(&mut self, divider: &Divider, x: f32, width: f32, cursor: Cursor) -> Cursor {
        let margin = divider.margin;
        let start = self.fit(cursor.down(margin.top), divider.thickness);
        let length = divider.length.min(width - margin.horizontal()).max(0.0);
        let y = start.y + divider.thickness / 2.0;
        let x = x + margin.left;

        self.paint(
            start.page,
            PaintOp::Line {
                x1: x,
                y1: y,
                x2: x + length,
                y2: y,
                width: divider.thickness,
                color: divider.color,
            },
        );
        start.down(divider.thickness + margin.bottom)
    }

    fn table(&mut self, table: &Table, x: f32, width: f32, cursor: Cursor, inherited: &Style) -> Cursor {
        let margin = table.margin;
        let available = (width - margin.horizontal()).max(0.0);
        let widths = resolve_widths(&table.widths, available, 0.0, |i| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| self.natural_width(&cell.node, inherited) + cell.padding.horizontal())
                .fold(0.0, f32::max)
        });
        let first_line = DEFAULT_FONT_SIZE * self.config.line_height;

        let mut row_start = cursor.down(margin.top);
        for row in &table.rows {
            let padding = row.iter().map(|c| c.padding.vertical()).fold(0.0, f32::max);
            row_start = self.fit(row_start, padding + first_line);

            let mut row_end = row_start;
            let mut placed = Vec::with_capacity(row.len());
            let mut left = x + margin.left;
            for (cell, width) in row.iter().zip(widths.iter().copied()) {
                let slot = cell.fill.map(|_| self.reserve(row_start.page));
                let inner = (width - cell.padding.horizontal()).max(0.0);
                let done = self.node(
                    &cell.node,
                    left + cell.padding.left,
                    inner,
                    row_start.down(cell.padding.top),
                    inherited,
                );
                row_end = row_end.furthest(done.down(cell.padding.bottom));
                placed.push((left, width, slot, cell.fill));
                left += width;
            }

            for (left, width, slot, fill) in placed {
                if let (Some(slot), Some(color)) = (slot, fill) {
                    self.fill_span(slot, row_start, row_end, left, width, color);
                }
                if let Some(borders) = table.borders {
                    self.stroke_span(row_start, row_end, left, width, borders);
                }
            }
            row_start = row_end;
        }
        row_start.down(margin.bottom)
    }

    fn background(&mut self, band: &Background, x: f32, width: f32, cursor: Cursor, inherited: &Style) -> Cursor {
        let margin = band.margin;
        let page_room = self.bottom() - self.top();
        let start = self.fit(cursor.down(margin.top), band.height.min(page_room));
        let slot = self.reserve(start.page);

        let x = x + margin.left;
        let width = (width - margin.horizontal()).max(0.0);
        let inner_width = (width - band.padding.horizontal()).max(0.0);

        let mut inner = start.down(band.padding.top);
        for child in &band.children {
            inner = self.node(child, x + band.padding.left, inner_width, inner, inherited);
        }
        let mut end = inner.down(band.padding.bottom);
        if end.page == start.page && end.y < start.y + band.height {
            end.y = start.y + band.height;
        }

        self.fill_span(slot, start, end, x, width, band.color);
        end.down(margin.bottom)
    }

    // ── Measurement ─────────────────────────────────────────────────────────

    /// Width a node takes when nothing wraps.
    fn natural_width(&self, node: &Node, inherited: &Style) -> f32 {
        match node {
            Node::Text(text) => {
                let (style, margin) = self.text_style(text, inherited);
                let face = Face::new(&style, self.config);
                let widest = |s: &str| s.split('\n').map(|l| face.width(l.trim())).fold(0.0, f32::max);
                let content = match &text.body {
                    TextBody::Line(line) => widest(line),
                    TextBody::Bullets(items) => {
                        face.bullet_indent() + items.iter().map(|item| widest(item)).fold(0.0, f32::max)
                    }
                };
                content + margin.horizontal()
            }
            Node::Stack(stack) => {
                let style = self.stack_style(stack, inherited);
                stack
                    .children
                    .iter()
                    .map(|child| self.natural_width(child, &style))
                    .fold(0.0, f32::max)
                    + stack.margin.horizontal()
            }
            Node::Columns(columns) => {
                let gaps = columns.gap * columns.columns.len().saturating_sub(1) as f32;
                columns
                    .columns
                    .iter()
                    .map(|column| match column.width {
                        ColumnWidth::Fixed(width) => width,
                        _ => self.natural_width(&column.node, inherited),
                    })
                    .sum::<f32>()
                    + gaps
                    + columns.margin.horizontal()
            }
            Node::Divider(divider) => divider.length + divider.margin.horizontal(),
            Node::Table(table) => {
                let column = |i: usize| {
                    table
                        .rows
                        .iter()
                        .filter_map(|row| row.get(i))
                        .map(|cell| self.natural_width(&cell.node, inherited) + cell.padding.horizontal())
                        .fold(0.0, f32::max)
                };
                table
                    .widths
                    .iter()
                    .enumerate()
                    .map(|(i, rule)| match *rule {
                        ColumnWidth::Fixed(width) => width,
                        _ => column(i),
                    })
                    .sum::<f32>()
                    + table.margin.horizontal()
            }
            Node::Background(band) => {
                band.children
                    .iter()
                    .map(|child| self.natural_width(child, inherited))
                    .fold(0.0, f32::max)
                    + band.padding.horizontal()
                    + band.margin.horizontal()
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
