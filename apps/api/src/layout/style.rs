//! Style primitives shared by every template: colors, spacing and the named
//! style sheet nodes refer to.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

// ────────────────────────────────────────────────────────────────────────────
// Color
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::hex(0xFFFFFF);
    pub const BLACK: Color = Color::hex(0x000000);

    /// Builds a color from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Color {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }

    /// Components scaled to `0.0..=1.0`, as PDF operators expect them.
    pub fn unit_rgb(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Spacing
// ────────────────────────────────────────────────────────────────────────────

/// Left, top, right, bottom in points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Spacing {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Spacing {
    pub const ZERO: Spacing = Spacing::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Spacing {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn uniform(all: f32) -> Self {
        Spacing::new(all, all, all, all)
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Decoration {
    Underline,
}

// ────────────────────────────────────────────────────────────────────────────
// Style
// ────────────────────────────────────────────────────────────────────────────

/// A set of text properties. Unset fields inherit from the enclosing context.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italics: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Multiplier on the font size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoration: Option<Decoration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f32>,
    /// Outer spacing of the node using this style. Never inherited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Spacing>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, points: f32) -> Self {
        self.font_size = Some(points);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = Some(true);
        self
    }

    pub fn italics(mut self) -> Self {
        self.italics = Some(true);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn line_height(mut self, factor: f32) -> Self {
        self.line_height = Some(factor);
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn underline(mut self) -> Self {
        self.decoration = Some(Decoration::Underline);
        self
    }

    pub fn letter_spacing(mut self, points: f32) -> Self {
        self.letter_spacing = Some(points);
        self
    }

    pub fn margin(mut self, margin: Spacing) -> Self {
        self.margin = Some(margin);
        self
    }

    /// Overlays `other` on top of `self`: fields set in `other` win.
    pub fn merge(&self, other: &Style) -> Style {
        Style {
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            italics: other.italics.or(self.italics),
            color: other.color.or(self.color),
            line_height: other.line_height.or(self.line_height),
            alignment: other.alignment.or(self.alignment),
            decoration: other.decoration.or(self.decoration),
            letter_spacing: other.letter_spacing.or(self.letter_spacing),
            margin: other.margin.or(self.margin),
        }
    }

    /// The part of this style that children inherit.
    pub fn inheritable(&self) -> Style {
        Style {
            margin: None,
            ..self.clone()
        }
    }
}

/// Named styles of one document, ordered by name for stable serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StyleSheet(BTreeMap<String, Style>);

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, style: Style) -> Self {
        self.0.insert(name.to_string(), style);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Style> {
        self.0.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_components() {
        let c = Color::hex(0x2C3E50);
        assert_eq!((c.r, c.g, c.b), (0x2C, 0x3E, 0x50));
        assert_eq!(serde_json::to_value(c).unwrap(), "#2C3E50");
    }

    #[test]
    fn test_merge_prefers_overlay() {
        let base = Style::new().size(10.0).color(Color::BLACK);
        let overlay = Style::new().size(14.0).bold();
        let merged = base.merge(&overlay);
        assert_eq!(merged.font_size, Some(14.0));
        assert_eq!(merged.bold, Some(true));
        assert_eq!(merged.color, Some(Color::BLACK));
    }

    #[test]
    fn test_margin_is_not_inherited() {
        let style = Style::new().size(12.0).margin(Spacing::uniform(5.0));
        let inherited = style.inheritable();
        assert_eq!(inherited.margin, None);
        assert_eq!(inherited.font_size, Some(12.0));
    }

    #[test]
    fn test_unset_fields_are_not_serialized() {
        let json = serde_json::to_value(Style::new().bold()).unwrap();
        assert_eq!(json, serde_json::json!({ "bold": true }));
    }
}
