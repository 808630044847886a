use serde::{Deserialize, Serialize};

use crate::content::{DefaultedContent, TruncatedSections};
use crate::layout::document::Document;
use crate::layout::{creative, executive, fallback, minimal, modern};

/// The closed set of visual templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Modern,
    Minimal,
    Executive,
    Creative,
    Default,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 5] = [
        TemplateKind::Modern,
        TemplateKind::Minimal,
        TemplateKind::Executive,
        TemplateKind::Creative,
        TemplateKind::Default,
    ];

    /// Total: unknown, empty or mis-cased names never fail. Anything that is
    /// not a known template name selects [`TemplateKind::Default`].
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "modern" => TemplateKind::Modern,
            "minimal" => TemplateKind::Minimal,
            "executive" => TemplateKind::Executive,
            "creative" => TemplateKind::Creative,
            _ => TemplateKind::Default,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateKind::Modern => "modern",
            TemplateKind::Minimal => "minimal",
            TemplateKind::Executive => "executive",
            TemplateKind::Creative => "creative",
            TemplateKind::Default => "default",
        }
    }
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A layout builder reads prepared content and produces a document tree.
pub type LayoutBuilder = fn(&DefaultedContent, &TruncatedSections) -> Document;

pub fn select(kind: TemplateKind) -> LayoutBuilder {
    match kind {
        TemplateKind::Modern => modern::build,
        TemplateKind::Minimal => minimal::build,
        TemplateKind::Executive => executive::build,
        TemplateKind::Creative => creative::build,
        TemplateKind::Default => fallback::build,
    }
}

pub fn select_by_name(name: &str) -> LayoutBuilder {
    select(TemplateKind::parse(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names_parse() {
        for kind in TemplateKind::ALL {
            assert_eq!(TemplateKind::parse(kind.as_str()), kind);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trims() {
        assert_eq!(TemplateKind::parse("  Modern "), TemplateKind::Modern);
        assert_eq!(TemplateKind::parse("CREATIVE"), TemplateKind::Creative);
    }

    #[test]
    fn test_unknown_and_empty_fall_back_to_default() {
        assert_eq!(TemplateKind::parse("xyz"), TemplateKind::Default);
        assert_eq!(TemplateKind::parse(""), TemplateKind::Default);
        assert_eq!(TemplateKind::parse("modern2"), TemplateKind::Default);
    }

    #[test]
    fn test_select_by_unknown_name_builds_default_layout() {
        let content = crate::content::apply_defaults(&Default::default(), None);
        let sections = crate::content::truncate_sections(&content, TemplateKind::Default);
        assert_eq!(
            select_by_name("xyz")(&content, &sections),
            select(TemplateKind::Default)(&content, &sections)
        );
    }
}
