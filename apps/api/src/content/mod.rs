// Content preparation: everything that happens to a resume before layout.
// Date normalization, field defaulting and per-template truncation.
// All stages are pure and return new values; the input record is never mutated.

pub mod dates;
pub mod defaults;
pub mod truncation;

pub use defaults::{apply_defaults, DefaultedContent};
pub use truncation::{truncate_sections, TruncatedSections};

/// Placeholder rendered in place of absent or empty scalar data.
pub const NOT_PROVIDED: &str = "Not Provided";

/// Returns the trimmed value when it carries text, `None` when absent or blank.
pub fn provided(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Returns the trimmed value, or `fallback` when it is absent or blank.
pub fn text_or(value: Option<&str>, fallback: &str) -> String {
    provided(value).unwrap_or(fallback).to_string()
}

/// Defaults each element of a list individually, keeping order and length.
pub fn items_or(items: &[Option<String>], fallback: &str) -> Vec<String> {
    items
        .iter()
        .map(|item| text_or(item.as_deref(), fallback))
        .collect()
}

/// Joins the provided elements of a list; blank elements are dropped.
pub fn join_provided(items: &[Option<String>], separator: &str) -> Option<String> {
    let parts: Vec<&str> = items.iter().filter_map(|i| provided(i.as_deref())).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(separator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provided_treats_whitespace_as_absent() {
        assert_eq!(provided(Some("  ")), None);
        assert_eq!(provided(None), None);
        assert_eq!(provided(Some(" Rust ")), Some("Rust"));
    }

    #[test]
    fn test_items_or_defaults_each_element() {
        let items = vec![Some("Rust".to_string()), None, Some(String::new())];
        assert_eq!(
            items_or(&items, NOT_PROVIDED),
            vec!["Rust", NOT_PROVIDED, NOT_PROVIDED]
        );
    }

    #[test]
    fn test_join_provided_skips_blanks() {
        let items = vec![Some("Rust".to_string()), None, Some("Go".to_string())];
        assert_eq!(join_provided(&items, ", ").as_deref(), Some("Rust, Go"));
        assert_eq!(join_provided(&[None], ", "), None);
    }
}
