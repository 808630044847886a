//! Text helpers shared by the layout builders for entry-level fields.

use crate::content::dates::date_range;
use crate::content::{items_or, join_provided, text_or, NOT_PROVIDED};
use crate::models::resume::{Education, Experience, Project};

/// The value, or the template's fallback for it.
pub fn or(value: &Option<String>, fallback: &str) -> String {
    text_or(value.as_deref(), fallback)
}

/// Whether an optional entry field carries text worth a line of its own.
pub fn has_text(value: &Option<String>) -> bool {
    crate::content::provided(value.as_deref()).is_some()
}

pub fn experience_dates(exp: &Experience) -> String {
    date_range(exp.start_date.as_ref(), exp.end_date.as_ref(), exp.current)
}

pub fn education_dates(edu: &Education) -> String {
    date_range(edu.start_date.as_ref(), edu.end_date.as_ref(), false)
}

/// Bullet items for a highlight list, blank items replaced by `fallback`.
/// `None` when the list is absent or empty so no bullet block is emitted.
pub fn highlights(list: &Option<Vec<Option<String>>>, fallback: &str) -> Option<Vec<String>> {
    match list {
        Some(items) if !items.is_empty() => Some(items_or(items, fallback)),
        _ => None,
    }
}

/// `"Technologies: a, b"` when the project names at least one technology.
pub fn technologies_line(project: &Project) -> Option<String> {
    project
        .technologies
        .as_deref()
        .and_then(|techs| join_provided(techs, ", "))
        .map(|joined| format!("Technologies: {joined}"))
}

/// Skill items joined for a single line, blanks replaced by the placeholder.
pub fn skill_line(items: &[Option<String>], separator: &str) -> String {
    items_or(items, NOT_PROVIDED).join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::DateValue;

    #[test]
    fn test_highlights_absent_or_empty_is_none() {
        assert_eq!(highlights(&None, "Achievement"), None);
        assert_eq!(highlights(&Some(vec![]), "Achievement"), None);
        assert_eq!(
            highlights(&Some(vec![None, Some("Shipped".into())]), "Achievement"),
            Some(vec!["Achievement".to_string(), "Shipped".to_string()])
        );
    }

    #[test]
    fn test_technologies_line_skips_blank_entries() {
        let project = Project {
            technologies: Some(vec![Some("Rust".into()), Some(" ".into()), Some("Axum".into())]),
            ..Default::default()
        };
        assert_eq!(technologies_line(&project).as_deref(), Some("Technologies: Rust, Axum"));
        assert_eq!(technologies_line(&Project::default()), None);
    }

    #[test]
    fn test_experience_dates_current() {
        let exp = Experience {
            start_date: Some(DateValue::Text("2021-03-01".into())),
            current: true,
            ..Default::default()
        };
        assert_eq!(experience_dates(&exp), "01/03/2021 - Present");
    }

    #[test]
    fn test_skill_line_defaults_blank_items() {
        let items = vec![Some("Rust".into()), Some(String::new())];
        assert_eq!(skill_line(&items, " • "), "Rust • Not Provided");
    }
}
