//! Document Assembler: the single entry point from a stored record to a
//! document tree.

use thiserror::Error;
use tracing::{debug, info};

use crate::content::{apply_defaults, provided, truncate_sections};
use crate::layout::document::Document;
use crate::layout::templates::{select, TemplateKind};
use crate::models::resume::ResumeRecord;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("resume has no content to lay out")]
    MissingContent,
}

/// The template to use: an explicit override, else the record's own
/// template, else the default layout.
pub fn resolve_template(record: &ResumeRecord, template_override: Option<&str>) -> TemplateKind {
    template_override
        .or(record.template.as_deref())
        .map(TemplateKind::parse)
        .unwrap_or(TemplateKind::Default)
}

/// Turns a resume record into a laid-out document.
///
/// Fails only when the record carries no content at all; every other gap is
/// filled with placeholders.
pub fn generate(record: &ResumeRecord, template_override: Option<&str>) -> Result<Document, GenerationError> {
    let content = record.content.as_ref().ok_or(GenerationError::MissingContent)?;
    let kind = resolve_template(record, template_override);

    let defaulted = apply_defaults(content, record.title.as_deref());
    let sections = truncate_sections(&defaulted, kind);
    debug!(
        template = %kind,
        experience = sections.experience.len(),
        projects = sections.projects.len(),
        certifications = sections.certifications.len(),
        "Prepared resume content"
    );

    let title = provided(record.title.as_deref()).unwrap_or(defaulted.basic.name.as_str()).to_string();
    let document = select(kind)(&defaulted, &sections).titled(title);

    info!(template = %kind, nodes = document.node_count(), "Resume layout generated");
    Ok(document)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::NOT_PROVIDED;
    use serde_json::json;

    fn record(value: serde_json::Value) -> ResumeRecord {
        serde_json::from_value(value).unwrap()
    }

    fn full_record() -> ResumeRecord {
        record(json!({
            "title": "Platform Engineer",
            "template": "modern",
            "content": {
                "basic": {
                    "name": "Ada Lovelace",
                    "email": "ada@example.com",
                    "phone": "555-0100",
                    "location": "London",
                    "bio": "Builds reliable systems."
                },
                "experience": [{
                    "company": "Analytical Engines Ltd",
                    "position": "Engineer",
                    "startDate": "2021-03-01",
                    "current": true,
                    "highlights": ["one", "two", "three", "four", "five", "six"]
                }],
                "education": [{ "institution": "UCL", "degree": "BSc", "field": "Mathematics" }],
                "skills": { "technical": ["Rust", "Go"], "soft": ["Writing"] },
                "projects": [{ "name": "Forge", "technologies": ["Rust"] }],
                "certifications": [{ "name": "CKA", "date": "2023-06-15" }]
            }
        }))
    }

    // ── Preconditions ───────────────────────────────────────────────────────

    #[test]
    fn test_missing_content_is_an_error() {
        let err = generate(&record(json!({ "title": "x" })), None).unwrap_err();
        assert_eq!(err, GenerationError::MissingContent);

        let err = generate(&record(json!({ "content": null })), Some("modern")).unwrap_err();
        assert_eq!(err, GenerationError::MissingContent);
    }

    #[test]
    fn test_empty_content_still_renders_every_template() {
        let r = record(json!({ "content": {} }));
        for kind in TemplateKind::ALL {
            let doc = generate(&r, Some(kind.as_str())).unwrap();
            assert!(!doc.content.is_empty(), "{kind} produced an empty document");
        }
    }

    // ── Template resolution ─────────────────────────────────────────────────

    #[test]
    fn test_override_beats_record_template() {
        let r = full_record();
        assert_eq!(resolve_template(&r, Some("executive")), TemplateKind::Executive);
        assert_eq!(resolve_template(&r, None), TemplateKind::Modern);
        assert_eq!(resolve_template(&ResumeRecord::default(), None), TemplateKind::Default);
    }

    #[test]
    fn test_unknown_template_matches_default_tree() {
        let r = full_record();
        assert_eq!(
            generate(&r, Some("xyz")).unwrap(),
            generate(&r, Some("default")).unwrap()
        );
    }

    #[test]
    fn test_generate_is_deterministic() {
        let r = full_record();
        for kind in TemplateKind::ALL {
            let a = generate(&r, Some(kind.as_str())).unwrap();
            let b = generate(&r, Some(kind.as_str())).unwrap();
            assert_eq!(a, b);
            assert_eq!(
                serde_json::to_string(&a).unwrap(),
                serde_json::to_string(&b).unwrap()
            );
        }
    }

    #[test]
    fn test_input_record_is_untouched() {
        let r = full_record();
        let before = r.clone();
        let _ = generate(&r, Some("creative")).unwrap();
        assert_eq!(r, before);
    }

    // ── Section presence ────────────────────────────────────────────────────

    #[test]
    fn test_empty_experience_has_no_heading_in_any_template() {
        let r = record(json!({ "content": { "basic": { "name": "Ada" }, "experience": [] } }));
        for kind in TemplateKind::ALL {
            let doc = generate(&r, Some(kind.as_str())).unwrap();
            assert!(
                !doc.texts()
                    .iter()
                    .any(|t| t.to_ascii_lowercase().contains("experience")),
                "{kind} rendered an experience heading"
            );
        }
    }

    #[test]
    fn test_missing_name_renders_placeholder_in_every_template() {
        let r = record(json!({ "content": { "basic": { "email": "ada@example.com" } } }));
        for kind in TemplateKind::ALL {
            let doc = generate(&r, Some(kind.as_str())).unwrap();
            let expected = if kind == TemplateKind::Executive {
                NOT_PROVIDED.to_uppercase()
            } else {
                NOT_PROVIDED.to_string()
            };
            assert!(
                doc.texts().contains(&expected.as_str()),
                "{kind} did not render the name placeholder"
            );
        }
    }

    #[test]
    fn test_document_title_prefers_record_title() {
        let doc = generate(&full_record(), None).unwrap();
        assert_eq!(doc.title.as_deref(), Some("Platform Engineer"));

        let doc = generate(&record(json!({ "content": { "basic": { "name": "Ada" } } })), None).unwrap();
        assert_eq!(doc.title.as_deref(), Some("Ada"));
    }

    // ── Truncation end to end ───────────────────────────────────────────────

    #[test]
    fn test_skill_caps_differ_between_minimal_and_creative() {
        let r = record(json!({
            "content": {
                "skills": {
                    "technical": ["s1", "s2", "s3", "s4", "s5", "s6"],
                    "soft": ["Listening", "Writing"]
                }
            }
        }));

        let minimal = generate(&r, Some("minimal")).unwrap();
        assert!(minimal
            .texts()
            .contains(&"Technical: s1, s2, s3, s4, s5, s6"));
        assert!(minimal.texts().contains(&"Soft Skills: Listening, Writing"));

        let creative = generate(&r, Some("creative")).unwrap();
        let texts = creative.texts();
        for shown in ["s1", "s2", "s3", "s4", "Listening", "Writing"] {
            assert!(texts.contains(&shown), "{shown} missing under creative");
        }
        assert!(!texts.contains(&"s5"));
        assert!(!texts.contains(&"s6"));
    }

    #[test]
    fn test_current_role_and_highlight_cap() {
        let r = full_record();

        let modern = generate(&r, Some("modern")).unwrap();
        let texts = modern.texts();
        assert!(texts.contains(&"01/03/2021 - Present"));
        assert!(texts.contains(&"four"));
        assert!(!texts.contains(&"five"));

        let creative = generate(&r, Some("creative")).unwrap();
        let texts = creative.texts();
        assert!(texts.contains(&"three"));
        assert!(!texts.contains(&"four"));
    }
}
