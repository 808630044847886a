//! Field Defaulter: the single boundary that removes optionality before layout.
//!
//! The rule is asymmetric:
//! - scalars in `basic` get the fixed placeholder when absent or blank
//! - the three skill lists get a one-element placeholder list when absent or
//!   empty, and are otherwise kept verbatim (blank elements included)
//! - entry sections default to empty, never to a fake entry, so an empty
//!   section is omitted instead of rendered with made-up content

use serde::Serialize;

use crate::content::{provided, text_or, NOT_PROVIDED};
use crate::models::resume::{
    BasicInfo, Certification, Education, Experience, Project, ResumeContent, Skills,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefaultedBasic {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub title: String,
    pub bio: String,
    /// Whether `website` came from the input rather than the placeholder.
    pub website_provided: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefaultedSkills {
    pub technical: Vec<Option<String>>,
    pub soft: Vec<Option<String>>,
    pub languages: Vec<Option<String>>,
}

/// Fully-populated view of a resume. Builders read only this and the
/// truncated sections derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefaultedContent {
    pub basic: DefaultedBasic,
    /// Headline under the name: the record title, else `basic.title`.
    /// `None` lets each template pick its own fallback.
    pub headline: Option<String>,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub skills: DefaultedSkills,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
}

pub fn apply_defaults(content: &ResumeContent, record_title: Option<&str>) -> DefaultedContent {
    let basic = content.basic.clone().unwrap_or_default();
    let skills = content.skills.clone().unwrap_or_default();

    let headline = provided(record_title)
        .or_else(|| provided(basic.title.as_deref()))
        .map(str::to_string);

    DefaultedContent {
        basic: default_basic(&basic),
        headline,
        education: content.education.clone().unwrap_or_default(),
        experience: content.experience.clone().unwrap_or_default(),
        skills: default_skills(&skills),
        projects: content.projects.clone().unwrap_or_default(),
        certifications: content.certifications.clone().unwrap_or_default(),
    }
}

fn default_basic(basic: &BasicInfo) -> DefaultedBasic {
    let field = |value: &Option<String>| text_or(value.as_deref(), NOT_PROVIDED);
    DefaultedBasic {
        name: field(&basic.name),
        email: field(&basic.email),
        phone: field(&basic.phone),
        location: field(&basic.location),
        website: field(&basic.website),
        title: field(&basic.title),
        bio: field(&basic.bio),
        website_provided: provided(basic.website.as_deref()).is_some(),
    }
}

fn default_skills(skills: &Skills) -> DefaultedSkills {
    DefaultedSkills {
        technical: default_list(skills.technical.as_ref()),
        soft: default_list(skills.soft.as_ref()),
        languages: default_list(skills.languages.as_ref()),
    }
}

fn default_list(list: Option<&Vec<Option<String>>>) -> Vec<Option<String>> {
    match list {
        Some(items) if !items.is_empty() => items.clone(),
        _ => vec![Some(NOT_PROVIDED.to_string())],
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn content(value: serde_json::Value) -> ResumeContent {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_content_gets_placeholders_and_empty_sections() {
        let defaulted = apply_defaults(&ResumeContent::default(), None);

        assert_eq!(defaulted.basic.name, NOT_PROVIDED);
        assert_eq!(defaulted.basic.email, NOT_PROVIDED);
        assert_eq!(defaulted.basic.bio, NOT_PROVIDED);
        assert!(!defaulted.basic.website_provided);

        assert_eq!(defaulted.skills.technical, vec![Some(NOT_PROVIDED.to_string())]);
        assert_eq!(defaulted.skills.soft, vec![Some(NOT_PROVIDED.to_string())]);
        assert_eq!(defaulted.skills.languages, vec![Some(NOT_PROVIDED.to_string())]);

        assert!(defaulted.education.is_empty());
        assert!(defaulted.experience.is_empty());
        assert!(defaulted.projects.is_empty());
        assert!(defaulted.certifications.is_empty());
        assert!(defaulted.headline.is_none());
    }

    #[test]
    fn test_blank_scalars_are_defaulted() {
        let defaulted = apply_defaults(
            &content(json!({ "basic": { "name": "   ", "email": "", "phone": null } })),
            None,
        );
        assert_eq!(defaulted.basic.name, NOT_PROVIDED);
        assert_eq!(defaulted.basic.email, NOT_PROVIDED);
        assert_eq!(defaulted.basic.phone, NOT_PROVIDED);
    }

    #[test]
    fn test_non_empty_list_with_blank_elements_is_kept() {
        let defaulted = apply_defaults(
            &content(json!({ "skills": { "technical": ["", null, "Rust"], "soft": [] } })),
            None,
        );
        assert_eq!(
            defaulted.skills.technical,
            vec![Some(String::new()), None, Some("Rust".to_string())]
        );
        assert_eq!(defaulted.skills.soft, vec![Some(NOT_PROVIDED.to_string())]);
    }

    #[test]
    fn test_headline_prefers_record_title() {
        let c = content(json!({ "basic": { "title": "Engineer" } }));
        assert_eq!(
            apply_defaults(&c, Some("Staff Engineer")).headline.as_deref(),
            Some("Staff Engineer")
        );
        assert_eq!(apply_defaults(&c, Some(" ")).headline.as_deref(), Some("Engineer"));
        assert_eq!(apply_defaults(&c, None).headline.as_deref(), Some("Engineer"));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let original = content(json!({
            "basic": { "name": "Ada" },
            "experience": [{ "company": "Initech" }]
        }));
        let before = original.clone();
        let _ = apply_defaults(&original, None);
        assert_eq!(original, before);
    }

    #[test]
    fn test_website_provided_flag() {
        let defaulted = apply_defaults(
            &content(json!({ "basic": { "website": "https://ada.dev" } })),
            None,
        );
        assert!(defaulted.basic.website_provided);
        assert_eq!(defaulted.basic.website, "https://ada.dev");
    }
}
