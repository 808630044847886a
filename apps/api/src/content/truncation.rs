//! Per-template item caps.
//!
//! A cap always keeps a strict prefix in the original order. Short lists are
//! never padded. Highlights are capped per entry, independently of how many
//! entries the section has. The limit table is part of the output contract:
//! changing a number changes the rendered bytes.

use serde::Serialize;

use crate::content::defaults::DefaultedContent;
use crate::layout::templates::TemplateKind;
use crate::models::resume::{Certification, Experience, Project};

/// Maximum item counts for one template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionLimits {
    /// Highlights per experience (and project) entry.
    pub highlights: usize,
    pub technical: usize,
    pub soft: usize,
    pub languages: usize,
    pub projects: usize,
    pub certifications: usize,
}

impl SectionLimits {
    pub const fn for_template(kind: TemplateKind) -> Self {
        match kind {
            TemplateKind::Modern => SectionLimits {
                highlights: 4,
                technical: 8,
                soft: 6,
                languages: 4,
                projects: 3,
                certifications: 4,
            },
            TemplateKind::Minimal => SectionLimits {
                highlights: 3,
                technical: 8,
                soft: 6,
                languages: 4,
                projects: 2,
                certifications: 3,
            },
            TemplateKind::Executive => SectionLimits {
                highlights: 4,
                technical: 6,
                soft: 6,
                languages: 4,
                projects: 2,
                certifications: 4,
            },
            TemplateKind::Creative => SectionLimits {
                highlights: 3,
                technical: 4,
                soft: 3,
                languages: 3,
                projects: 2,
                certifications: 2,
            },
            TemplateKind::Default => SectionLimits {
                highlights: 3,
                technical: 8,
                soft: 5,
                languages: 5,
                projects: 2,
                certifications: 2,
            },
        }
    }
}

/// Capped sections handed to a builder alongside the defaulted content.
/// Education is never capped and is read from the defaulted content directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TruncatedSections {
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    pub technical: Vec<Option<String>>,
    pub soft: Vec<Option<String>>,
    pub languages: Vec<Option<String>>,
}

/// Keeps the first `limit` items. Idempotent for a fixed limit.
pub fn truncate<T: Clone>(items: &[T], limit: usize) -> Vec<T> {
    items.iter().take(limit).cloned().collect()
}

pub fn truncate_sections(content: &DefaultedContent, kind: TemplateKind) -> TruncatedSections {
    let limits = SectionLimits::for_template(kind);

    let experience = content
        .experience
        .iter()
        .map(|exp| Experience {
            highlights: exp
                .highlights
                .as_ref()
                .map(|h| truncate(h, limits.highlights)),
            ..exp.clone()
        })
        .collect();

    let projects = truncate(&content.projects, limits.projects)
        .into_iter()
        .map(|project| Project {
            highlights: project
                .highlights
                .as_ref()
                .map(|h| truncate(h, limits.highlights)),
            ..project
        })
        .collect();

    TruncatedSections {
        experience,
        projects,
        certifications: truncate(&content.certifications, limits.certifications),
        technical: truncate(&content.skills.technical, limits.technical),
        soft: truncate(&content.skills.soft, limits.soft),
        languages: truncate(&content.skills.languages, limits.languages),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
