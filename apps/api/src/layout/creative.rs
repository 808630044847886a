//! Creative: a colored sidebar on every page and bordered content cards.

use crate::content::dates::normalize;
use crate::content::{items_or, DefaultedContent, TruncatedSections, NOT_PROVIDED};
use crate::layout::document::{
    compact, Cell, ColumnWidth, Divider, Document, Node, PageFill, PageGeometry, Stack, Table, Text,
    A4_HEIGHT, A4_WIDTH,
};
use crate::layout::entries::{education_dates, experience_dates, has_text, highlights, or};
use crate::layout::style::{Alignment, Color, Spacing, Style, StyleSheet};
use crate::models::resume::{Certification, Education, Experience, Project};

const SIDEBAR: Color = Color::hex(0x5D80E6);
const NAVY: Color = Color::hex(0x1E3A8A);
const BLUE: Color = Color::hex(0x3B82F6);
const SLATE: Color = Color::hex(0x4B5563);
const INK: Color = Color::hex(0x1F2937);
const PALE: Color = Color::hex(0xE2E8F0);

const SIDEBAR_WIDTH: f32 = 150.0;
const PAGE_MARGINS: Spacing = Spacing::new(0.0, 0.0, 30.0, 40.0);
const HEADER_MARGINS: Spacing = Spacing::new(15.0, 20.0, 20.0, 15.0);
/// Spans the main column between the header margins.
const HEADER_RULE: f32 =
    A4_WIDTH - PAGE_MARGINS.right - SIDEBAR_WIDTH - HEADER_MARGINS.left - HEADER_MARGINS.right;

pub fn build(content: &DefaultedContent, sections: &TruncatedSections) -> Document {
    let grid = Table::new(
        vec![ColumnWidth::Fixed(SIDEBAR_WIDTH), ColumnWidth::Star],
        vec![vec![
            Cell::new(sidebar(content, sections)),
            Cell::new(main_column(content, sections)),
        ]],
    );

    Document::new(
        PageGeometry::a4(PAGE_MARGINS),
        vec![grid.into()],
        styles(),
        Style::new().size(10.0).color(INK),
    )
    .with_page_fill(PageFill {
        x: 0.0,
        y: 0.0,
        width: SIDEBAR_WIDTH,
        height: A4_HEIGHT,
        color: SIDEBAR,
    })
}

fn sidebar(content: &DefaultedContent, sections: &TruncatedSections) -> Node {
    let list = |items: &[Option<String>]| -> Node {
        Text::bullets(items_or(items, NOT_PROVIDED), "sidebarBulletPoints").into()
    };

    let mut children = vec![
        Text::line("Profile", "sidebarHeader").into(),
        Text::line(&content.basic.bio, "sidebarBody").into(),
        Text::line("Technical Skills", "sidebarHeader").into(),
        list(&sections.technical),
        Text::line("Soft Skills", "sidebarHeader").into(),
        list(&sections.soft),
        Text::line("Languages", "sidebarHeader").into(),
        list(&sections.languages),
    ];
    if !sections.certifications.is_empty() {
        children.push(certifications(&sections.certifications));
    }
    Stack::new(children).style("sidebar").into()
}

fn certifications(entries: &[Certification]) -> Node {
    let items = entries
        .iter()
        .map(|cert| format!("{} ({})", or(&cert.name, NOT_PROVIDED), normalize(cert.date.as_ref())))
        .collect();
    Stack::new(vec![
        Text::line("Certifications", "sidebarHeader").into(),
        Text::bullets(items, "sidebarBulletPoints").into(),
    ])
    .into()
}

/// The contact values that are not placeholders, or a single notice when
/// none are left.
fn contact_line(content: &DefaultedContent) -> String {
    let basic = &content.basic;
    let parts: Vec<&str> = [&basic.email, &basic.phone, &basic.location, &basic.website]
        .into_iter()
        .map(String::as_str)
        .filter(|value| *value != NOT_PROVIDED)
        .collect();
    if parts.is_empty() {
        "Contact Information Not Provided".to_string()
    } else {
        parts.join(" | ")
    }
}

fn main_column(content: &DefaultedContent, sections: &TruncatedSections) -> Node {
    let header = Stack::new(vec![
        Text::line(&content.basic.name, "header").into(),
        Text::line(contact_line(content), "contactInfo").into(),
        Divider::new(HEADER_RULE, 1.0, BLUE).into(),
    ])
    .margin(HEADER_MARGINS);

    Stack::new(compact([
        Some(header.into()),
        (!sections.experience.is_empty())
            .then(|| card("Work Experience", sections.experience.iter().flat_map(experience_entry).collect())),
        (!content.education.is_empty())
            .then(|| card("Education", content.education.iter().flat_map(education_entry).collect())),
        (!sections.projects.is_empty())
            .then(|| card("Projects", sections.projects.iter().flat_map(project_entry).collect())),
    ]))
    .into()
}

/// A white, bordered one-cell table holding a titled section.
fn card(title: &str, body: Vec<Node>) -> Node {
    let mut children = vec![Text::line(title, "sectionHeader").into()];
    children.extend(body);
    Table::card(
        Cell::new(Stack::new(children))
            .fill(Color::WHITE)
            .padding(Spacing::uniform(10.0)),
    )
    .borders(0.5, NAVY)
    .margin(Spacing::new(10.0, 10.0, 0.0, 10.0))
    .into()
}

fn experience_entry(exp: &Experience) -> Vec<Node> {
    let title = format!(
        "{} at {}, {}",
        or(&exp.position, NOT_PROVIDED),
        or(&exp.company, NOT_PROVIDED),
        or(&exp.location, NOT_PROVIDED)
    );
    compact([
        Some(Text::line(title, "subheader").into()),
        Some(Text::line(experience_dates(exp), "date").into()),
        Some(Text::line(or(&exp.description, NOT_PROVIDED), "body").into()),
        highlights(&exp.highlights, NOT_PROVIDED).map(|items| Text::bullets(items, "bulletPoints").into()),
    ])
}

fn education_entry(edu: &Education) -> Vec<Node> {
    let title = format!(
        "{} in {}, {}",
        or(&edu.degree, NOT_PROVIDED),
        or(&edu.field, NOT_PROVIDED),
        or(&edu.institution, NOT_PROVIDED)
    );
    compact([
        Some(Text::line(title, "subheader").into()),
        Some(Text::line(education_dates(edu), "date").into()),
        has_text(&edu.description).then(|| Text::line(or(&edu.description, ""), "body").into()),
    ])
}

fn project_entry(project: &Project) -> Vec<Node> {
    let technologies = project
        .technologies
        .as_deref()
        .and_then(|techs| crate::content::join_provided(techs, ", "))
        .unwrap_or_else(|| NOT_PROVIDED.to_string());
    compact([
        Some(Text::line(or(&project.name, NOT_PROVIDED), "subheader").into()),
        Some(Text::line(or(&project.description, NOT_PROVIDED), "body").into()),
        Some(Text::line(format!("Technologies: {technologies}"), "body").into()),
        highlights(&project.highlights, NOT_PROVIDED).map(|items| Text::bullets(items, "bulletPoints").into()),
    ])
}

fn styles() -> StyleSheet {
    StyleSheet::new()
        .with("sidebar", Style::new().color(Color::WHITE))
        .with(
            "header",
            Style::new()
                .size(24.0)
                .bold()
                .align(Alignment::Center)
                .color(NAVY)
                .margin(Spacing::new(0.0, 0.0, 0.0, 5.0)),
        )
        .with(
            "contactInfo",
            Style::new().size(9.0).align(Alignment::Center).color(SLATE).line_height(1.2),
        )
        .with(
            "sidebarHeader",
            Style::new()
                .size(14.0)
                .bold()
                .color(Color::WHITE)
                .margin(Spacing::new(15.0, 10.0, 5.0, 10.0)),
        )
        .with(
            "sidebarBody",
            Style::new()
                .size(10.0)
                .color(PALE)
                .line_height(1.3)
                .margin(Spacing::new(15.0, 10.0, 15.0, 10.0)),
        )
        .with(
            "sidebarBulletPoints",
            Style::new().size(10.0).color(PALE).margin(Spacing::new(25.0, 2.0, 0.0, 5.0)),
        )
        .with(
            "sectionHeader",
            Style::new()
                .size(14.0)
                .bold()
                .color(NAVY)
                .underline()
                .margin(Spacing::new(0.0, 5.0, 0.0, 10.0)),
        )
        .with(
            "subheader",
            Style::new().size(12.0).bold().color(NAVY).margin(Spacing::new(0.0, 5.0, 0.0, 3.0)),
        )
        .with("body", Style::new().size(10.0).line_height(1.5).color(INK))
        .with(
            "date",
            Style::new().size(9.0).italics().color(SLATE).margin(Spacing::new(0.0, 2.0, 0.0, 5.0)),
        )
        .with(
            "bulletPoints",
            Style::new().size(10.0).color(INK).margin(Spacing::new(10.0, 2.0, 0.0, 5.0)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{apply_defaults, truncate_sections};
    use crate::layout::templates::TemplateKind;
    use crate::models::resume::ResumeContent;
    use serde_json::json;

    fn build_from(value: serde_json::Value) -> Document {
        let content: ResumeContent = serde_json::from_value(value).unwrap();
        let defaulted = apply_defaults(&content, None);
        let sections = truncate_sections(&defaulted, TemplateKind::Creative);
        build(&defaulted, &sections)
    }

    #[test]
    fn test_sidebar_fill_on_every_page() {
        let doc = build_from(json!({}));
        assert_eq!(doc.page_fills.len(), 1);
        let fill = doc.page_fills[0];
        assert_eq!((fill.width, fill.height), (SIDEBAR_WIDTH, A4_HEIGHT));
        assert_eq!(fill.color, SIDEBAR);
    }

    #[test]
    fn test_grid_is_fixed_sidebar_plus_star() {
        let doc = build_from(json!({}));
        let Node::Table(grid) = &doc.content[0] else {
            panic!("expected sidebar grid");
        };
        assert_eq!(grid.widths, vec![ColumnWidth::Fixed(SIDEBAR_WIDTH), ColumnWidth::Star]);
        assert!(grid.borders.is_none());
    }

    #[test]
    fn test_header_rule_fits_main_column() {
        let doc = build_from(json!({}));
        let Node::Table(grid) = &doc.content[0] else {
            panic!("expected sidebar grid");
        };
        let Node::Stack(main) = &grid.rows[0][1].node else {
            panic!("expected main column stack");
        };
        let Node::Stack(header) = &main.children[0] else {
            panic!("expected header stack");
        };
        let Some(Node::Divider(rule)) = header.children.last() else {
            panic!("expected header rule");
        };

        let main_width = doc.page.content_width() - SIDEBAR_WIDTH;
        let available = main_width - header.margin.left - header.margin.right;
        assert!(rule.length <= available, "{} > {available}", rule.length);
        assert!((rule.length - available).abs() < 1e-3);
    }

    #[test]
    fn test_contact_line_drops_placeholders() {
        let doc = build_from(json!({ "basic": { "email": "ada@example.com", "location": "London" } }));
        assert!(doc.texts().contains(&"ada@example.com | London"));

        let doc = build_from(json!({}));
        assert!(doc.texts().contains(&"Contact Information Not Provided"));
    }

    #[test]
    fn test_cards_only_for_non_empty_sections() {
        let doc = build_from(json!({ "education": [{ "degree": "BSc", "field": "CS" }] }));
        let texts = doc.texts();
        assert!(texts.contains(&"Education"));
        assert!(!texts.contains(&"Work Experience"));
        assert!(!texts.contains(&"Projects"));
        assert!(texts.contains(&"BSc in CS, Not Provided"));
    }

    #[test]
    fn test_certifications_show_formatted_date() {
        let doc = build_from(json!({
            "certifications": [
                { "name": "CKA", "date": "2023-06-15" },
                { "name": "AWS" },
                { "name": "dropped" }
            ]
        }));
        let texts = doc.texts();
        assert!(texts.contains(&"CKA (15/06/2023)"));
        assert!(texts.contains(&"AWS (Not Provided)"));
        assert!(!texts.iter().any(|t| t.starts_with("dropped")));
    }
}
