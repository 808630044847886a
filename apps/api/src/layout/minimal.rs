//! Minimal: single column, black on white, no bands or tables.

use crate::content::dates::normalize;
use crate::content::{DefaultedContent, TruncatedSections};
use crate::layout::document::{compact, Column, Columns, Document, Node, PageGeometry, Stack, Text};
use crate::layout::entries::{
    education_dates, experience_dates, has_text, highlights, or, skill_line, technologies_line,
};
use crate::layout::style::{Alignment, Color, Spacing, Style, StyleSheet};
use crate::models::resume::{Certification, Education, Experience, Project};

const INK: Color = Color::hex(0x333333);
const GREY: Color = Color::hex(0x666666);

pub fn build(content: &DefaultedContent, sections: &TruncatedSections) -> Document {
    let nodes = compact([
        Some(header(content)),
        Some(section("SUMMARY", vec![Text::line(&content.basic.bio, "bodyText").into()])),
        (!sections.experience.is_empty()).then(|| {
            section("EXPERIENCE", sections.experience.iter().map(experience_entry).collect())
        }),
        (!content.education.is_empty())
            .then(|| section("EDUCATION", content.education.iter().map(education_entry).collect())),
        Some(skills(sections)),
        (!sections.projects.is_empty())
            .then(|| section("PROJECTS", sections.projects.iter().map(project_entry).collect())),
        (!sections.certifications.is_empty()).then(|| {
            Stack::new(
                std::iter::once(Node::from(Text::line("CERTIFICATIONS", "sectionHeader")))
                    .chain(sections.certifications.iter().map(certification_entry))
                    .collect(),
            )
            .into()
        }),
    ]);

    Document::new(
        PageGeometry::a4(Spacing::uniform(50.0)),
        nodes,
        styles(),
        Style::new().size(10.0).color(INK),
    )
}

fn header(content: &DefaultedContent) -> Node {
    let basic = &content.basic;
    let contact = [basic.email.as_str(), basic.phone.as_str(), basic.location.as_str()].join(" | ");

    Stack::new(compact([
        Some(Text::line(&basic.name, "name").into()),
        Some(Text::line(content.headline.as_deref().unwrap_or("Professional"), "title").into()),
        Some(Text::line(contact, "contact").into()),
        basic
            .website_provided
            .then(|| Text::line(&basic.website, "website").into()),
    ]))
    .margin(Spacing::new(0.0, 0.0, 0.0, 20.0))
    .into()
}

fn section(title: &str, body: Vec<Node>) -> Node {
    let mut children = vec![Text::line(title, "sectionHeader").into()];
    children.extend(body);
    Stack::new(children)
        .margin(Spacing::new(0.0, 0.0, 0.0, 15.0))
        .into()
}

/// A bold left line with a right-aligned date.
fn dated_row(title: String, date: String, bottom: f32) -> Node {
    Columns::new(vec![
        Column::star(Text::line(title, "jobTitle")),
        Column::auto(Text::line(date, "dateText").align(Alignment::Right)),
    ])
    .margin(Spacing::new(0.0, 0.0, 0.0, bottom))
    .into()
}

fn experience_entry(exp: &Experience) -> Node {
    let title = format!("{} - {}", or(&exp.position, "Position"), or(&exp.company, "Company"));
    Stack::new(compact([
        Some(dated_row(title, experience_dates(exp), 0.0)),
        has_text(&exp.location).then(|| Text::line(or(&exp.location, ""), "locationText").into()),
        has_text(&exp.description).then(|| {
            Text::line(or(&exp.description, ""), "bodyText")
                .margin(Spacing::new(0.0, 3.0, 0.0, 0.0))
                .into()
        }),
        highlights(&exp.highlights, "Achievement").map(|items| Text::bullets(items, "bulletList").into()),
    ]))
    .margin(Spacing::new(0.0, 0.0, 0.0, 10.0))
    .into()
}

fn education_entry(edu: &Education) -> Node {
    let title = format!("{} - {}", or(&edu.degree, "Degree"), or(&edu.institution, "Institution"));
    dated_row(title, education_dates(edu), 5.0)
}

fn skills(sections: &TruncatedSections) -> Node {
    let line = |label: &str, items: &[Option<String>], bottom: f32| -> Node {
        Text::line(format!("{label}: {}", skill_line(items, ", ")), "bodyText")
            .margin(Spacing::new(0.0, 0.0, 0.0, bottom))
            .into()
    };
    section(
        "SKILLS",
        vec![
            line("Technical", &sections.technical, 3.0),
            line("Soft Skills", &sections.soft, 3.0),
            line("Languages", &sections.languages, 0.0),
        ],
    )
}

fn project_entry(project: &Project) -> Node {
    Stack::new(compact([
        Some(Text::line(or(&project.name, "Project Name"), "jobTitle").into()),
        Some(
            Text::line(or(&project.description, "Project description"), "bodyText")
                .margin(Spacing::new(0.0, 2.0, 0.0, 0.0))
                .into(),
        ),
        technologies_line(project).map(|line| Text::line(line, "techText").into()),
        highlights(&project.highlights, "Achievement").map(|items| Text::bullets(items, "bulletList").into()),
    ]))
    .margin(Spacing::new(0.0, 0.0, 0.0, 8.0))
    .into()
}

fn certification_entry(cert: &Certification) -> Node {
    let title = format!("{} - {}", or(&cert.name, "Certification"), or(&cert.issuer, "Issuer"));
    dated_row(title, normalize(cert.date.as_ref()), 3.0)
}

fn styles() -> StyleSheet {
    StyleSheet::new()
        .with("name", Style::new().size(20.0).bold().color(Color::BLACK))
        .with(
            "title",
            Style::new()
                .size(12.0)
                .color(GREY)
                .margin(Spacing::new(0.0, 3.0, 0.0, 5.0)),
        )
        .with("contact", Style::new().size(10.0).color(INK))
        .with(
            "website",
            Style::new()
                .size(10.0)
                .color(Color::hex(0x0066CC))
                .margin(Spacing::new(0.0, 3.0, 0.0, 0.0)),
        )
        .with(
            "sectionHeader",
            Style::new().size(12.0).bold().color(Color::BLACK).margin(Spacing::new(0.0, 0.0, 0.0, 5.0)),
        )
        .with("jobTitle", Style::new().size(11.0).bold().color(Color::BLACK))
        .with("bodyText", Style::new().size(10.0).color(INK).line_height(1.3))
        .with("dateText", Style::new().size(10.0).color(GREY))
        .with("locationText", Style::new().size(9.0).color(GREY).italics())
        .with(
            "bulletList",
            Style::new().size(10.0).color(INK).margin(Spacing::new(10.0, 3.0, 0.0, 0.0)),
        )
        .with(
            "techText",
            Style::new().size(9.0).color(GREY).italics().margin(Spacing::new(0.0, 2.0, 0.0, 0.0)),
        )
}
