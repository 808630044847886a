//! The plain layout used for the `default` template and any unknown name.

use crate::content::dates::normalize;
use crate::content::{items_or, DefaultedContent, TruncatedSections, NOT_PROVIDED};
use crate::layout::document::{compact, Column, Columns, Document, Node, PageGeometry, Text};
use crate::layout::entries::{
    education_dates, experience_dates, has_text, highlights, or, technologies_line,
};
use crate::layout::style::{Alignment, Spacing, Style, StyleSheet};
use crate::models::resume::{Certification, Education, Experience, Project};

pub fn build(content: &DefaultedContent, sections: &TruncatedSections) -> Document {
    let basic = &content.basic;
    let contact = [
        basic.email.as_str(),
        basic.phone.as_str(),
        basic.location.as_str(),
        basic.website.as_str(),
    ]
    .join(" | ");

    let mut nodes = compact([
        Some(Text::line(&basic.name, "header").into()),
        content.headline.as_deref().map(|headline| Text::line(headline, "header").into()),
        Some(
            Text::line(contact, "contactInfo")
                .margin(Spacing::new(0.0, 5.0, 0.0, 10.0))
                .into(),
        ),
        Some(Text::line("Professional Summary", "sectionHeader").into()),
        Some(
            Text::line(&basic.bio, "body")
                .margin(Spacing::new(0.0, 0.0, 0.0, 10.0))
                .into(),
        ),
    ]);

    section(&mut nodes, "Work Experience", &sections.experience, experience_entry);
    section(&mut nodes, "Education", &content.education, education_entry);

    nodes.push(Text::line("Skills", "sectionHeader").into());
    nodes.push(skill_row("Technical Skills", &sections.technical));
    nodes.push(skill_row("Soft Skills", &sections.soft));
    nodes.push(skill_row("Languages", &sections.languages));

    section(&mut nodes, "Projects", &sections.projects, project_entry);
    section(&mut nodes, "Certifications", &sections.certifications, certification_entry);

    Document::new(
        PageGeometry::a4(Spacing::new(40.0, 60.0, 40.0, 60.0)),
        nodes,
        styles(),
        Style::new().size(10.0),
    )
}

/// Appends a heading and the flattened entries, or nothing for an empty list.
fn section<T>(nodes: &mut Vec<Node>, title: &str, entries: &[T], entry: fn(&T) -> Vec<Node>) {
    if entries.is_empty() {
        return;
    }
    nodes.push(Text::line(title, "sectionHeader").into());
    nodes.extend(entries.iter().flat_map(entry));
}

fn skill_row(label: &str, items: &[Option<String>]) -> Node {
    Columns::new(vec![
        Column::star(Text::line(label, "subheader")),
        Column::star(Text::bullets(items_or(items, NOT_PROVIDED), "bulletPoints")),
    ])
    .gap(10.0)
    .into()
}

fn experience_entry(exp: &Experience) -> Vec<Node> {
    let title = format!(
        "{} at {}, {}",
        or(&exp.position, "Position Title"),
        or(&exp.company, "Company Name"),
        or(&exp.location, "Location")
    );
    compact([
        Some(Text::line(title, "subheader").into()),
        Some(Text::line(experience_dates(exp), "date").into()),
        has_text(&exp.description).then(|| Text::line(or(&exp.description, ""), "body").into()),
        highlights(&exp.highlights, "Achievement").map(|items| Text::bullets(items, "bulletPoints").into()),
    ])
}

fn education_entry(edu: &Education) -> Vec<Node> {
    let title = format!(
        "{} in {}, {}",
        or(&edu.degree, "Degree"),
        or(&edu.field, "Field"),
        or(&edu.institution, "Institution Name")
    );
    compact([
        Some(Text::line(title, "subheader").into()),
        Some(Text::line(education_dates(edu), "date").into()),
        has_text(&edu.description).then(|| Text::line(or(&edu.description, ""), "body").into()),
    ])
}

fn project_entry(project: &Project) -> Vec<Node> {
    compact([
        Some(Text::line(or(&project.name, "Project Name"), "subheader").into()),
        Some(Text::line(or(&project.description, NOT_PROVIDED), "body").into()),
        technologies_line(project).map(|line| Text::line(line, "body").into()),
        highlights(&project.highlights, "Achievement").map(|items| Text::bullets(items, "bulletPoints").into()),
    ])
}

fn certification_entry(cert: &Certification) -> Vec<Node> {
    vec![
        Text::line(
            format!("{} by {}", or(&cert.name, "Certification"), or(&cert.issuer, "Issuer")),
            "subheader",
        )
        .into(),
        Text::line(normalize(cert.date.as_ref()), "date").into(),
    ]
}

fn styles() -> StyleSheet {
    StyleSheet::new()
        .with("header", Style::new().size(22.0).bold().align(Alignment::Center))
        .with("contactInfo", Style::new().size(10.0).align(Alignment::Center))
        .with(
            "sectionHeader",
            Style::new().size(14.0).bold().margin(Spacing::new(0.0, 10.0, 0.0, 5.0)),
        )
        .with(
            "subheader",
            Style::new().size(12.0).bold().margin(Spacing::new(0.0, 5.0, 0.0, 2.0)),
        )
        .with("body", Style::new().size(10.0).margin(Spacing::new(0.0, 0.0, 0.0, 5.0)))
        .with(
            "date",
            Style::new().size(10.0).italics().margin(Spacing::new(0.0, 0.0, 0.0, 5.0)),
        )
        .with(
            "bulletPoints",
            Style::new().size(10.0).margin(Spacing::new(10.0, 0.0, 0.0, 5.0)),
        )
}
