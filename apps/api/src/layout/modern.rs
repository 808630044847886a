//! Modern: full-bleed navy header band, accent-ruled sections and a
//! two-column skills/education block.

use crate::content::dates::normalize;
use crate::content::{DefaultedContent, TruncatedSections};
use crate::layout::document::{
    compact, Background, Column, Columns, Divider, Document, Node, PageGeometry, Stack, Text,
};
use crate::layout::entries::{
    education_dates, experience_dates, has_text, highlights, or, skill_line, technologies_line,
};
use crate::layout::style::{Alignment, Color, Spacing, Style, StyleSheet};
use crate::models::resume::{Certification, Education, Experience, Project};

const NAVY: Color = Color::hex(0x2C3E50);
const ACCENT: Color = Color::hex(0x3498DB);
const BODY: Color = Color::hex(0x34495E);
const MUTED: Color = Color::hex(0x7F8C8D);

const HEADER_HEIGHT: f32 = 120.0;
const RULE_WIDE: f32 = 60.0;
const RULE_NARROW: f32 = 40.0;
const SKILL_SEPARATOR: &str = " • ";

pub fn build(content: &DefaultedContent, sections: &TruncatedSections) -> Document {
    let nodes = compact([
        Some(header(content)),
        Some(summary(content)),
        (!sections.experience.is_empty()).then(|| experience(&sections.experience)),
        Some(skills_and_education(&content.education, sections)),
        (!sections.projects.is_empty()).then(|| projects(&sections.projects)),
        (!sections.certifications.is_empty()).then(|| certifications(&sections.certifications)),
    ]);

    Document::new(
        PageGeometry::a4(Spacing::ZERO),
        nodes,
        styles(),
        Style::new().size(10.0).color(NAVY),
    )
}

fn header(content: &DefaultedContent) -> Node {
    let basic = &content.basic;
    let contact = Columns::new(vec![
        Column::star(Text::line(&basic.email, "headerContact")),
        Column::star(Text::line(&basic.phone, "headerContact").align(Alignment::Center)),
        Column::star(Text::line(&basic.location, "headerContact").align(Alignment::Right)),
    ]);

    Background {
        color: NAVY,
        height: HEADER_HEIGHT,
        padding: Spacing::new(40.0, 10.0, 40.0, 10.0),
        margin: Spacing::ZERO,
        children: compact([
            Some(Text::line(&basic.name, "headerName").margin(Spacing::new(0.0, 0.0, 0.0, 5.0)).into()),
            Some(
                Text::line(content.headline.as_deref().unwrap_or("Professional"), "headerTitle")
                    .margin(Spacing::new(0.0, 0.0, 0.0, 15.0))
                    .into(),
            ),
            Some(contact.into()),
            basic
                .website_provided
                .then(|| Text::line(&basic.website, "headerWebsite").margin(Spacing::new(0.0, 5.0, 0.0, 0.0)).into()),
        ]),
    }
    .into()
}

fn rule(length: f32, bottom: f32) -> Node {
    Divider::new(length, 3.0, ACCENT)
        .margin(Spacing::new(0.0, 2.0, 0.0, bottom))
        .into()
}

/// Heading, accent rule and body of one full-width section.
fn section(title: &str, rule_bottom: f32, body: Vec<Node>, margin: Spacing) -> Node {
    let mut children = vec![Text::line(title, "modernSectionHeader").into(), rule(RULE_WIDE, rule_bottom)];
    children.extend(body);
    Stack::new(children).margin(margin).into()
}

fn summary(content: &DefaultedContent) -> Node {
    section(
        "PROFESSIONAL SUMMARY",
        8.0,
        vec![Text::line(&content.basic.bio, "summaryText").into()],
        Spacing::new(40.0, 25.0, 40.0, 20.0),
    )
}

fn experience(entries: &[Experience]) -> Node {
    let last = entries.len().saturating_sub(1);
    let body = entries
        .iter()
        .enumerate()
        .map(|(i, exp)| experience_entry(exp, if i < last { 15.0 } else { 0.0 }))
        .collect();
    section("WORK EXPERIENCE", 12.0, body, Spacing::new(40.0, 0.0, 40.0, 20.0))
}

fn experience_entry(exp: &Experience, trailing: f32) -> Node {
    let heading = Columns::new(vec![
        Column::star(Stack::new(vec![
            Text::line(or(&exp.position, "Position Title"), "jobTitle").into(),
            Text::line(or(&exp.company, "Company Name"), "companyName").into(),
        ])),
        Column::auto(Stack::new(vec![
            Text::line(experience_dates(exp), "dateRange").align(Alignment::Right).into(),
            Text::line(or(&exp.location, "Location"), "jobLocation").align(Alignment::Right).into(),
        ])),
    ]);

    Stack::new(compact([
        Some(heading.into()),
        has_text(&exp.description).then(|| {
            Text::line(or(&exp.description, ""), "jobDescription")
                .margin(Spacing::new(0.0, 8.0, 0.0, 5.0))
                .into()
        }),
        highlights(&exp.highlights, "Achievement").map(|items| {
            Text::bullets(items, "achievementsList")
                .margin(Spacing::new(15.0, 5.0, 0.0, trailing))
                .into()
        }),
    ]))
    .into()
}

fn skills_and_education(education: &[Education], sections: &TruncatedSections) -> Node {
    let skill_group = |label: &str, items: &[Option<String>], bottom: f32| -> Node {
        Stack::new(vec![
            Text::line(label, "skillCategory").into(),
            Text::line(skill_line(items, SKILL_SEPARATOR), "skillsList").into(),
        ])
        .margin(Spacing::new(0.0, 0.0, 0.0, bottom))
        .into()
    };

    let skills = Stack::new(vec![
        Text::line("SKILLS", "modernSectionHeader").into(),
        rule(RULE_NARROW, 8.0),
        skill_group("Technical", &sections.technical, 8.0),
        skill_group("Soft Skills", &sections.soft, 8.0),
        skill_group("Languages", &sections.languages, 0.0),
    ]);

    let education_column = (!education.is_empty()).then(|| {
        let mut children = vec![Text::line("EDUCATION", "modernSectionHeader").into(), rule(RULE_NARROW, 8.0)];
        children.extend(education.iter().map(education_entry));
        Column::percent(48.0, Stack::new(children))
    });

    let columns = std::iter::once(Column::percent(48.0, skills))
        .chain(education_column)
        .collect();

    Columns::new(columns)
        .gap(20.0)
        .margin(Spacing::new(40.0, 0.0, 40.0, 20.0))
        .into()
}

fn education_entry(edu: &Education) -> Node {
    Stack::new(vec![
        Text::line(
            format!("{} in {}", or(&edu.degree, "Degree"), or(&edu.field, "Field")),
            "degreeTitle",
        )
        .into(),
        Text::line(or(&edu.institution, "Institution Name"), "institutionName").into(),
        Text::line(education_dates(edu), "educationDate").into(),
    ])
    .margin(Spacing::new(0.0, 0.0, 0.0, 10.0))
    .into()
}

fn projects(entries: &[Project]) -> Node {
    let body = entries
        .iter()
        .map(|project| {
            Stack::new(compact([
                Some(Text::line(or(&project.name, "Project Name"), "projectTitle").into()),
                Some(
                    Text::line(
                        or(&project.description, "Project description and key achievements."),
                        "projectDescription",
                    )
                    .into(),
                ),
                technologies_line(project).map(|line| Text::line(line, "projectTech").into()),
                highlights(&project.highlights, "Achievement")
                    .map(|items| Text::bullets(items, "achievementsList").into()),
            ]))
            .margin(Spacing::new(0.0, 0.0, 0.0, 12.0))
            .into()
        })
        .collect();
    section("PROJECTS", 8.0, body, Spacing::new(40.0, 0.0, 40.0, 20.0))
}

fn certifications(entries: &[Certification]) -> Node {
    let columns = entries
        .iter()
        .map(|cert| {
            Column::star(Stack::new(vec![
                Text::line(or(&cert.name, "Certification Name"), "certTitle").into(),
                Text::line(or(&cert.issuer, "Issuing Organization"), "certIssuer").into(),
                Text::line(normalize(cert.date.as_ref()), "certDate").into(),
            ]))
        })
        .collect();
    section(
        "CERTIFICATIONS",
        8.0,
        vec![Columns::new(columns).gap(15.0).into()],
        Spacing::new(40.0, 0.0, 40.0, 30.0),
    )
}

fn styles() -> StyleSheet {
    StyleSheet::new()
        .with("headerName", Style::new().size(28.0).bold().color(Color::WHITE).align(Alignment::Center))
        .with("headerTitle", Style::new().size(16.0).color(Color::hex(0xECF0F1)).align(Alignment::Center))
        .with("headerContact", Style::new().size(11.0).color(Color::hex(0xBDC3C7)))
        .with(
            "headerWebsite",
            Style::new().size(11.0).color(ACCENT).align(Alignment::Center).underline(),
        )
        .with("modernSectionHeader", Style::new().size(13.0).bold().color(NAVY))
        .with(
            "summaryText",
            Style::new().size(11.0).line_height(1.5).color(BODY).align(Alignment::Justify),
        )
        .with("jobTitle", Style::new().size(13.0).bold().color(NAVY))
        .with(
            "companyName",
            Style::new().size(11.0).color(ACCENT).italics().margin(Spacing::new(0.0, 2.0, 0.0, 0.0)),
        )
        .with("dateRange", Style::new().size(10.0).color(MUTED).bold())
        .with(
            "jobLocation",
            Style::new().size(10.0).color(Color::hex(0x95A5A6)).margin(Spacing::new(0.0, 2.0, 0.0, 0.0)),
        )
        .with(
            "jobDescription",
            Style::new().size(10.0).line_height(1.4).color(BODY).align(Alignment::Justify),
        )
        .with(
            "achievementsList",
            Style::new().size(10.0).line_height(1.3).color(NAVY).margin(Spacing::new(15.0, 0.0, 0.0, 0.0)),
        )
        .with("skillCategory", Style::new().size(11.0).bold().color(ACCENT))
        .with(
            "skillsList",
            Style::new().size(10.0).line_height(1.3).color(BODY).margin(Spacing::new(0.0, 3.0, 0.0, 0.0)),
        )
        .with("degreeTitle", Style::new().size(11.0).bold().color(NAVY))
        .with(
            "institutionName",
            Style::new().size(10.0).color(ACCENT).italics().margin(Spacing::new(0.0, 2.0, 0.0, 0.0)),
        )
        .with(
            "educationDate",
            Style::new().size(9.0).color(MUTED).margin(Spacing::new(0.0, 2.0, 0.0, 0.0)),
        )
        .with("projectTitle", Style::new().size(11.0).bold().color(NAVY))
        .with(
            "projectDescription",
            Style::new().size(10.0).line_height(1.3).color(BODY).margin(Spacing::new(0.0, 3.0, 0.0, 2.0)),
        )
        .with("projectTech", Style::new().size(9.0).color(ACCENT).italics())
        .with("certTitle", Style::new().size(10.0).bold().color(NAVY))
        .with(
            "certIssuer",
            Style::new().size(9.0).color(ACCENT).margin(Spacing::new(0.0, 2.0, 0.0, 0.0)),
        )
        .with(
            "certDate",
            Style::new().size(9.0).color(MUTED).margin(Spacing::new(0.0, 1.0, 0.0, 0.0)),
        )
}
