//! Executive: centered upper-case header, brown rules, boxed experience
//! entries and a two-column supporting area.

use crate::content::dates::normalize;
use crate::content::{provided, DefaultedContent, TruncatedSections};
use crate::layout::document::{
    compact, Cell, Column, Columns, Divider, Document, Node, PageGeometry, Stack, Table, Text,
};
use crate::layout::entries::{
    education_dates, experience_dates, has_text, highlights, or, skill_line,
};
use crate::layout::style::{Alignment, Color, Spacing, Style, StyleSheet};
use crate::models::resume::{Certification, Education, Experience, Project};

const BROWN: Color = Color::hex(0x8B4513);
const CHARCOAL: Color = Color::hex(0x1A1A1A);
const INK: Color = Color::hex(0x333333);
const GREY: Color = Color::hex(0x666666);

/// Full content width at 60 pt side margins.
const SEPARATOR_LENGTH: f32 = 475.0;
const COMPETENCY_SEPARATOR: &str = " • ";

pub fn build(content: &DefaultedContent, sections: &TruncatedSections) -> Document {
    let nodes = compact([
        Some(header(content)),
        Some(summary(content)),
        (!sections.experience.is_empty()).then(|| experience(&sections.experience)),
        supporting(content, sections),
    ]);

    Document::new(
        PageGeometry::a4(Spacing::new(60.0, 50.0, 60.0, 50.0)),
        nodes,
        styles(),
        Style::new().size(10.0).color(INK),
    )
}

fn header(content: &DefaultedContent) -> Node {
    let basic = &content.basic;
    let contact = Columns::new(vec![
        Column::star(Text::line(&basic.email, "executiveContact")),
        Column::star(Text::line(&basic.phone, "executiveContact").align(Alignment::Center)),
        Column::star(Text::line(&basic.location, "executiveContact").align(Alignment::Right)),
    ]);

    Stack::new(compact([
        Some(Text::line(basic.name.to_uppercase(), "executiveName").into()),
        Some(
            Text::line(content.headline.as_deref().unwrap_or("Senior Executive"), "executiveTitle")
                .into(),
        ),
        Some(
            Divider::new(SEPARATOR_LENGTH, 1.0, BROWN)
                .margin(Spacing::new(0.0, 8.0, 0.0, 8.0))
                .into(),
        ),
        Some(contact.into()),
        basic.website_provided.then(|| {
            Text::line(&basic.website, "executiveWebsite")
                .align(Alignment::Center)
                .margin(Spacing::new(0.0, 5.0, 0.0, 0.0))
                .into()
        }),
    ]))
    .margin(Spacing::new(0.0, 0.0, 0.0, 25.0))
    .into()
}

/// Section heading followed by a short brown rule.
fn heading(title: &str, rule_length: f32, rule_bottom: f32) -> [Node; 2] {
    [
        Text::line(title, "executiveSectionHeader").into(),
        Divider::new(rule_length, 2.0, BROWN)
            .margin(Spacing::new(0.0, 3.0, 0.0, rule_bottom))
            .into(),
    ]
}

fn section(title: &str, rule_length: f32, rule_bottom: f32, body: Vec<Node>, bottom: f32) -> Node {
    let mut children = Vec::from(heading(title, rule_length, rule_bottom));
    children.extend(body);
    Stack::new(children)
        .margin(Spacing::new(0.0, 0.0, 0.0, bottom))
        .into()
}

fn summary(content: &DefaultedContent) -> Node {
    section(
        "EXECUTIVE SUMMARY",
        40.0,
        8.0,
        vec![Text::line(&content.basic.bio, "executiveSummary").into()],
        20.0,
    )
}

fn experience(entries: &[Experience]) -> Node {
    let last = entries.len().saturating_sub(1);
    let body = entries
        .iter()
        .enumerate()
        .map(|(i, exp)| experience_box(exp, if i < last { 10.0 } else { 0.0 }))
        .collect();
    section("PROFESSIONAL EXPERIENCE", 40.0, 12.0, body, 20.0)
}

fn experience_box(exp: &Experience, trailing: f32) -> Node {
    let position = provided(exp.position.as_deref())
        .map(str::to_uppercase)
        .unwrap_or_else(|| "SENIOR POSITION".to_string());

    let heading = Columns::new(vec![
        Column::star(Stack::new(vec![
            Text::line(position, "executivePosition").into(),
            Text::line(or(&exp.company, "Company Name"), "executiveCompany").into(),
        ])),
        Column::auto(Stack::new(compact([
            Some(Text::line(experience_dates(exp), "executiveDate").align(Alignment::Right).into()),
            has_text(&exp.location).then(|| {
                Text::line(or(&exp.location, ""), "executiveLocation")
                    .align(Alignment::Right)
                    .into()
            }),
        ]))),
    ]);

    let body = Stack::new(compact([
        Some(heading.into()),
        has_text(&exp.description).then(|| {
            Text::line(or(&exp.description, ""), "executiveDescription")
                .margin(Spacing::new(0.0, 6.0, 0.0, 4.0))
                .into()
        }),
        highlights(&exp.highlights, "Strategic achievement").map(|items| {
            Stack::new(vec![
                Text::line("Key Achievements:", "achievementHeader").into(),
                Text::bullets(items, "executiveAchievements").into(),
            ])
            .margin(Spacing::new(0.0, 3.0, 0.0, 0.0))
            .into()
        }),
    ]));

    Table::card(Cell::new(body).padding(Spacing::uniform(8.0)))
        .borders(0.5, BROWN)
        .margin(Spacing::new(0.0, 0.0, 0.0, trailing))
        .into()
}

/// Education and certifications on the left, competencies and projects on
/// the right. A side with nothing to show is left out.
fn supporting(content: &DefaultedContent, sections: &TruncatedSections) -> Option<Node> {
    let left = compact([
        (!content.education.is_empty()).then(|| {
            section(
                "EDUCATION",
                30.0,
                8.0,
                content.education.iter().map(education_entry).collect(),
                15.0,
            )
        }),
        (!sections.certifications.is_empty()).then(|| {
            section(
                "CERTIFICATIONS",
                30.0,
                8.0,
                sections.certifications.iter().map(certification_entry).collect(),
                0.0,
            )
        }),
    ]);

    let right = compact([
        Some(competencies(sections)),
        (!sections.projects.is_empty()).then(|| {
            section(
                "STRATEGIC PROJECTS",
                30.0,
                8.0,
                sections.projects.iter().map(project_entry).collect(),
                0.0,
            )
        }),
    ]);

    let columns: Vec<Column> = [left, right]
        .into_iter()
        .filter(|side| !side.is_empty())
        .map(|side| Column::percent(45.0, Stack::new(side)))
        .collect();

    (!columns.is_empty()).then(|| Columns::new(columns).gap(30.0).into())
}

fn competencies(sections: &TruncatedSections) -> Node {
    let group = |label: &str, items: &[Option<String>], bottom: f32| -> Node {
        Stack::new(vec![
            Text::line(label, "competencyCategory").into(),
            Text::line(skill_line(items, COMPETENCY_SEPARATOR), "competencyList").into(),
        ])
        .margin(Spacing::new(0.0, 0.0, 0.0, bottom))
        .into()
    };
    section(
        "CORE COMPETENCIES",
        30.0,
        8.0,
        vec![
            group("Technical Leadership", &sections.technical, 6.0),
            group("Executive Skills", &sections.soft, 6.0),
            group("Languages", &sections.languages, 0.0),
        ],
        15.0,
    )
}

fn education_entry(edu: &Education) -> Node {
    Stack::new(vec![
        Text::line(or(&edu.degree, "Degree"), "executiveDegree").into(),
        Text::line(or(&edu.institution, "Institution"), "executiveInstitution").into(),
        Text::line(education_dates(edu), "executiveEducationDate").into(),
    ])
    .margin(Spacing::new(0.0, 0.0, 0.0, 8.0))
    .into()
}

fn certification_entry(cert: &Certification) -> Node {
    let details = format!(
        "{}{}{}",
        or(&cert.issuer, "Issuing Organization"),
        COMPETENCY_SEPARATOR,
        normalize(cert.date.as_ref())
    );
    Stack::new(vec![
        Text::line(or(&cert.name, "Professional Certification"), "executiveCertName").into(),
        Text::line(details, "executiveCertDetails").into(),
    ])
    .margin(Spacing::new(0.0, 0.0, 0.0, 6.0))
    .into()
}

fn project_entry(project: &Project) -> Node {
    Stack::new(vec![
        Text::line(or(&project.name, "Strategic Initiative"), "executiveProjectTitle").into(),
        Text::line(
            or(
                &project.description,
                "Executive-level project with measurable business impact.",
            ),
            "executiveProjectDesc",
        )
        .margin(Spacing::new(0.0, 2.0, 0.0, 0.0))
        .into(),
    ])
    .margin(Spacing::new(0.0, 0.0, 0.0, 8.0))
    .into()
}

fn styles() -> StyleSheet {
    let below = |top: f32| Spacing::new(0.0, top, 0.0, 0.0);
    StyleSheet::new()
        .with(
            "executiveName",
            Style::new().size(22.0).bold().align(Alignment::Center).color(CHARCOAL).letter_spacing(1.0),
        )
        .with(
            "executiveTitle",
            Style::new().size(14.0).align(Alignment::Center).color(BROWN).margin(below(4.0)),
        )
        .with("executiveContact", Style::new().size(10.0).color(Color::hex(0x4A4A4A)))
        .with("executiveWebsite", Style::new().size(10.0).color(BROWN).underline())
        .with(
            "executiveSectionHeader",
            Style::new().size(11.0).bold().color(CHARCOAL).letter_spacing(0.5),
        )
        .with(
            "executiveSummary",
            Style::new()
                .size(11.0)
                .color(Color::hex(0x2A2A2A))
                .line_height(1.4)
                .align(Alignment::Justify),
        )
        .with(
            "executivePosition",
            Style::new().size(12.0).bold().color(CHARCOAL).letter_spacing(0.3),
        )
        .with(
            "executiveCompany",
            Style::new().size(11.0).color(BROWN).italics().margin(below(2.0)),
        )
        .with("executiveDate", Style::new().size(10.0).color(GREY).bold())
        .with(
            "executiveLocation",
            Style::new().size(9.0).color(Color::hex(0x888888)).margin(below(1.0)),
        )
        .with(
            "executiveDescription",
            Style::new().size(10.0).color(INK).line_height(1.3).align(Alignment::Justify),
        )
        .with("achievementHeader", Style::new().size(10.0).bold().color(BROWN))
        .with(
            "executiveAchievements",
            Style::new()
                .size(10.0)
                .color(Color::hex(0x2A2A2A))
                .line_height(1.2)
                .margin(Spacing::new(12.0, 2.0, 0.0, 0.0)),
        )
        .with("executiveDegree", Style::new().size(10.0).bold().color(CHARCOAL))
        .with(
            "executiveInstitution",
            Style::new().size(10.0).color(BROWN).margin(below(1.0)),
        )
        .with(
            "executiveEducationDate",
            Style::new().size(9.0).color(GREY).margin(below(1.0)),
        )
        .with("executiveCertName", Style::new().size(10.0).bold().color(CHARCOAL))
        .with(
            "executiveCertDetails",
            Style::new().size(9.0).color(GREY).margin(below(1.0)),
        )
        .with("competencyCategory", Style::new().size(10.0).bold().color(BROWN))
        .with(
            "competencyList",
            Style::new().size(9.0).color(INK).line_height(1.2).margin(below(2.0)),
        )
        .with("executiveProjectTitle", Style::new().size(10.0).bold().color(CHARCOAL))
        .with(
            "executiveProjectDesc",
            Style::new().size(9.0).color(Color::hex(0x444444)).line_height(1.2),
        )
}
