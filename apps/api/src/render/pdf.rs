//! PDF serialization of a laid-out document with `pdf-writer`.
//!
//! Uses the standard Type1 faces with WinAnsi encoding, so no font program is
//! embedded. Nothing time-dependent is written: the same document always
//! produces the same bytes.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use tracing::debug;

use crate::layout::Document;
use crate::render::flow::{self, FontVariant, LaidOutDocument, PageCanvas, PaintOp};
use crate::render::{RenderError, RenderSink, RenderedPdf, RendererConfig};

pub struct PdfRenderer {
    config: RendererConfig,
}

impl PdfRenderer {
    pub fn new(config: RendererConfig) -> Self {
        PdfRenderer { config }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    fn write(&self, document: &Document, laid_out: &LaidOutDocument) -> Vec<u8> {
        let mut alloc = Ref::new(1);
        let catalog_id = alloc.bump();
        let page_tree_id = alloc.bump();
        let info_id = alloc.bump();
        let fonts: Vec<(FontVariant, Ref)> = FontVariant::ALL.iter().map(|v| (*v, alloc.bump())).collect();
        let page_ids: Vec<(Ref, Ref)> = laid_out.pages.iter().map(|_| (alloc.bump(), alloc.bump())).collect();

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id)
            .kids(page_ids.iter().map(|(page_id, _)| *page_id))
            .count(page_ids.len() as i32);

        for (variant, id) in &fonts {
            let base = self.config.font.base_font(variant.bold, variant.italic);
            pdf.type1_font(*id)
                .base_font(Name(base.as_bytes()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }

        let media_box = Rect::new(0.0, 0.0, laid_out.width, laid_out.height);
        for (canvas, (page_id, content_id)) in laid_out.pages.iter().zip(&page_ids) {
            let mut page = pdf.page(*page_id);
            page.media_box(media_box);
            page.parent(page_tree_id);
            page.contents(*content_id);
            let mut resources = page.resources();
            let mut font_dict = resources.fonts();
            for (variant, id) in &fonts {
                font_dict.pair(Name(variant.resource_name()), *id);
            }
            font_dict.finish();
            resources.finish();
            page.finish();

            let stream = paint_page(canvas, laid_out.height);
            pdf.stream(*content_id, &stream);
        }

        let mut info = pdf.document_info(info_id);
        info.producer(TextStr(&self.config.producer));
        if let Some(title) = &document.title {
            info.title(TextStr(title));
        }
        info.finish();

        pdf.finish()
    }
}

impl RenderSink for PdfRenderer {
    fn render(&self, document: &Document) -> Result<RenderedPdf, RenderError> {
        validate(document)?;
        let laid_out = flow::layout(document, &self.config);
        let bytes = self.write(document, &laid_out);

        debug!(
            pages = laid_out.pages.len(),
            bytes = bytes.len(),
            font = ?self.config.font,
            "PDF rendered"
        );
        Ok(RenderedPdf {
            bytes,
            page_count: laid_out.pages.len(),
        })
    }
}

fn validate(document: &Document) -> Result<(), RenderError> {
    if document.content.is_empty() {
        return Err(RenderError::EmptyDocument);
    }
    let page = &document.page;
    if !(page.width > 0.0 && page.height > 0.0) {
        return Err(RenderError::InvalidGeometry(format!(
            "page size {}x{} must be positive",
            page.width, page.height
        )));
    }
    if page.content_width() <= 0.0 || page.height - page.margins.vertical() <= 0.0 {
        return Err(RenderError::InvalidGeometry(
            "margins leave no room for content".to_string(),
        ));
    }
    Ok(())
}

/// Content stream for one page. Flips the top-left layout coordinates into
/// PDF user space.
fn paint_page(canvas: &PageCanvas, page_height: f32) -> Vec<u8> {
    let mut content = Content::new();

    for op in canvas.ops() {
        match op {
            PaintOp::Fill {
                x,
                y,
                width,
                height,
                color,
            } => {
                let (r, g, b) = color.unit_rgb();
                content.set_fill_rgb(r, g, b);
                content.rect(*x, page_height - y - height, *width, *height);
                content.fill_nonzero();
            }
            PaintOp::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } => {
                let (r, g, b) = color.unit_rgb();
                content.set_stroke_rgb(r, g, b);
                content.set_line_width(*width);
                content.move_to(*x1, page_height - y1);
                content.line_to(*x2, page_height - y2);
                content.stroke();
            }
            PaintOp::Text(run) => {
                let (r, g, b) = run.color.unit_rgb();
                let encoded = encode_win_ansi(&run.text);
                content.set_fill_rgb(r, g, b);
                content.begin_text();
                content.set_font(Name(run.font.resource_name()), run.size);
                content.set_char_spacing(run.char_spacing);
                content.set_word_spacing(run.word_spacing);
                content.set_text_matrix([1.0, 0.0, 0.0, 1.0, run.x, page_height - run.baseline]);
                content.show(Str(&encoded));
                content.end_text();
            }
        }
    }
    content.finish()
}

/// Maps text onto WinAnsiEncoding bytes. Characters outside the code page
/// become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            '\u{20AC}' => 0x80,
            '\u{201A}' => 0x82,
            '\u{0192}' => 0x83,
            '\u{201E}' => 0x84,
            '\u{2026}' => 0x85,
            '\u{2020}' => 0x86,
            '\u{2021}' => 0x87,
            '\u{02C6}' => 0x88,
            '\u{2030}' => 0x89,
            '\u{0160}' => 0x8A,
            '\u{2039}' => 0x8B,
            '\u{0152}' => 0x8C,
            '\u{017D}' => 0x8E,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{02DC}' => 0x98,
            '\u{2122}' => 0x99,
            '\u{0161}' => 0x9A,
            '\u{203A}' => 0x9B,
            '\u{0153}' => 0x9C,
            '\u{017E}' => 0x9E,
            '\u{0178}' => 0x9F,
            _ => b'?',
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::document::{Node, PageGeometry, Text};
    use crate::layout::generate;
    use crate::layout::style::{Spacing, Style, StyleSheet};
    use crate::layout::TemplateKind;
    use crate::models::resume::ResumeRecord;
    use serde_json::json;

    fn record() -> ResumeRecord {
        serde_json::from_value(json!({
            "title": "Platform Engineer",
            "content": {
                "basic": { "name": "Ada Lovelace", "email": "ada@example.com", "bio": "Builds reliable systems." },
                "experience": [{
                    "company": "Analytical Engines",
                    "position": "Engineer",
                    "startDate": "2021-03-01",
                    "current": true,
                    "highlights": ["Shipped the difference engine"]
                }],
                "skills": { "technical": ["Rust", "Go"] }
            }
        }))
        .unwrap()
    }

    fn renderer() -> PdfRenderer {
        PdfRenderer::new(RendererConfig::default())
    }

    // ── Output shape ────────────────────────────────────────────────────────

    #[test]
    fn test_every_template_renders_a_pdf() {
        let record = record();
        for kind in TemplateKind::ALL {
            let document = generate(&record, Some(kind.as_str())).unwrap();
            let pdf = renderer().render(&document).unwrap();
            assert!(pdf.bytes.starts_with(b"%PDF-"), "{kind} missing header");
            let tail = String::from_utf8_lossy(&pdf.bytes[pdf.bytes.len().saturating_sub(16)..]).to_string();
            assert!(tail.contains("%%EOF"), "{kind} missing trailer");
            assert_eq!(pdf.page_count, 1);
        }
    }

    #[test]
    fn test_rendering_is_byte_stable() {
        let document = generate(&record(), Some("creative")).unwrap();
        let first = renderer().render(&document).unwrap();
        let second = renderer().render(&document).unwrap();
        assert_eq!(first.bytes, second.bytes);
    }

    #[test]
    fn test_long_document_spans_pages() {
        let lines: Vec<Node> = (0..150).map(|i| Text::line(format!("entry {i}"), "body").into()).collect();
        let document = Document::new(
            PageGeometry::a4(Spacing::uniform(50.0)),
            lines,
            StyleSheet::new(),
            Style::new().size(10.0),
        );
        let pdf = renderer().render(&document).unwrap();
        assert!(pdf.page_count >= 2);
    }

    #[test]
    fn test_font_family_is_written() {
        let document = generate(&record(), Some("minimal")).unwrap();
        let times = PdfRenderer::new(RendererConfig {
            font: crate::render::FontFamily::Times,
            ..RendererConfig::default()
        });
        let pdf = times.render(&document).unwrap();
        let raw = String::from_utf8_lossy(&pdf.bytes).to_string();
        assert!(raw.contains("/Times-Roman"));
        assert!(raw.contains("/Times-Bold"));
        assert!(raw.contains("Resume Forge"));
    }

    #[test]
    fn test_extracted_text_contains_the_name() {
        let document = generate(&record(), Some("minimal")).unwrap();
        let pdf = renderer().render(&document).unwrap();
        let text = pdf_extract::extract_text_from_mem(&pdf.bytes).unwrap();
        assert!(text.contains("Ada Lovelace"), "extracted: {text}");
    }

    // ── Validation ──────────────────────────────────────────────────────────

    #[test]
    fn test_empty_document_is_rejected() {
        let document = Document::new(
            PageGeometry::a4(Spacing::ZERO),
            Vec::new(),
            StyleSheet::new(),
            Style::new(),
        );
        assert_eq!(renderer().render(&document).unwrap_err(), RenderError::EmptyDocument);
    }

    #[test]
    fn test_margins_wider_than_page_are_rejected() {
        let document = Document::new(
            PageGeometry::a4(Spacing::new(300.0, 0.0, 300.0, 0.0)),
            vec![Text::line("x", "body").into()],
            StyleSheet::new(),
            Style::new(),
        );
        assert!(matches!(
            renderer().render(&document),
            Err(RenderError::InvalidGeometry(_))
        ));
    }

    // ── Encoding ────────────────────────────────────────────────────────────

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("Ada"), b"Ada".to_vec());
        assert_eq!(encode_win_ansi("\u{2022} caf\u{E9}"), vec![0x95, b' ', b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("2019\u{2013}2021"), b"2019\x962021".to_vec());
        assert_eq!(encode_win_ansi("\u{674E}"), b"?".to_vec());
    }
}
