// Render sink: turns a laid-out document tree into PDF bytes.
// The flow engine places nodes on pages; the PDF writer serializes them.

pub mod flow;
pub mod metrics;
pub mod pdf;

use thiserror::Error;

use crate::layout::Document;

pub use metrics::FontFamily;
pub use pdf::PdfRenderer;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Settings shared by every document rendered by one sink.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    pub font: FontFamily,
    /// Written into the document information dictionary.
    pub producer: String,
    /// Base leading as a multiple of the font size.
    pub line_height: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        RendererConfig {
            font: FontFamily::Helvetica,
            producer: "Resume Forge".to_string(),
            line_height: 1.2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error("document has no content")]
    EmptyDocument,

    #[error("invalid page geometry: {0}")]
    InvalidGeometry(String),
}

/// Anything able to turn a document tree into printable bytes.
pub trait RenderSink: Send + Sync {
    fn render(&self, document: &Document) -> Result<RenderedPdf, RenderError>;
}

/// Download file name for a resume owner: `{name}_resume.pdf`, with spaces
/// turned into underscores and everything else outside `[A-Za-z0-9_-]`
/// dropped. A name with nothing left falls back to `resume`.
pub fn attachment_filename(display_name: &str) -> String {
    let name: String = display_name
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();

    let name = if name.is_empty() { "resume" } else { name.as_str() };
    format!("{name}_resume.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_filename_replaces_spaces() {
        assert_eq!(attachment_filename("Ada Lovelace"), "Ada_Lovelace_resume.pdf");
    }

    #[test]
    fn test_attachment_filename_strips_unsafe_characters() {
        assert_eq!(attachment_filename("  José \"D'Arcy\"/../ "), "Jos_DArcy_resume.pdf");
        assert_eq!(attachment_filename("李"), "resume_resume.pdf");
        assert_eq!(attachment_filename(""), "resume_resume.pdf");
    }
}
