// Resume layout: turns prepared resume content into a document tree.
// Builders are pure functions; one per template, selected by TemplateKind.

pub mod assembler;
pub mod creative;
pub mod document;
pub mod entries;
pub mod executive;
pub mod fallback;
pub mod minimal;
pub mod modern;
pub mod style;
pub mod templates;

// Re-export the public API consumed by the render layer and HTTP handlers.
pub use assembler::{generate, GenerationError};
pub use document::Document;
pub use templates::TemplateKind;
