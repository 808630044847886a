use std::sync::Arc;

use crate::config::Config;
use crate::render::RenderSink;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// PDF backend. Swappable so handlers can be exercised with a stub sink.
    pub renderer: Arc<dyn RenderSink>,
}
