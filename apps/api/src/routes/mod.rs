pub mod health;
pub mod resumes;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resumes/layout", post(resumes::handle_layout))
        .route("/api/v1/resumes/pdf", post(resumes::handle_pdf))
        .with_state(state)
}
