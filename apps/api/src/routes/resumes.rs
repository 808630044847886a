use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::content::provided;
use crate::errors::AppError;
use crate::layout::{generate, Document};
use crate::models::resume::ResumeRecord;
use crate::render::{attachment_filename, PDF_CONTENT_TYPE};
use crate::state::AppState;

/// A resume record plus the name of the account it belongs to.
#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    #[serde(default, alias = "ownerName")]
    pub owner_name: Option<String>,
    #[serde(flatten)]
    pub record: ResumeRecord,
}

impl RenderRequest {
    /// The owner's name, else the name on the resume, else `resume`.
    fn display_name(&self) -> String {
        let resume_name = self
            .record
            .content
            .as_ref()
            .and_then(|content| content.basic.as_ref())
            .and_then(|basic| provided(basic.name.as_deref()));

        provided(self.owner_name.as_deref())
            .or(resume_name)
            .unwrap_or("resume")
            .to_string()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TemplateQuery {
    pub template: Option<String>,
}

/// Runs a CPU-bound job off the async runtime, bounded by `limit`.
async fn run_with_timeout<T, F>(limit: Duration, job: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::time::timeout(limit, tokio::task::spawn_blocking(job)).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(AppError::Internal(
            anyhow::Error::new(join_error).context("render task failed"),
        )),
        Err(_) => {
            warn!(timeout_ms = limit.as_millis() as u64, "Render job timed out");
            Err(AppError::RenderTimeout)
        }
    }
}

/// POST /api/v1/resumes/layout
pub async fn handle_layout(
    State(state): State<AppState>,
    Query(query): Query<TemplateQuery>,
    Json(req): Json<RenderRequest>,
) -> Result<Json<Document>, AppError> {
    let document = run_with_timeout(state.config.render_timeout, move || {
        Ok(generate(&req.record, query.template.as_deref())?)
    })
    .await?;
    Ok(Json(document))
}

/// POST /api/v1/resumes/pdf
pub async fn handle_pdf(
    State(state): State<AppState>,
    Query(query): Query<TemplateQuery>,
    Json(req): Json<RenderRequest>,
) -> Result<Response, AppError> {
    let filename = attachment_filename(&req.display_name());
    let renderer = Arc::clone(&state.renderer);

    let pdf = run_with_timeout(state.config.render_timeout, move || {
        let document = generate(&req.record, query.template.as_deref())?;
        Ok(renderer.render(&document)?)
    })
    .await?;

    info!(
        pages = pdf.page_count,
        bytes = pdf.bytes.len(),
        filename = %filename,
        "Resume PDF rendered"
    );

    let headers = [
        (header::CONTENT_TYPE, PDF_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, pdf.bytes).into_response())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::layout::Document;
    use crate::render::{PdfRenderer, RenderError, RenderSink, RenderedPdf, RendererConfig};
    use crate::routes::build_router;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct FailingSink;

    impl RenderSink for FailingSink {
        fn render(&self, _document: &Document) -> Result<RenderedPdf, RenderError> {
            Err(RenderError::InvalidGeometry("test".to_string()))
        }
    }

    struct SlowSink;

    impl RenderSink for SlowSink {
        fn render(&self, _document: &Document) -> Result<RenderedPdf, RenderError> {
            std::thread::sleep(Duration::from_millis(300));
            Ok(RenderedPdf {
                bytes: Vec::new(),
                page_count: 0,
            })
        }
    }

    fn app_with(renderer: Arc<dyn RenderSink>, render_timeout: Duration) -> Router {
        build_router(AppState {
            config: Config {
                render_timeout,
                ..Config::default()
            },
            renderer,
        })
    }

    fn app() -> Router {
        app_with(
            Arc::new(PdfRenderer::new(RendererConfig::default())),
            Duration::from_secs(10),
        )
    }

    async fn post(app: Router, uri: &str, body: String) -> Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    fn resume() -> Value {
        json!({
            "title": "Platform Engineer",
            "template": "modern",
            "content": {
                "basic": { "name": "Ada Lovelace", "email": "ada@example.com" },
                "skills": { "technical": ["Rust"] }
            }
        })
    }

    // ── Layout ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_layout_returns_document_json() {
        let response = post(app(), "/api/v1/resumes/layout", resume().to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["title"], "Platform Engineer");
        assert_eq!(body["content"][0]["kind"], "background");
    }

    #[tokio::test]
    async fn test_layout_query_overrides_record_template() {
        let response = post(app(), "/api/v1/resumes/layout?template=minimal", resume().to_string()).await;
        let body = body_json(response).await;
        assert_eq!(body["page"]["margins"]["left"], 50.0);
        assert_eq!(body["content"][0]["kind"], "stack");
    }

    #[tokio::test]
    async fn test_missing_content_is_unprocessable() {
        let response = post(app(), "/api/v1/resumes/layout", json!({ "title": "x" }).to_string()).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "MISSING_CONTENT");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let response = post(app(), "/api/v1/resumes/layout", "{ not json".to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    // ── PDF ─────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_pdf_response_headers_and_body() {
        let response = post(app(), "/api/v1/resumes/pdf", resume().to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Ada_Lovelace_resume.pdf\""
        );
        assert!(body_bytes(response).await.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_owner_name_wins_for_filename() {
        let mut body = resume();
        body["owner_name"] = json!("Grace Hopper");
        let response = post(app(), "/api/v1/resumes/pdf", body.to_string()).await;
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Grace_Hopper_resume.pdf\""
        );
    }

    #[tokio::test]
    async fn test_render_failure_is_internal_error() {
        let app = app_with(Arc::new(FailingSink), Duration::from_secs(10));
        let response = post(app, "/api/v1/resumes/pdf", resume().to_string()).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"]["code"], "RENDER_ERROR");
    }

    #[tokio::test]
    async fn test_slow_render_times_out() {
        let app = app_with(Arc::new(SlowSink), Duration::from_millis(20));
        let response = post(app, "/api/v1/resumes/pdf", resume().to_string()).await;
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body_json(response).await["error"]["code"], "RENDER_TIMEOUT");
    }

    // ── Display name ────────────────────────────────────────────────────────

    #[test]
    fn test_display_name_fallbacks() {
        let req: RenderRequest = serde_json::from_value(json!({ "content": {} })).unwrap();
        assert_eq!(req.display_name(), "resume");

        let req: RenderRequest =
            serde_json::from_value(json!({ "ownerName": "  ", "content": { "basic": { "name": "Ada" } } })).unwrap();
        assert_eq!(req.display_name(), "Ada");
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }
}
