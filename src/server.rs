//! HTTP front-end: the single-page UI and the generation endpoint.

use crate::error::StudioError;
use crate::video::{
    generate_video, GeneratedVideo, GenerationInput, GenerationRequest, GenerationSettings,
    VideoClient,
};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;

/// File name suggested to browsers for generated videos.
pub const VIDEO_FILENAME: &str = "ai-generated-video.mp4";

const INDEX_HTML: &str = include_str!("../static/index.html");

/// State shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    client: Arc<dyn VideoClient>,
    default_model: String,
    settings: GenerationSettings,
}

impl AppState {
    /// Creates handler state around a video client.
    pub fn new(
        client: Arc<dyn VideoClient>,
        default_model: impl Into<String>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            client,
            default_model: default_model.into(),
            settings,
        }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/api/generate", post(generate))
        .with_state(state)
}

/// Serves the application on an already-bound listener until it fails.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "listening");
    }
    axum::serve(listener, router(state)).await
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn healthz() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

/// `POST /api/generate`
///
/// The body is read as JSON regardless of its content type. Fields with the
/// wrong type are ignored; a body that does not parse is an empty object.
async fn generate(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let input = GenerationInput::from_json_body(&body);
    let request = GenerationRequest::from_input(input, &state.default_model)?;

    let video = generate_video(state.client.as_ref(), &request, &state.settings).await?;
    Ok(video_response(video))
}

fn video_response(video: GeneratedVideo) -> Response {
    (
        [
            (header::CONTENT_TYPE, video.mime_type),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{VIDEO_FILENAME}\""),
            ),
        ],
        video.data,
    )
        .into_response()
}

/// JSON error response: `{"error": "..."}` with the mapped status code.
struct ApiError(StudioError);

impl From<StudioError> for ApiError {
    fn from(err: StudioError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "video generation failed: {}", self.0);
        } else {
            tracing::warn!(status = status.as_u16(), "rejected generation request: {}", self.0);
        }

        (status, Json(json!({"error": self.0.public_message()}))).into_response()
    }
}
