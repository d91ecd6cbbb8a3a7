//! Error types for video generation.

use std::time::Duration;

/// Maximum length of an upstream error message carried in an error.
const MAX_ERROR_MESSAGE_LEN: usize = 500;

/// Errors that can occur while generating a video.
#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    /// Client input was missing or malformed.
    #[error("{0}")]
    InvalidRequest(String),

    /// The remote job did not finish within the polling budget.
    #[error("Video generation operation timed out after {0:?}.")]
    Timeout(Duration),

    /// The remote job finished but produced no video.
    #[error("No video returned from the model.")]
    NoArtifact,

    /// API key missing or rejected.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status returned by the remote service.
        status: u16,
        /// Sanitized error body.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Delay requested by the `Retry-After` header, if any.
        retry_after: Option<Duration>,
    },

    /// Content was blocked by safety filters.
    #[error("content blocked: {0}")]
    ContentBlocked(String),

    /// The remote job reported a failure.
    #[error("video generation failed: {0}")]
    VideoGeneration(String),

    /// Invalid configuration (e.g., a malformed environment variable).
    #[error("configuration error: {0}")]
    Config(String),

    /// The remote service answered with something we could not interpret.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error (e.g., saving file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StudioError {
    /// Returns the HTTP status code this error is reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest(_) => 400,
            Self::NoArtifact => 502,
            Self::Timeout(_) => 504,
            _ => 500,
        }
    }

    /// Returns the message shown to the caller of the HTTP API.
    ///
    /// Client-side and budget errors are reported verbatim; every other
    /// failure is wrapped in a generic envelope.
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidRequest(msg) => msg.clone(),
            Self::Timeout(_) => "Video generation operation timed out.".to_string(),
            Self::NoArtifact => self.to_string(),
            Self::VideoGeneration(msg) => format!("Video generation failed: {msg}"),
            other => format!("Video generation failed: {other}"),
        }
    }
}

/// Result type alias for video generation operations.
pub type Result<T> = std::result::Result<T, StudioError>;

/// Parses a `Retry-After` header given in seconds.
pub(crate) fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

/// Normalizes an upstream error body before it is carried in an error.
///
/// Collapses whitespace, redacts anything that looks like a Google API key
/// and truncates overly long bodies.
pub(crate) fn sanitize_error_message(text: &str) -> String {
    let collapsed = text
        .split_whitespace()
        .map(|word| {
            if word.contains("AIza") {
                "[REDACTED]"
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    if collapsed.chars().count() > MAX_ERROR_MESSAGE_LEN {
        let truncated: String = collapsed.chars().take(MAX_ERROR_MESSAGE_LEN).collect();
        format!("{truncated}...")
    } else {
        collapsed
    }
}
