//! Submit, poll and download: the full generation workflow.

use crate::error::{Result, StudioError};
use crate::video::client::VideoClient;
use crate::video::poller::wait_for_operation;
use crate::video::types::{GeneratedVideo, GenerationRequest, VideoMetadata, VIDEO_MIME_TYPE};
use std::time::{Duration, Instant};

/// Polling budget for a single generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSettings {
    /// Maximum time to wait for the remote job.
    pub timeout: Duration,
    /// Delay between status checks.
    pub poll_interval: Duration,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(600),
            poll_interval: Duration::from_secs(5),
        }
    }
}

/// Generates one video: submits the job, waits for it and downloads the
/// first artifact into memory.
pub async fn generate_video(
    client: &dyn VideoClient,
    request: &GenerationRequest,
    settings: &GenerationSettings,
) -> Result<GeneratedVideo> {
    request.validate()?;
    let start = Instant::now();

    let config = request.config();
    let operation = client
        .submit(&request.model, &request.prompt, &config)
        .await?;
    tracing::info!(
        operation = %operation.name,
        model = %request.model,
        client = client.name(),
        "submitted video generation request"
    );

    let operation =
        wait_for_operation(client, operation, settings.timeout, settings.poll_interval).await?;

    if let Some(message) = operation.error {
        return Err(StudioError::VideoGeneration(message));
    }

    let artifact = operation
        .result
        .and_then(|artifacts| artifacts.into_iter().next())
        .ok_or(StudioError::NoArtifact)?;
    tracing::debug!(uri = %artifact.uri, "video generation complete");

    let data = client.download(&artifact).await?;
    let duration_ms = start.elapsed().as_millis() as u64;
    tracing::info!(
        size_bytes = data.len(),
        duration_ms,
        "downloaded generated video"
    );

    Ok(GeneratedVideo::new(
        data,
        VIDEO_MIME_TYPE,
        VideoMetadata {
            model: Some(request.model.clone()),
            duration_ms: Some(duration_ms),
            aspect_ratio: Some(request.aspect_ratio.clone()),
            resolution: Some(request.resolution.clone()),
        },
    ))
}
