//! Video generation module.

mod client;
mod pipeline;
mod poller;
pub mod providers;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::VideoClient;
pub use pipeline::{generate_video, GenerationSettings};
pub use poller::wait_for_operation;
pub(crate) use types::is_valid_model_id;
pub use types::{
    GenerateVideosConfig, GeneratedArtifact, GeneratedVideo, GenerationInput, GenerationRequest,
    Operation, VideoMetadata, DEFAULT_ASPECT_RATIO, DEFAULT_MODEL, DEFAULT_RESOLUTION,
    VIDEO_MIME_TYPE,
};
