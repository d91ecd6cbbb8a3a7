#![warn(missing_docs)]
//! Veo Studio - prompt-to-video web front-end.
//!
//! Submits a generation job to Google Veo, polls it until it finishes and
//! streams the resulting MP4 back to the caller.
//!
//! # Quick Start
//!
//! ```no_run
//! use veo_studio::{generate_video, GenerationRequest, GenerationSettings, VeoClient};
//!
//! #[tokio::main]
//! async fn main() -> veo_studio::Result<()> {
//!     let client = VeoClient::builder().build()?;
//!     let request = GenerationRequest::new("A cat surfing at sunset")
//!         .with_aspect_ratio("16:9");
//!     let video = generate_video(&client, &request, &GenerationSettings::default()).await?;
//!     video.save("cat.mp4")?;
//!     Ok(())
//! }
//! ```
//!
//! # Serving the UI
//!
//! ```no_run
//! use std::sync::Arc;
//! use veo_studio::server::{serve, AppState};
//! use veo_studio::{Config, VeoClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = VeoClient::builder().build()?;
//!     let state = AppState::new(Arc::new(client), &config.default_model, config.settings);
//!     let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
//!     serve(listener, state).await?;
//!     Ok(())
//! }
//! ```

mod config;
mod error;
pub mod server;
pub mod video;

pub use config::{Config, DEFAULT_HOST, DEFAULT_PORT};
pub use error::{Result, StudioError};

pub use video::providers::{VeoClient, VeoClientBuilder};
pub use video::{
    generate_video, wait_for_operation, GenerateVideosConfig, GeneratedArtifact, GeneratedVideo,
    GenerationInput, GenerationRequest, GenerationSettings, Operation, VideoClient, VideoMetadata,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{Result, StudioError};
    pub use crate::video::providers::VeoClient;
    pub use crate::video::{
        generate_video, GeneratedVideo, GenerationRequest, GenerationSettings, VideoClient,
    };
}
