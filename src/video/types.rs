//! Core types for video generation.

use crate::error::{Result, StudioError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Model used when the caller does not pick one.
pub const DEFAULT_MODEL: &str = "veo-3.1-fast-generate-preview";

/// Aspect ratio used when the caller does not pick one.
pub const DEFAULT_ASPECT_RATIO: &str = "9:16";

/// Resolution used when the caller does not pick one.
pub const DEFAULT_RESOLUTION: &str = "720p";

/// MIME type of every video this crate returns.
pub const VIDEO_MIME_TYPE: &str = "video/mp4";

/// Loosely-typed generation input, as received from a form or the CLI.
///
/// Every field is optional; empty strings are treated the same as missing
/// ones. Use [`GenerationRequest::from_input`] to validate and apply defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerationInput {
    /// Text prompt describing the video.
    #[serde(default)]
    pub prompt: Option<String>,
    /// Aspect ratio (e.g. "9:16", "16:9").
    #[serde(default)]
    pub aspect_ratio: Option<String>,
    /// Resolution (e.g. "720p").
    #[serde(default)]
    pub resolution: Option<String>,
    /// Things the video should avoid.
    #[serde(default)]
    pub negative_prompt: Option<String>,
    /// Remote model identifier.
    #[serde(default)]
    pub model: Option<String>,
}

impl GenerationInput {
    /// Reads input from a raw JSON request body.
    ///
    /// Each field is read on its own: a field that is missing or not a
    /// string is treated as absent without discarding the others. A body
    /// that is not a JSON object yields empty input.
    pub fn from_json_body(body: &[u8]) -> Self {
        let value: serde_json::Value = serde_json::from_slice(body).unwrap_or_default();
        let field = |name: &str| value.get(name).and_then(|v| v.as_str()).map(str::to_string);

        Self {
            prompt: field("prompt"),
            aspect_ratio: field("aspect_ratio"),
            resolution: field("resolution"),
            negative_prompt: field("negative_prompt"),
            model: field("model"),
        }
    }
}

/// A validated request to generate a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    /// The text prompt describing the desired video. Never blank.
    pub prompt: String,
    /// Aspect ratio (e.g. "9:16").
    pub aspect_ratio: String,
    /// Resolution (e.g. "720p").
    pub resolution: String,
    /// Optional negative prompt.
    pub negative_prompt: Option<String>,
    /// Remote model identifier.
    pub model: String,
}

impl GenerationRequest {
    /// Creates a request with the given prompt and default settings.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            aspect_ratio: DEFAULT_ASPECT_RATIO.to_string(),
            resolution: DEFAULT_RESOLUTION.to_string(),
            negative_prompt: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Validates loose input and fills in defaults.
    ///
    /// `default_model` is used when the input names no model.
    pub fn from_input(input: GenerationInput, default_model: &str) -> Result<Self> {
        let prompt = non_empty(input.prompt)
            .ok_or_else(|| StudioError::InvalidRequest("Prompt is required.".into()))?;

        let mut request = Self::new(prompt)
            .with_model(non_empty(input.model).unwrap_or_else(|| default_model.to_string()));

        if let Some(ratio) = non_empty(input.aspect_ratio) {
            request = request.with_aspect_ratio(ratio);
        }
        if let Some(resolution) = non_empty(input.resolution) {
            request = request.with_resolution(resolution);
        }
        if let Some(negative) = non_empty(input.negative_prompt) {
            request = request.with_negative_prompt(negative);
        }

        request.validate()?;
        Ok(request)
    }

    /// Sets the aspect ratio.
    pub fn with_aspect_ratio(mut self, ratio: impl Into<String>) -> Self {
        self.aspect_ratio = ratio.into();
        self
    }

    /// Sets the resolution.
    pub fn with_resolution(mut self, resolution: impl Into<String>) -> Self {
        self.resolution = resolution.into();
        self
    }

    /// Sets the negative prompt.
    pub fn with_negative_prompt(mut self, negative: impl Into<String>) -> Self {
        self.negative_prompt = Some(negative.into());
        self
    }

    /// Sets the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Checks the request invariants.
    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(StudioError::InvalidRequest("Prompt is required.".into()));
        }
        if !is_valid_model_id(&self.model) {
            return Err(StudioError::InvalidRequest(
                "Invalid model identifier.".into(),
            ));
        }
        Ok(())
    }

    /// Builds the remote configuration, leaving out empty optional fields.
    pub fn config(&self) -> GenerateVideosConfig {
        GenerateVideosConfig {
            negative_prompt: non_empty(self.negative_prompt.clone()),
            aspect_ratio: non_empty(Some(self.aspect_ratio.clone())),
            resolution: non_empty(Some(self.resolution.clone())),
        }
    }
}

/// Optional settings sent along with a generation job.
///
/// `None` means "let the remote service decide"; it is never sent as an
/// explicit null or empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateVideosConfig {
    /// Things the video should avoid.
    pub negative_prompt: Option<String>,
    /// Aspect ratio.
    pub aspect_ratio: Option<String>,
    /// Resolution.
    pub resolution: Option<String>,
}

impl GenerateVideosConfig {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.negative_prompt.is_none() && self.aspect_ratio.is_none() && self.resolution.is_none()
    }
}

/// Reference to a video held by the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Download URI.
    pub uri: String,
}

impl GeneratedArtifact {
    /// Creates an artifact reference.
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

/// Snapshot of a remote generation job.
///
/// Snapshots are never updated in place; each status fetch returns a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Opaque handle used to refresh the job.
    pub name: String,
    /// Whether the job reached a terminal state.
    pub done: bool,
    /// Generated artifacts, once available.
    pub result: Option<Vec<GeneratedArtifact>>,
    /// Failure reported by the remote service.
    pub error: Option<String>,
}

impl Operation {
    /// A job that is still running.
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            done: false,
            result: None,
            error: None,
        }
    }

    /// A finished job with the given artifacts.
    pub fn completed(name: impl Into<String>, artifacts: Vec<GeneratedArtifact>) -> Self {
        Self {
            name: name.into(),
            done: true,
            result: Some(artifacts),
            error: None,
        }
    }

    /// A finished job that failed.
    pub fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            done: true,
            result: None,
            error: Some(message.into()),
        }
    }

    /// Returns the generated artifacts, empty if there are none.
    pub fn artifacts(&self) -> &[GeneratedArtifact] {
        self.result.as_deref().unwrap_or_default()
    }
}

/// Metadata about the video generation process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Model used for generation.
    pub model: Option<String>,
    /// Generation duration in milliseconds.
    pub duration_ms: Option<u64>,
    /// Requested aspect ratio.
    pub aspect_ratio: Option<String>,
    /// Requested resolution.
    pub resolution: Option<String>,
}

/// A downloaded video with its data and metadata.
#[derive(Debug, Clone)]
pub struct GeneratedVideo {
    /// Raw video bytes.
    pub data: Vec<u8>,
    /// MIME type (e.g., "video/mp4").
    pub mime_type: String,
    /// Generation metadata.
    pub metadata: VideoMetadata,
}

impl GeneratedVideo {
    /// Creates a new generated video.
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>, metadata: VideoMetadata) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
            metadata,
        }
    }

    /// Returns the size of the video data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Saves the video to the specified path.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, &self.data)?;
        Ok(())
    }
}

/// Returns true if `model` can be used as a single URL path segment.
pub(crate) fn is_valid_model_id(model: &str) -> bool {
    !model.is_empty()
        && model
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(prompt: &str) -> GenerationInput {
        GenerationInput {
            prompt: Some(prompt.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_from_json_body_reads_fields_independently() {
        let input = GenerationInput::from_json_body(
            br#"{"prompt": "a cat surfing", "aspect_ratio": 169, "resolution": null, "model": "veo-x"}"#,
        );
        assert_eq!(input.prompt.as_deref(), Some("a cat surfing"));
        assert_eq!(input.aspect_ratio, None);
        assert_eq!(input.resolution, None);
        assert_eq!(input.model.as_deref(), Some("veo-x"));

        let request = GenerationRequest::from_input(input, DEFAULT_MODEL).unwrap();
        assert_eq!(request.aspect_ratio, DEFAULT_ASPECT_RATIO);
    }

    #[test]
    fn test_from_json_body_tolerates_garbage() {
        let bodies: [&[u8]; 4] = [b"not json", b"", b"[1, 2]", br#"{"prompt": 42}"#];
        for body in bodies {
            let input = GenerationInput::from_json_body(body);
            assert_eq!(input.prompt, None);
        }
    }

    #[test]
    fn test_from_input_applies_defaults() {
        let request = GenerationRequest::from_input(input("  a cat surfing "), DEFAULT_MODEL).unwrap();
        assert_eq!(request.prompt, "a cat surfing");
        assert_eq!(request.aspect_ratio, "9:16");
        assert_eq!(request.resolution, "720p");
        assert_eq!(request.negative_prompt, None);
        assert_eq!(request.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_from_input_rejects_blank_prompt() {
        for prompt in ["", "   ", "\n\t"] {
            let err = GenerationRequest::from_input(input(prompt), DEFAULT_MODEL).unwrap_err();
            assert!(matches!(err, StudioError::InvalidRequest(ref m) if m == "Prompt is required."));
        }

        let err =
            GenerationRequest::from_input(GenerationInput::default(), DEFAULT_MODEL).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_from_input_empty_strings_fall_back() {
        let request = GenerationRequest::from_input(
            GenerationInput {
                prompt: Some("waves".into()),
                aspect_ratio: Some("".into()),
                resolution: Some(" ".into()),
                negative_prompt: Some("   ".into()),
                model: Some("".into()),
            },
            "veo-custom",
        )
        .unwrap();

        assert_eq!(request.aspect_ratio, DEFAULT_ASPECT_RATIO);
        assert_eq!(request.resolution, DEFAULT_RESOLUTION);
        assert_eq!(request.negative_prompt, None);
        assert_eq!(request.model, "veo-custom");
    }

    #[test]
    fn test_from_input_keeps_explicit_values() {
        let request = GenerationRequest::from_input(
            GenerationInput {
                prompt: Some("waves".into()),
                aspect_ratio: Some("16:9".into()),
                resolution: Some("1080p".into()),
                negative_prompt: Some(" blurry ".into()),
                model: Some("veo-3.1-generate-preview".into()),
            },
            DEFAULT_MODEL,
        )
        .unwrap();

        assert_eq!(request.aspect_ratio, "16:9");
        assert_eq!(request.resolution, "1080p");
        assert_eq!(request.negative_prompt.as_deref(), Some("blurry"));
        assert_eq!(request.model, "veo-3.1-generate-preview");
    }

    #[test]
    fn test_from_input_rejects_path_like_model() {
        let err = GenerationRequest::from_input(
            GenerationInput {
                prompt: Some("waves".into()),
                model: Some("../operations/x".into()),
                ..Default::default()
            },
            DEFAULT_MODEL,
        )
        .unwrap_err();
        assert!(matches!(err, StudioError::InvalidRequest(ref m) if m == "Invalid model identifier."));
    }

    #[test]
    fn test_config_contains_defaults_and_omits_empty_negative_prompt() {
        let config = GenerationRequest::new("waves").config();
        assert_eq!(config.aspect_ratio.as_deref(), Some("9:16"));
        assert_eq!(config.resolution.as_deref(), Some("720p"));
        assert_eq!(config.negative_prompt, None);
        assert!(!config.is_empty());
    }

    #[test]
    fn test_config_omits_blank_fields() {
        let config = GenerationRequest::new("waves")
            .with_aspect_ratio("")
            .with_resolution("  ")
            .with_negative_prompt("")
            .config();
        assert!(config.is_empty());

        let config = GenerationRequest::new("waves")
            .with_negative_prompt("low quality")
            .config();
        assert_eq!(config.negative_prompt.as_deref(), Some("low quality"));
    }

    #[test]
    fn test_operation_artifacts() {
        assert!(Operation::pending("operations/1").artifacts().is_empty());
        assert!(Operation::failed("operations/1", "boom").artifacts().is_empty());

        let op = Operation::completed("operations/1", vec![GeneratedArtifact::new("https://x/v.mp4")]);
        assert!(op.done);
        assert_eq!(op.artifacts()[0].uri, "https://x/v.mp4");
    }

    #[test]
    fn test_generation_input_deserializes_partial_json() {
        let input: GenerationInput =
            serde_json::from_str(r#"{"prompt": "hi", "aspect_ratio": null}"#).unwrap();
        assert_eq!(input.prompt.as_deref(), Some("hi"));
        assert!(input.aspect_ratio.is_none());
        assert!(input.model.is_none());
    }
}
