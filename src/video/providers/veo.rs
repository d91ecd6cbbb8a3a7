//! Veo (Google) video generation client.

use crate::error::{parse_retry_after, sanitize_error_message, Result, StudioError};
use crate::video::client::VideoClient;
use crate::video::types::{
    is_valid_model_id, GenerateVideosConfig, GeneratedArtifact, Operation, DEFAULT_MODEL,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Base URL of the Gemini Developer API.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Builder for [`VeoClient`].
#[derive(Debug, Clone)]
pub struct VeoClientBuilder {
    api_key: Option<String>,
    base_url: String,
    model: String,
    request_timeout: Duration,
}

impl Default for VeoClientBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: GEMINI_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl VeoClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Falls back to `GOOGLE_API_KEY` env var.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Overrides the API base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the model probed by [`VideoClient::health_check`].
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the timeout for each individual HTTP call.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Builds the client, resolving the API key.
    pub fn build(self) -> Result<VeoClient> {
        let api_key = self
            .api_key
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                StudioError::Auth(
                    "Missing GOOGLE_API_KEY. Set it in a .env file or as an environment variable."
                        .into(),
                )
            })?;

        let client = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()?;

        Ok(VeoClient {
            client,
            api_key,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            model: self.model,
        })
    }
}

/// Veo client for the Gemini Developer API.
pub struct VeoClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl VeoClient {
    /// Creates a new `VeoClientBuilder`.
    pub fn builder() -> VeoClientBuilder {
        VeoClientBuilder::new()
    }

    async fn read_operation(&self, response: reqwest::Response) -> Result<Operation> {
        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let text = response.text().await.unwrap_or_default();
            return Err(self.parse_error(status.as_u16(), &text, &headers));
        }

        let operation: VeoOperationResponse = response.json().await?;
        Ok(operation.into())
    }

    fn parse_error(
        &self,
        status: u16,
        text: &str,
        headers: &reqwest::header::HeaderMap,
    ) -> StudioError {
        if status == 404 {
            return StudioError::Api {
                status,
                message: "Veo API not available. Veo requires a paid-tier API key with billing enabled. \
                          Enable it at https://aistudio.google.com by selecting a Google Cloud project with billing."
                    .to_string(),
            };
        }
        let text = sanitize_error_message(text);
        if status == 429 {
            let retry_after = parse_retry_after(headers).map(Duration::from_secs);
            return StudioError::RateLimited { retry_after };
        }
        if status == 401 || status == 403 {
            return StudioError::Auth(text);
        }
        let lower = text.to_lowercase();
        if lower.contains("safety")
            || lower.contains("blocked")
            || lower.contains("content_policy")
            || lower.contains("prohibited")
        {
            return StudioError::ContentBlocked(text);
        }
        StudioError::Api {
            status,
            message: text,
        }
    }
}

#[async_trait]
impl VideoClient for VeoClient {
    async fn submit(
        &self,
        model: &str,
        prompt: &str,
        config: &GenerateVideosConfig,
    ) -> Result<Operation> {
        if !is_valid_model_id(model) {
            return Err(StudioError::InvalidRequest(
                "Invalid model identifier.".into(),
            ));
        }

        let url = format!("{}/models/{}:predictLongRunning", self.base_url, model);
        let body = VeoRequest::new(prompt, config);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        self.read_operation(response).await
    }

    async fn get_operation(&self, operation: &Operation) -> Result<Operation> {
        let url = format!("{}/{}", self.base_url, operation.name);

        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await?;

        self.read_operation(response).await
    }

    async fn download(&self, artifact: &GeneratedArtifact) -> Result<Vec<u8>> {
        if artifact.uri.starts_with("gs://") {
            return Err(StudioError::VideoGeneration(format!(
                "Veo returned a Google Cloud Storage URI ({}) which cannot be downloaded directly.",
                artifact.uri
            )));
        }

        // Download links only accept the key as a query parameter.
        let response = self
            .client
            .get(&artifact.uri)
            .query(&[("key", self.api_key.as_str())])
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StudioError::Api {
                status: response.status().as_u16(),
                message: "Failed to download video".into(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    fn name(&self) -> &str {
        "Veo (Google)"
    }

    async fn health_check(&self) -> Result<()> {
        let url = format!("{}/models/{}", self.base_url, self.model);

        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await?;

        match response.status().as_u16() {
            401 | 403 => Err(StudioError::Auth("Invalid API key".into())),
            _ => Ok(()),
        }
    }
}

// ── Request wire format ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VeoRequest {
    instances: Vec<VeoInstance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<VeoParameters>,
}

#[derive(Debug, Serialize)]
struct VeoInstance {
    prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VeoParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    aspect_ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    negative_prompt: Option<String>,
}

impl VeoRequest {
    fn new(prompt: &str, config: &GenerateVideosConfig) -> Self {
        let parameters = if config.is_empty() {
            None
        } else {
            Some(VeoParameters {
                aspect_ratio: config.aspect_ratio.clone(),
                resolution: config.resolution.clone(),
                negative_prompt: config.negative_prompt.clone(),
            })
        };

        Self {
            instances: vec![VeoInstance {
                prompt: prompt.to_string(),
            }],
            parameters,
        }
    }
}

// ── Operation wire format ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct VeoOperationResponse {
    name: String,
    #[serde(default)]
    done: Option<bool>,
    #[serde(default)]
    response: Option<VeoVideoResponse>,
    #[serde(default)]
    error: Option<VeoError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VeoVideoResponse {
    #[serde(default)]
    generate_video_response: Option<VeoGenerateVideoResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VeoGenerateVideoResponse {
    #[serde(default)]
    generated_samples: Option<Vec<VeoGeneratedSample>>,
    #[serde(default)]
    rai_media_filtered_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct VeoGeneratedSample {
    #[serde(default)]
    video: Option<VeoVideo>,
}

#[derive(Debug, Deserialize)]
struct VeoVideo {
    #[serde(default)]
    uri: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VeoError {
    #[serde(default)]
    message: Option<String>,
}

impl From<VeoOperationResponse> for Operation {
    fn from(resp: VeoOperationResponse) -> Self {
        let mut error = resp
            .error
            .map(|err| err.message.unwrap_or_else(|| "Unknown error".into()));

        let generated = resp.response.and_then(|r| r.generate_video_response);
        let filtered = generated
            .as_ref()
            .and_then(|g| g.rai_media_filtered_count)
            .unwrap_or(0);

        let result = generated.map(|g| {
            g.generated_samples
                .unwrap_or_default()
                .into_iter()
                .filter_map(|sample| sample.video.and_then(|v| v.uri))
                .map(GeneratedArtifact::new)
                .collect::<Vec<_>>()
        });

        if error.is_none() && filtered > 0 && result.as_ref().is_none_or(|r| r.is_empty()) {
            error = Some("Video was filtered by Veo safety filters".into());
        }

        Operation {
            name: resp.name,
            done: resp.done.unwrap_or(false),
            result,
            error,
        }
    }
}
