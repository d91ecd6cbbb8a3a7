//! Scripted [`VideoClient`] used by unit tests.

use crate::error::{Result, StudioError};
use crate::video::client::VideoClient;
use crate::video::types::{GenerateVideosConfig, GeneratedArtifact, Operation};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A submission recorded by [`ScriptedClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Submission {
    pub model: String,
    pub prompt: String,
    pub config: GenerateVideosConfig,
}

/// Replays canned responses and records every call it receives.
#[derive(Default)]
pub(crate) struct ScriptedClient {
    submit_response: Mutex<Option<Result<Operation>>>,
    statuses: Mutex<VecDeque<Result<Operation>>>,
    pending_forever: bool,
    download_response: Mutex<Option<Result<Vec<u8>>>>,
    submissions: Mutex<Vec<Submission>>,
    status_requests: Mutex<Vec<String>>,
    downloads: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Response to the next `submit`. Defaults to a pending `operations/test`.
    pub fn with_submit(self, response: Result<Operation>) -> Self {
        *self.submit_response.lock().unwrap() = Some(response);
        self
    }

    /// Queues a response for `get_operation`.
    pub fn with_status(self, response: Result<Operation>) -> Self {
        self.statuses.lock().unwrap().push_back(response);
        self
    }

    /// Once the queue is drained, keep answering with a pending snapshot.
    pub fn with_pending_forever(mut self) -> Self {
        self.pending_forever = true;
        self
    }

    /// Response to `download`. Defaults to `b"video-bytes"`.
    pub fn with_download(self, response: Result<Vec<u8>>) -> Self {
        *self.download_response.lock().unwrap() = Some(response);
        self
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn status_requests(&self) -> Vec<String> {
        self.status_requests.lock().unwrap().clone()
    }

    pub fn status_calls(&self) -> usize {
        self.status_requests.lock().unwrap().len()
    }

    pub fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoClient for ScriptedClient {
    async fn submit(
        &self,
        model: &str,
        prompt: &str,
        config: &GenerateVideosConfig,
    ) -> Result<Operation> {
        self.submissions.lock().unwrap().push(Submission {
            model: model.to_string(),
            prompt: prompt.to_string(),
            config: config.clone(),
        });
        self.submit_response
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(Operation::pending("operations/test")))
    }

    async fn get_operation(&self, operation: &Operation) -> Result<Operation> {
        self.status_requests
            .lock()
            .unwrap()
            .push(operation.name.clone());

        match self.statuses.lock().unwrap().pop_front() {
            Some(response) => response,
            None if self.pending_forever => Ok(Operation::pending(operation.name.clone())),
            None => Err(StudioError::UnexpectedResponse(
                "no scripted status left".into(),
            )),
        }
    }

    async fn download(&self, artifact: &GeneratedArtifact) -> Result<Vec<u8>> {
        self.downloads.lock().unwrap().push(artifact.uri.clone());
        self.download_response
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(b"video-bytes".to_vec()))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
