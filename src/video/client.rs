//! Remote video service trait.

use crate::error::Result;
use crate::video::types::{GenerateVideosConfig, GeneratedArtifact, Operation};
use async_trait::async_trait;

/// Capabilities of a remote video generation service.
///
/// The generation pipeline only talks to the remote side through this trait,
/// so tests can drive it with a scripted implementation.
#[async_trait]
pub trait VideoClient: Send + Sync {
    /// Submits a generation job and returns its first snapshot.
    async fn submit(
        &self,
        model: &str,
        prompt: &str,
        config: &GenerateVideosConfig,
    ) -> Result<Operation>;

    /// Fetches a fresh snapshot of the given job.
    async fn get_operation(&self, operation: &Operation) -> Result<Operation>;

    /// Downloads the bytes behind an artifact reference.
    async fn download(&self, artifact: &GeneratedArtifact) -> Result<Vec<u8>>;

    /// Returns the name of this client for display.
    fn name(&self) -> &str;

    /// Checks if the service is reachable and the credentials are accepted.
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
