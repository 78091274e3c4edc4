use anyhow::Result;
use async_trait::async_trait;

/// The opaque external collaborator: one text-in, text-out call.
/// Everything the pipeline asks of the verdict service — toxicity judgment,
/// consensus summarization — goes through this single method, so tests can
/// substitute a canned implementation.
#[async_trait]
pub trait VerdictModel: Send + Sync {
    async fn generate(&self, prompt: &str, system: &str) -> Result<String>;
}
