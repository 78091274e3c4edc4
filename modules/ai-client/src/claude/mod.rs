mod client;
pub(crate) mod types;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::traits::VerdictModel;
use client::ClaudeClient;
use types::*;

// =============================================================================
// Claude verdict service
// =============================================================================

#[derive(Clone)]
pub struct Claude {
    api_key: String,
    model: String,
    http: reqwest::Client,
    base_url: Option<String>,
}

impl Claude {
    /// The caller supplies the shared `reqwest::Client` session so several
    /// in-flight pipeline runs reuse one connection pool.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            http,
            base_url: None,
        }
    }

    pub fn from_env(model: impl Into<String>, http: reqwest::Client) -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| anyhow!("ANTHROPIC_API_KEY environment variable not set"))?;
        Ok(Self::new(api_key, model, http))
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn client(&self) -> ClaudeClient {
        let client = ClaudeClient::new(&self.api_key, self.http.clone());
        if let Some(ref url) = self.base_url {
            client.with_base_url(url)
        } else {
            client
        }
    }
}

#[async_trait]
impl VerdictModel for Claude {
    async fn generate(&self, prompt: &str, system: &str) -> Result<String> {
        let request = ChatRequest::new(&self.model)
            .system(system)
            .message(WireMessage::user(prompt))
            .temperature(0.1);

        let response = self.client().chat(&request).await?;

        response
            .text()
            .ok_or_else(|| anyhow!("No text content in Claude response"))
    }
}
