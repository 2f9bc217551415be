use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::application::ports::{GenerationRequest, LlmClient, LlmClientError};
use crate::presentation::config::LlmSettings;

use super::llm_client_factory::LlmClientFactory;

/// Builds the configured backend on first use. A configuration failure
/// fails only the call that hit it and is retried on the next call.
pub struct LazyLlmClient {
    settings: LlmSettings,
    client: OnceCell<Arc<dyn LlmClient>>,
}

impl LazyLlmClient {
    pub fn new(settings: LlmSettings) -> Self {
        Self {
            settings,
            client: OnceCell::new(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.client.initialized()
    }

    async fn client(&self) -> Result<&Arc<dyn LlmClient>, LlmClientError> {
        self.client
            .get_or_try_init(|| async {
                LlmClientFactory::create(&self.settings).map_err(|e| {
                    tracing::error!(error = %e, "Backend client is not configured");
                    LlmClientError::NotConfigured(e.to_string())
                })
            })
            .await
    }
}

#[async_trait]
impl LlmClient for LazyLlmClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmClientError> {
        self.client().await?.generate(request).await
    }
}
