use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::LlmClient;
use crate::presentation::config::{LlmProvider, LlmSettings};

use super::gemini_client::GeminiClient;
use super::openai_client::OpenAiClient;

#[derive(Debug, thiserror::Error)]
pub enum LlmClientFactoryError {
    #[error("api_key is required for the {0:?} provider")]
    MissingApiKey(LlmProvider),
    #[error("model must not be empty for the {0:?} provider")]
    MissingModel(LlmProvider),
}

pub struct LlmClientFactory;

impl LlmClientFactory {
    pub fn create(settings: &LlmSettings) -> Result<Arc<dyn LlmClient>, LlmClientFactoryError> {
        let api_key = settings
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(LlmClientFactoryError::MissingApiKey(settings.provider))?;

        let model = settings.model_or_default();
        if model.trim().is_empty() {
            return Err(LlmClientFactoryError::MissingModel(settings.provider));
        }

        let base_url = settings.base_url_or_default();
        let timeout = Duration::from_secs(settings.timeout_secs);

        match settings.provider {
            LlmProvider::Gemini => {
                tracing::info!(model = %model, base_url = %base_url, "Configuring Gemini backend");
                Ok(Arc::new(
                    GeminiClient::new(&base_url, api_key, &model, timeout)
                        .with_temperature(settings.temperature),
                ))
            }
            LlmProvider::OpenAi => {
                tracing::info!(model = %model, base_url = %base_url, "Configuring OpenAI backend");
                Ok(Arc::new(
                    OpenAiClient::new(&base_url, api_key, &model, timeout)
                        .with_temperature(settings.temperature),
                ))
            }
        }
    }
}
