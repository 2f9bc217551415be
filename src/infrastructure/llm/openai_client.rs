use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::application::ports::{
    ContentPart, GenerationRequest, LlmClient, LlmClientError, ResponseFormat,
};
use super::http_client::build_http_client;
use crate::infrastructure::observability::truncate_for_log;

/// OpenAI-compatible chat completions backend.
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    completion_model: String,
    temperature: f32,
}

impl OpenAiClient {
    pub fn new(base_url: &str, api_key: &str, completion_model: &str, timeout: Duration) -> Self {
        let client = build_http_client("openai", timeout);
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            completion_model: completion_model.to_string(),
            temperature: 0.2,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn user_content(request: &GenerationRequest) -> Value {
        let only_text = request
            .content
            .iter()
            .all(|p| matches!(p, ContentPart::Text(_)));
        if only_text {
            return Value::String(request.user_text());
        }

        let parts: Vec<Value> = request
            .content
            .iter()
            .map(|part| match part {
                ContentPart::Text(text) => json!({ "type": "text", "text": text }),
                ContentPart::Image { mime_type, data } => json!({
                    "type": "image_url",
                    "image_url": { "url": data_uri(mime_type, data) }
                }),
                ContentPart::File {
                    file_name,
                    mime_type,
                    data,
                } => json!({
                    "type": "file",
                    "file": {
                        "filename": file_name,
                        "file_data": data_uri(mime_type, data),
                    }
                }),
            })
            .collect();
        Value::Array(parts)
    }
}

fn data_uri(mime_type: &str, data: &[u8]) -> String {
    format!(
        "data:{mime_type};base64,{}",
        general_purpose::STANDARD.encode(data)
    )
}

#[async_trait]
impl LlmClient for OpenAiClient {
    #[tracing::instrument(skip(self, request), fields(model = %self.completion_model, parts = request.content.len()))]
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmClientError> {
        let mut body = json!({
            "model": self.completion_model,
            "messages": [
                { "role": "system", "content": request.instructions },
                { "role": "user", "content": Self::user_content(request) }
            ],
            "temperature": self.temperature,
        });
        if request.response_format == ResponseFormat::Json {
            body["response_format"] = json!({ "type": "json_object" });
        }

        let url = format!("{}/v1/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {status}: {}",
                truncate_for_log(&text)
            )));
        }

        let raw_bytes = response
            .bytes()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(format!("read error: {e}")))?;

        let completion: ChatCompletion = serde_json::from_slice(&raw_bytes).map_err(|e| {
            let raw_text = String::from_utf8_lossy(&raw_bytes);
            tracing::error!(raw_response = %truncate_for_log(&raw_text), "Failed to parse OpenAI JSON");
            LlmClientError::InvalidResponse(e.to_string())
        })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.unwrap_or_default())
            .ok_or_else(|| LlmClientError::InvalidResponse("no choices returned".to_string()))?;

        tracing::debug!(response = %truncate_for_log(&content), "OpenAI response received");
        Ok(content)
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}
