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

pub const FILE_POLL_TIMEOUT: Duration = Duration::from_secs(120);
pub const INITIAL_POLL_BACKOFF: Duration = Duration::from_millis(500);
pub const MAX_POLL_BACKOFF: Duration = Duration::from_secs(10);

/// Google Generative Language REST backend.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl GeminiClient {
    pub fn new(base_url: &str, api_key: &str, model: &str, timeout: Duration) -> Self {
        let client = build_http_client("gemini", timeout);
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            temperature: 0.2,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    async fn build_part(&self, part: &ContentPart) -> Result<Value, LlmClientError> {
        match part {
            ContentPart::Text(text) => Ok(json!({ "text": text })),
            ContentPart::Image { mime_type, data } => Ok(json!({
                "inlineData": {
                    "mimeType": mime_type,
                    "data": general_purpose::STANDARD.encode(data),
                }
            })),
            ContentPart::File {
                file_name,
                mime_type,
                data,
            } => {
                let file = self.upload_file(file_name, mime_type, data).await?;
                Ok(json!({
                    "fileData": {
                        "mimeType": file.mime_type.unwrap_or_else(|| mime_type.clone()),
                        "fileUri": file.uri,
                    }
                }))
            }
        }
    }

    /// Resumable upload in one chunk: start the session, then upload and finalize.
    async fn upload_file(
        &self,
        file_name: &str,
        mime_type: &str,
        data: &[u8],
    ) -> Result<UploadedFileRef, LlmClientError> {
        tracing::debug!(file_name, mime_type, size = data.len(), "Starting Gemini file upload");

        let start_url = format!("{}/upload/v1beta/files", self.base_url);
        let response = self
            .client
            .post(&start_url)
            .header("x-goog-api-key", &self.api_key)
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header("X-Goog-Upload-Header-Content-Length", data.len().to_string())
            .header("X-Goog-Upload-Header-Content-Type", mime_type)
            .json(&json!({ "file": { "display_name": file_name } }))
            .send()
            .await
            .map_err(|e| LlmClientError::UploadFailed(format!("upload start failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(LlmClientError::UploadFailed(format!(
                "upload start returned {status}: {}",
                truncate_for_log(&text)
            )));
        }

        let upload_url = response
            .headers()
            .get("x-goog-upload-url")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                LlmClientError::UploadFailed("response missing x-goog-upload-url header".to_string())
            })?
            .to_string();

        let response = self
            .client
            .post(&upload_url)
            .header("X-Goog-Upload-Offset", "0")
            .header("X-Goog-Upload-Command", "upload, finalize")
            .body(data.to_vec())
            .send()
            .await
            .map_err(|e| LlmClientError::UploadFailed(format!("upload failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(LlmClientError::UploadFailed(format!(
                "upload returned {status}: {}",
                truncate_for_log(&text)
            )));
        }

        let uploaded: FileEnvelope = response
            .json()
            .await
            .map_err(|e| LlmClientError::UploadFailed(format!("upload response parse failed: {e}")))?;

        self.wait_until_active(uploaded.file).await
    }

    async fn wait_until_active(
        &self,
        file: UploadedFileRef,
    ) -> Result<UploadedFileRef, LlmClientError> {
        if file.is_active() {
            return Ok(file);
        }

        let name = file.name.clone().ok_or_else(|| {
            LlmClientError::UploadFailed("uploaded file has no resource name".to_string())
        })?;
        let url = format!("{}/v1beta/{}", self.base_url, name);

        let poll_future = async {
            let mut backoff = INITIAL_POLL_BACKOFF;
            loop {
                tokio::time::sleep(backoff).await;
                backoff = (backoff * 2).min(MAX_POLL_BACKOFF);

                let response = self
                    .client
                    .get(&url)
                    .header("x-goog-api-key", &self.api_key)
                    .send()
                    .await
                    .map_err(|e| LlmClientError::UploadFailed(format!("file poll failed: {e}")))?;

                if !response.status().is_success() {
                    let status = response.status();
                    return Err(LlmClientError::UploadFailed(format!(
                        "file poll returned {status}"
                    )));
                }

                let polled: UploadedFileRef = response.json().await.map_err(|e| {
                    LlmClientError::UploadFailed(format!("file poll parse failed: {e}"))
                })?;

                if polled.state.as_deref() == Some("FAILED") {
                    return Err(LlmClientError::UploadFailed(
                        "backend failed to process uploaded file".to_string(),
                    ));
                }
                if polled.is_active() {
                    return Ok(polled);
                }
                tracing::debug!(state = ?polled.state, "Uploaded file still processing");
            }
        };

        tokio::time::timeout(FILE_POLL_TIMEOUT, poll_future)
            .await
            .map_err(|_| LlmClientError::UploadFailed("uploaded file never became active".to_string()))?
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    #[tracing::instrument(skip(self, request), fields(model = %self.model, parts = request.content.len()))]
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmClientError> {
        let mut parts = Vec::with_capacity(request.content.len());
        for part in &request.content {
            parts.push(self.build_part(part).await?);
        }

        let mut generation_config = json!({ "temperature": self.temperature });
        if request.response_format == ResponseFormat::Json {
            generation_config["responseMimeType"] = json!("application/json");
        }

        let body = json!({
            "systemInstruction": { "parts": [{ "text": request.instructions }] },
            "contents": [{ "role": "user", "parts": parts }],
            "generationConfig": generation_config,
        });

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
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

        let completion: GenerateContentResponse =
            serde_json::from_slice(&raw_bytes).map_err(|e| {
                let raw_text = String::from_utf8_lossy(&raw_bytes);
                tracing::error!(raw_response = %truncate_for_log(&raw_text), "Failed to parse Gemini JSON");
                LlmClientError::InvalidResponse(e.to_string())
            })?;

        let text = completion
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .ok_or_else(|| LlmClientError::InvalidResponse("no candidates returned".to_string()))?;

        tracing::debug!(response = %truncate_for_log(&text), "Gemini response received");
        Ok(text)
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct FileEnvelope {
    file: UploadedFileRef,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadedFileRef {
    name: Option<String>,
    uri: String,
    mime_type: Option<String>,
    state: Option<String>,
}

impl UploadedFileRef {
    fn is_active(&self) -> bool {
        matches!(self.state.as_deref(), None | Some("ACTIVE"))
    }
}
