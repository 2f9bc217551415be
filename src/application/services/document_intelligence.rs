use std::sync::Arc;

use crate::application::ports::{ContentPart, GenerationRequest, LlmClient};
use crate::domain::{AnalysisResult, AnalysisShape, DocumentType};

use super::prompts::{
    CLASSIFICATION_PROMPT, EXTRACTED_DATA_ANALYSIS_PROMPT, FILE_EXTRACTION_PROMPT,
    IMAGE_EXTRACTION_PROMPT, KEY_POINTS_ANALYSIS_PROMPT,
};
use super::response_parser::{parse_analysis, parse_classification};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_CLASSIFICATION_PREFIX_CHARS: usize = 4000;
const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Classification, analysis and multimodal text extraction against a
/// generative backend. Every operation returns a value; backend failures
/// degrade to documented defaults.
pub struct DocumentIntelligenceService<L: ?Sized>
where
    L: LlmClient,
{
    llm_client: Arc<L>,
    max_attempts: u32,
    classification_prefix_chars: usize,
    analysis_shape: AnalysisShape,
}

impl<L: ?Sized> DocumentIntelligenceService<L>
where
    L: LlmClient,
{
    pub fn new(llm_client: Arc<L>) -> Self {
        Self {
            llm_client,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            classification_prefix_chars: DEFAULT_CLASSIFICATION_PREFIX_CHARS,
            analysis_shape: AnalysisShape::default(),
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_classification_prefix_chars(mut self, chars: usize) -> Self {
        self.classification_prefix_chars = chars;
        self
    }

    pub fn with_analysis_shape(mut self, shape: AnalysisShape) -> Self {
        self.analysis_shape = shape;
        self
    }

    pub fn analysis_shape(&self) -> AnalysisShape {
        self.analysis_shape
    }

    #[tracing::instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn classify(&self, text: &str) -> DocumentType {
        tracing::info!("Classifying document type");
        let snippet: String = text.chars().take(self.classification_prefix_chars).collect();
        let request = GenerationRequest::new(CLASSIFICATION_PROMPT)
            .with_text(snippet)
            .json();

        match self.generate_with_retry(&request, "classification").await {
            Some(raw) => {
                let doc_type = parse_classification(&raw);
                tracing::info!(document_type = %doc_type, "Classification complete");
                doc_type
            }
            None => DocumentType::GeneralDocument,
        }
    }

    #[tracing::instrument(skip(self, text, type_hint), fields(text_len = text.len(), hint = %type_hint))]
    pub async fn analyze(&self, text: &str, type_hint: DocumentType) -> AnalysisResult {
        tracing::info!("Analyzing document");
        let prompt = match self.analysis_shape {
            AnalysisShape::KeyPoints => KEY_POINTS_ANALYSIS_PROMPT,
            AnalysisShape::ExtractedData => EXTRACTED_DATA_ANALYSIS_PROMPT,
        };
        let request = GenerationRequest::new(prompt)
            .with_text(format!("Document type hint: {type_hint}."))
            .with_text(text)
            .json();

        match self.generate_with_retry(&request, "analysis").await {
            Some(raw) => parse_analysis(&raw, type_hint, self.analysis_shape),
            None => AnalysisResult::failed(type_hint, self.analysis_shape),
        }
    }

    /// Single attempt; an empty string means nothing could be recovered.
    #[tracing::instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn extract_from_file(
        &self,
        file_name: &str,
        bytes: &[u8],
        media_type: Option<&str>,
    ) -> String {
        if bytes.is_empty() {
            tracing::warn!("Refusing multimodal extraction of an empty file");
            return String::new();
        }

        let media_type = media_type
            .map(str::to_string)
            .or_else(|| {
                mime_guess::from_path(file_name)
                    .first()
                    .map(|m| m.essence_str().to_string())
            })
            .unwrap_or_else(|| FALLBACK_MEDIA_TYPE.to_string())
            .trim()
            .to_ascii_lowercase();

        tracing::info!(media_type = %media_type, "Extracting text with multimodal backend");

        let request = if media_type.starts_with("image/") {
            if let Err(e) = decode_image(bytes.to_vec()).await {
                tracing::error!(error = %e, "Failed to decode image");
                return String::new();
            }
            GenerationRequest::new(IMAGE_EXTRACTION_PROMPT).with_part(ContentPart::Image {
                mime_type: media_type,
                data: bytes.to_vec(),
            })
        } else {
            GenerationRequest::new(FILE_EXTRACTION_PROMPT).with_part(ContentPart::File {
                file_name: file_name.to_string(),
                mime_type: media_type,
                data: bytes.to_vec(),
            })
        };

        match self.llm_client.generate(&request).await {
            Ok(text) => {
                let text = text.trim().to_string();
                tracing::info!(text_len = text.len(), "Multimodal extraction complete");
                text
            }
            Err(e) => {
                tracing::error!(error = %e, "Multimodal extraction failed");
                String::new()
            }
        }
    }

    async fn generate_with_retry(&self, request: &GenerationRequest, operation: &str) -> Option<String> {
        for attempt in 1..=self.max_attempts {
            tracing::info!(attempt, operation, "Sending request to backend");
            match self.llm_client.generate(request).await {
                Ok(raw) => return Some(raw),
                Err(e) => tracing::warn!(attempt, operation, error = %e, "Backend attempt failed"),
            }
        }
        tracing::error!(
            operation,
            attempts = self.max_attempts,
            "All backend attempts failed"
        );
        None
    }
}

async fn decode_image(data: Vec<u8>) -> Result<(), String> {
    tokio::task::spawn_blocking(move || {
        image::load_from_memory(&data)
            .map(|_| ())
            .map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| format!("task join error: {e}"))?
}
