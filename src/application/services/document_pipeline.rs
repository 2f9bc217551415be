use std::sync::Arc;

use serde::Serialize;

use crate::application::ports::LlmClient;
use crate::domain::{AnalysisResult, DocumentType, FileKind, UploadedFile};

use super::document_intelligence::DocumentIntelligenceService;
use super::extraction_chain::ExtractionChain;

/// Extraction, classification and analysis of one upload, strictly in that order.
pub struct DocumentPipeline<L: ?Sized>
where
    L: LlmClient,
{
    extraction_chain: Arc<ExtractionChain>,
    intelligence: Arc<DocumentIntelligenceService<L>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub filename: String,
    pub document_type: DocumentType,
    pub analysis: AnalysisResult,
}

impl<L: ?Sized> DocumentPipeline<L>
where
    L: LlmClient,
{
    pub fn new(
        extraction_chain: Arc<ExtractionChain>,
        intelligence: Arc<DocumentIntelligenceService<L>>,
    ) -> Self {
        Self {
            extraction_chain,
            intelligence,
        }
    }

    /// Rejects names whose extension the chain cannot dispatch.
    pub fn validate(file: &UploadedFile) -> Result<FileKind, PipelineError> {
        file.kind().ok_or_else(|| {
            PipelineError::UnsupportedFileType {
                filename: file.name.clone(),
                allowed: FileKind::supported_extensions().join(", "),
            }
        })
    }

    #[tracing::instrument(skip(self, file), fields(filename = %file.name))]
    pub async fn process(&self, file: UploadedFile) -> Result<DocumentReport, PipelineError> {
        Self::validate(&file)?;

        let text = self.extraction_chain.extract(&file).await;
        tracing::info!(text_len = text.len(), "Extraction finished");
        if text.trim().is_empty() {
            return Err(PipelineError::NoTextExtracted(file.name));
        }

        let document_type = self.intelligence.classify(&text).await;
        let analysis = self.intelligence.analyze(&text, document_type).await;

        Ok(DocumentReport {
            filename: file.name,
            document_type,
            analysis,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("unsupported file type: {filename}. Allowed types: {allowed}")]
    UnsupportedFileType { filename: String, allowed: String },
    #[error("failed to extract text from {0}")]
    NoTextExtracted(String),
}
