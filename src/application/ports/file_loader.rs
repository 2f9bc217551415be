use async_trait::async_trait;

use crate::domain::UploadedFile;

/// One extraction strategy. Implementations never see files of a kind they
/// were not registered for, but still reject them defensively.
#[async_trait]
pub trait FileLoader: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &'static str {
        "extractor"
    }

    async fn extract_text(&self, file: &UploadedFile) -> Result<String, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("no text found in {0}")]
    NoTextFound(String),
}
