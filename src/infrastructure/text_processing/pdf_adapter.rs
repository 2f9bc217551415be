use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{FileKind, UploadedFile};

use super::blocking::{DEFAULT_EXTRACTION_TIMEOUT, run_blocking};

/// Reads the digital text layer page by page.
pub struct PdfAdapter {
    timeout: Duration,
}

impl Default for PdfAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfAdapter {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_EXTRACTION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn extract_pages(path: &std::path::Path) -> Result<Vec<String>, FileLoaderError> {
        let mut doc = PdfDocument::open(path)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        let page_count = doc.page_count().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to read page count: {e}"))
        })?;

        let mut pages = Vec::with_capacity(page_count);

        for page_index in 0..page_count {
            match doc.extract_text(page_index) {
                Ok(text) => pages.push(text),
                Err(e) => tracing::debug!(page_index, error = %e, "Page has no readable text layer"),
            }
        }

        Ok(pages)
    }
}

#[async_trait]
impl FileLoader for PdfAdapter {
    fn name(&self) -> &'static str {
        "pdf_text_layer"
    }

    #[tracing::instrument(skip(self, file), fields(filename = %file.name))]
    async fn extract_text(&self, file: &UploadedFile) -> Result<String, FileLoaderError> {
        if file.kind() != Some(FileKind::Pdf) {
            return Err(FileLoaderError::UnsupportedContentType(file.name.clone()));
        }

        let mut temp_file = tempfile::NamedTempFile::new().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to create temp file: {e}"))
        })?;

        temp_file.write_all(&file.bytes).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to write temp file: {e}"))
        })?;

        let temp_path = temp_file.path().to_path_buf();

        let pages = run_blocking(self.timeout, "PDF", move || {
            Self::extract_pages(&temp_path)
        })
        .await?;

        tracing::info!(page_count = pages.len(), "PDF text extraction complete");

        let text = pages.join("\n");
        if text.trim().is_empty() {
            return Err(FileLoaderError::NoTextFound(file.name.clone()));
        }

        Ok(text)
    }
}
