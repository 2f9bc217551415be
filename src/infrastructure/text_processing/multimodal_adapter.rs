use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError, LlmClient};
use crate::application::services::DocumentIntelligenceService;
use crate::domain::UploadedFile;

/// Fallback extractor that sends the original bytes to the multimodal backend.
pub struct MultimodalAdapter<L: ?Sized>
where
    L: LlmClient,
{
    intelligence: Arc<DocumentIntelligenceService<L>>,
}

impl<L: ?Sized> MultimodalAdapter<L>
where
    L: LlmClient,
{
    pub fn new(intelligence: Arc<DocumentIntelligenceService<L>>) -> Self {
        Self { intelligence }
    }
}

#[async_trait]
impl<L: ?Sized> FileLoader for MultimodalAdapter<L>
where
    L: LlmClient + 'static,
{
    fn name(&self) -> &'static str {
        "multimodal_backend"
    }

    async fn extract_text(&self, file: &UploadedFile) -> Result<String, FileLoaderError> {
        let media_type = file.media_type();
        let text = self
            .intelligence
            .extract_from_file(&file.name, &file.bytes, media_type.as_deref())
            .await;

        if text.is_empty() {
            return Err(FileLoaderError::NoTextFound(file.name.clone()));
        }

        Ok(text)
    }
}
