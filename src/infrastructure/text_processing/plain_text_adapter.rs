use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{FileKind, UploadedFile};

pub struct PlainTextAdapter;

#[async_trait]
impl FileLoader for PlainTextAdapter {
    fn name(&self) -> &'static str {
        "utf8_decode"
    }

    async fn extract_text(&self, file: &UploadedFile) -> Result<String, FileLoaderError> {
        if file.kind() != Some(FileKind::Text) {
            return Err(FileLoaderError::UnsupportedContentType(file.name.clone()));
        }

        String::from_utf8(file.bytes.clone())
            .map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))
    }
}
