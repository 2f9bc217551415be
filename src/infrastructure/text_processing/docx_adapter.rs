use std::io::{Cursor, Read};
use std::time::Duration;

use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{FileKind, UploadedFile};

use super::blocking::{DEFAULT_EXTRACTION_TIMEOUT, run_blocking};

const DOCUMENT_PART: &str = "word/document.xml";

/// Collects paragraph text runs from the main document part.
pub struct DocxAdapter {
    timeout: Duration,
}

impl Default for DocxAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxAdapter {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_EXTRACTION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn read_document_xml(data: &[u8]) -> Result<String, FileLoaderError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(data))
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("not a DOCX archive: {e}")))?;

        let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("missing {DOCUMENT_PART}: {e}"))
        })?;

        let mut xml = String::new();
        part.read_to_string(&mut xml).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to read {DOCUMENT_PART}: {e}"))
        })?;

        Ok(xml)
    }

    pub(crate) fn paragraphs(xml: &str) -> Result<Vec<String>, FileLoaderError> {
        let mut reader = Reader::from_str(xml);
        let mut paragraphs = Vec::new();
        let mut current = String::new();
        let mut in_text = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text = true,
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"w:t" => in_text = false,
                    b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                    _ => {}
                },
                Ok(Event::Empty(e)) => match e.name().as_ref() {
                    b"w:tab" => current.push('\t'),
                    b"w:br" | b"w:cr" => current.push('\n'),
                    b"w:p" => paragraphs.push(String::new()),
                    _ => {}
                },
                Ok(Event::Text(t)) if in_text => {
                    let text = t.unescape().map_err(|e| {
                        FileLoaderError::ExtractionFailed(format!("invalid DOCX text: {e}"))
                    })?;
                    current.push_str(&text);
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(FileLoaderError::ExtractionFailed(format!(
                        "malformed DOCX XML at {}: {e}",
                        reader.buffer_position()
                    )));
                }
                _ => {}
            }
        }

        Ok(paragraphs)
    }
}

#[async_trait]
impl FileLoader for DocxAdapter {
    fn name(&self) -> &'static str {
        "docx_paragraphs"
    }

    #[tracing::instrument(skip(self, file), fields(filename = %file.name))]
    async fn extract_text(&self, file: &UploadedFile) -> Result<String, FileLoaderError> {
        if file.kind() != Some(FileKind::Docx) {
            return Err(FileLoaderError::UnsupportedContentType(file.name.clone()));
        }

        let data = file.bytes.clone();
        let paragraphs = run_blocking(self.timeout, "DOCX", move || {
            let xml = Self::read_document_xml(&data)?;
            Self::paragraphs(&xml)
        })
        .await?;

        tracing::info!(paragraph_count = paragraphs.len(), "DOCX text extraction complete");

        let text = paragraphs.join("\n");
        if text.trim().is_empty() {
            return Err(FileLoaderError::NoTextFound(file.name.clone()));
        }

        Ok(text)
    }
}
