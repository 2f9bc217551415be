use std::collections::HashMap;
use std::sync::Arc;

use crate::application::ports::FileLoader;
use crate::domain::{ExtractorOutcome, FileKind, UploadedFile};

/// Dispatches an upload to the primary extractor for its file kind and
/// hands off to a single fallback extractor when the primary fails or
/// yields only whitespace. Never errors: total failure is an empty string.
pub struct ExtractionChain {
    primaries: HashMap<FileKind, Arc<dyn FileLoader>>,
    fallback: Arc<dyn FileLoader>,
}

impl ExtractionChain {
    pub fn new(
        primaries: Vec<(FileKind, Arc<dyn FileLoader>)>,
        fallback: Arc<dyn FileLoader>,
    ) -> Self {
        Self {
            primaries: primaries.into_iter().collect(),
            fallback,
        }
    }

    #[tracing::instrument(
        skip(self, file),
        fields(filename = %file.name, size = file.bytes.len())
    )]
    pub async fn extract(&self, file: &UploadedFile) -> String {
        let Some(kind) = file.kind() else {
            tracing::warn!("Unsupported file extension, skipping extraction");
            return String::new();
        };

        let primary = self.attempt_primary(kind, file).await;

        let outcome = match primary {
            ExtractorOutcome::Success(text) => {
                tracing::info!(%kind, text_len = text.len(), "Primary extraction succeeded");
                return text.trim().to_string();
            }
            outcome if !kind.allows_fallback() => {
                tracing::warn!(%kind, outcome = ?outcome, "Primary extraction failed, no fallback for this kind");
                return String::new();
            }
            outcome => outcome,
        };

        tracing::info!(
            %kind,
            reason = ?outcome,
            fallback = self.fallback.name(),
            "Falling back to secondary extraction"
        );

        let fallback = ExtractorOutcome::from_result(self.fallback.extract_text(file).await);
        match &fallback {
            ExtractorOutcome::Success(text) => {
                tracing::info!(%kind, text_len = text.len(), "Fallback extraction succeeded")
            }
            other => tracing::warn!(%kind, outcome = ?other, "Fallback extraction produced no text"),
        }

        fallback.into_text().trim().to_string()
    }

    async fn attempt_primary(&self, kind: FileKind, file: &UploadedFile) -> ExtractorOutcome {
        if !kind.has_primary_method() {
            tracing::debug!(%kind, "No native text layer for this kind");
            return ExtractorOutcome::EmptyResult;
        }

        let Some(loader) = self.primaries.get(&kind) else {
            tracing::warn!(%kind, "No primary extractor registered");
            return ExtractorOutcome::Failure(format!("no extractor registered for {kind}"));
        };

        tracing::info!(%kind, extractor = loader.name(), "Attempting primary extraction");
        ExtractorOutcome::from_result(loader.extract_text(file).await)
    }
}
