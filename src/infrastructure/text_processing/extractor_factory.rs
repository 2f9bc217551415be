use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::FileLoader;
use crate::application::services::ExtractionChain;
use crate::domain::FileKind;
use crate::presentation::config::ExtractionSettings;

use super::docx_adapter::DocxAdapter;
use super::pdf_adapter::PdfAdapter;
use super::plain_text_adapter::PlainTextAdapter;
use super::spreadsheet_adapter::SpreadsheetAdapter;

pub struct ExtractorFactory;

impl ExtractorFactory {
    /// Registers the native extractor for every kind that has one.
    pub fn create(settings: &ExtractionSettings, fallback: Arc<dyn FileLoader>) -> ExtractionChain {
        let timeout = Duration::from_secs(settings.timeout_secs);
        tracing::info!(
            timeout_secs = settings.timeout_secs,
            fallback = fallback.name(),
            "Building extraction chain"
        );

        let pdf: Arc<dyn FileLoader> = Arc::new(PdfAdapter::new().with_timeout(timeout));
        let docx: Arc<dyn FileLoader> = Arc::new(DocxAdapter::new().with_timeout(timeout));
        let text: Arc<dyn FileLoader> = Arc::new(PlainTextAdapter);
        let spreadsheet: Arc<dyn FileLoader> =
            Arc::new(SpreadsheetAdapter::new().with_timeout(timeout));

        ExtractionChain::new(
            vec![
                (FileKind::Pdf, pdf),
                (FileKind::Docx, docx),
                (FileKind::Text, text),
                (FileKind::Xlsx, Arc::clone(&spreadsheet)),
                (FileKind::Csv, spreadsheet),
            ],
            fallback,
        )
    }
}
