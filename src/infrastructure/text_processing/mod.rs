mod blocking;
mod docx_adapter;
mod extractor_factory;
mod multimodal_adapter;
mod pdf_adapter;
mod plain_text_adapter;
mod spreadsheet_adapter;

pub use blocking::{DEFAULT_EXTRACTION_TIMEOUT, run_blocking};
pub use docx_adapter::DocxAdapter;
pub use extractor_factory::ExtractorFactory;
pub use multimodal_adapter::MultimodalAdapter;
pub use pdf_adapter::PdfAdapter;
pub use plain_text_adapter::PlainTextAdapter;
pub use spreadsheet_adapter::{SpreadsheetAdapter, render_table};
