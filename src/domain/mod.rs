mod analysis;
mod document_type;
mod extractor_outcome;
mod file_kind;
mod uploaded_file;

pub use analysis::{AnalysisResult, AnalysisShape, FAILED_SUMMARY, RAW_OUTPUT_KEY};
pub use document_type::DocumentType;
pub use extractor_outcome::ExtractorOutcome;
pub use file_kind::FileKind;
pub use uploaded_file::UploadedFile;
