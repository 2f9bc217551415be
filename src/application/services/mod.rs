mod document_intelligence;
mod document_pipeline;
mod extraction_chain;
pub mod prompts;
mod response_parser;

pub use document_intelligence::{
    DEFAULT_CLASSIFICATION_PREFIX_CHARS, DEFAULT_MAX_ATTEMPTS, DocumentIntelligenceService,
};
pub use document_pipeline::{DocumentPipeline, DocumentReport, PipelineError};
pub use extraction_chain::ExtractionChain;
pub use response_parser::{parse_analysis, parse_classification};
