mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ExtractionSettings, IntelligenceSettings, LlmProvider, LlmSettings, LoggingSettings, Settings,
};
