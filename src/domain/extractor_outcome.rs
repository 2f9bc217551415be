use crate::application::ports::FileLoaderError;

/// Result of a single extraction attempt, used to decide whether to fall back.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractorOutcome {
    Success(String),
    EmptyResult,
    Failure(String),
}

impl ExtractorOutcome {
    pub fn from_result(result: Result<String, FileLoaderError>) -> Self {
        match result {
            Ok(text) if text.trim().is_empty() => Self::EmptyResult,
            Ok(text) => Self::Success(text),
            Err(FileLoaderError::NoTextFound(_)) => Self::EmptyResult,
            Err(e) => Self::Failure(e.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Success(text) => text,
            Self::EmptyResult | Self::Failure(_) => String::new(),
        }
    }
}
