use std::time::Duration;

use crate::application::ports::FileLoaderError;

pub const DEFAULT_EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs a parser off the async workers. Timeouts, panics and join errors
/// all surface as `ExtractionFailed`.
pub async fn run_blocking<T, F>(
    timeout: Duration,
    label: &'static str,
    task: F,
) -> Result<T, FileLoaderError>
where
    F: FnOnce() -> Result<T, FileLoaderError> + Send + 'static,
    T: Send + 'static,
{
    tokio::time::timeout(timeout, tokio::task::spawn_blocking(task))
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed(format!("{label} extraction timed out")))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))?
}
