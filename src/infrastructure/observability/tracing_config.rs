use crate::presentation::config::LoggingSettings;

/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
        }
    }
}

impl TracingConfig {
    pub fn from_settings(logging: &LoggingSettings, environment: impl Into<String>) -> Self {
        let defaults = Self::default();
        Self {
            environment: environment.into(),
            json_format: logging.json || defaults.json_format,
        }
    }
}
