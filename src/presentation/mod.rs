pub mod config;

pub use config::{Environment, LlmProvider, Settings};
