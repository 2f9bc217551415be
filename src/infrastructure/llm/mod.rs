mod gemini_client;
mod http_client;
mod lazy_llm_client;
mod llm_client_factory;
mod openai_client;

pub use gemini_client::GeminiClient;
pub use lazy_llm_client::LazyLlmClient;
pub use llm_client_factory::{LlmClientFactory, LlmClientFactoryError};
pub use openai_client::OpenAiClient;
