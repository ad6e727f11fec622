//! Text-completion backends.

mod openai;

use async_trait::async_trait;
use thiserror::Error;

pub use memsentry_core::Completion;
pub use openai::{OpenAiClient, OpenAiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Errors raised by a completion backend.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Failed to make HTTP request: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse completion response: {0}")]
    Parse(String),
}

/// A service that turns one prompt into one completion.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<Completion, ServiceError>;

    /// Model identifier used for requests.
    fn model(&self) -> &str;
}
