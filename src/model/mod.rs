//! Model client module: the seam to the remote generative-language service.
//!
//! The [`TextModel`] trait is the injectable capability the rest of the
//! backend depends on; [`client::GeminiClient`] is the real implementation
//! and [`mock::MockModel`] the test double.

pub mod client;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

pub use client::GeminiClient;

/// Errors raised by the remote model call.
#[derive(Error, Debug)]
pub enum ModelError {
    /// No model client was constructed at startup.
    #[error("AI model failed to initialize due to missing or invalid API key")]
    NotInitialized,

    /// The provider returned a non-success status.
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status returned by the provider.
        status: u16,
        /// Error body returned by the provider.
        message: String,
    },

    /// The outbound request itself failed.
    #[error("network error: {0}")]
    Network(String),

    /// The provider replied with a body we could not decode.
    #[error("invalid response from model: {0}")]
    InvalidResponse(String),

    /// The provider replied successfully but produced no text.
    #[error("empty response from model")]
    EmptyResponse,
}

impl ModelError {
    /// Whether this is a failure of the remote provider (as opposed to an
    /// unexpected local one). Provider failures map to HTTP 503; everything
    /// else maps to 500.
    pub fn is_provider(&self) -> bool {
        matches!(self, ModelError::Api { .. } | ModelError::Network(_))
    }
}

/// A handle to a remote text-generation model bound to one fixed model
/// identifier and one credential.
///
/// Shared read-only across all concurrent requests; implementations must not
/// require mutation after construction.
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Generate text for `prompt`, with `system_instruction` on the separate
    /// instruction channel. When `web_search` is set the model may issue live
    /// web searches to ground its answer and cite links.
    async fn generate(
        &self,
        prompt: &str,
        system_instruction: &str,
        web_search: bool,
    ) -> Result<String, ModelError>;

    /// The fixed model identifier this client is bound to.
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_classification() {
        assert!(ModelError::Api {
            status: 503,
            message: "overloaded".to_string()
        }
        .is_provider());
        assert!(ModelError::Network("connection refused".to_string()).is_provider());

        assert!(!ModelError::NotInitialized.is_provider());
        assert!(!ModelError::EmptyResponse.is_provider());
        assert!(!ModelError::InvalidResponse("bad json".to_string()).is_provider());
    }
}
