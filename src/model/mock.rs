//! Mock model client for unit testing.
//!
//! This module provides a mock client that can be used in tests
//! without making real network requests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{ModelError, TextModel};

/// Configuration for mock model behavior.
#[derive(Debug, Clone)]
pub struct MockModelConfig {
    /// Text to return on success.
    pub response: String,
    /// Whether to fail with a provider error.
    pub fail_provider: bool,
    /// Whether to fail with an unexpected (non-provider) error.
    pub fail_unexpected: bool,
    /// Simulated latency in milliseconds.
    pub latency_ms: u64,
}

impl Default for MockModelConfig {
    fn default() -> Self {
        Self {
            response: "Week 1: Day 1 - push-ups 3x10".to_string(),
            fail_provider: false,
            fail_unexpected: false,
            latency_ms: 0,
        }
    }
}

/// One recorded call to the mock model.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// The prompt sent as primary content.
    pub prompt: String,
    /// The system instruction channel.
    pub system_instruction: String,
    /// Whether search grounding was requested.
    pub web_search: bool,
}

/// Mock model client for testing.
#[derive(Debug, Clone)]
pub struct MockModel {
    /// Mock configuration.
    config: MockModelConfig,
    /// Calls received, for assertions.
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    /// Model identifier to report.
    model: String,
}

impl MockModel {
    /// Create a mock that returns the given text.
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_config(MockModelConfig {
            response: response.into(),
            ..Default::default()
        })
    }

    /// Create a mock client with custom configuration.
    pub fn with_config(config: MockModelConfig) -> Self {
        Self {
            config,
            calls: Arc::new(Mutex::new(Vec::new())),
            model: "gemini-2.5-flash".to_string(),
        }
    }

    /// Create a mock that always fails with a provider error carrying the
    /// given message.
    pub fn failing_provider(message: impl Into<String>) -> Self {
        Self::with_config(MockModelConfig {
            response: message.into(),
            fail_provider: true,
            ..Default::default()
        })
    }

    /// Create a mock that always fails with an unexpected error.
    pub fn failing_unexpected() -> Self {
        Self::with_config(MockModelConfig {
            fail_unexpected: true,
            ..Default::default()
        })
    }

    /// Calls received so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TextModel for MockModel {
    async fn generate(
        &self,
        prompt: &str,
        system_instruction: &str,
        web_search: bool,
    ) -> Result<String, ModelError> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.to_string(),
            system_instruction: system_instruction.to_string(),
            web_search,
        });

        if self.config.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.config.latency_ms)).await;
        }

        if self.config.fail_provider {
            return Err(ModelError::Api {
                status: 503,
                message: self.config.response.clone(),
            });
        }

        if self.config.fail_unexpected {
            return Err(ModelError::InvalidResponse(
                "mock unexpected failure".to_string(),
            ));
        }

        Ok(self.config.response.clone())
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
