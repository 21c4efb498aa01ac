//! Gemini API client.
//!
//! Thin wrapper over the generative language REST API: one model identifier,
//! one credential, one `generateContent` call per request. Search grounding
//! is enabled by attaching the `google_search` tool.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{ModelError, TextModel};

/// Gemini API client bound to a fixed model identifier and credential.
///
/// Constructed once at startup and shared read-only by all requests.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Base URL of the generative language API.
    base_url: String,
    /// Model identifier, e.g. `gemini-2.5-flash`.
    model: String,
    /// API key. Never logged.
    api_key: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// `timeout` bounds the whole outbound call; there is no retry.
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            base_url,
            model,
            api_key,
        })
    }

    /// Build the API URL for the given method.
    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            self.base_url, self.model, method, self.api_key
        )
    }
}

#[async_trait]
impl TextModel for GeminiClient {
    #[instrument(skip(self, prompt, system_instruction), fields(model = %self.model))]
    async fn generate(
        &self,
        prompt: &str,
        system_instruction: &str,
        web_search: bool,
    ) -> Result<String, ModelError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            system_instruction: Some(SystemInstruction {
                parts: vec![Part {
                    text: Some(system_instruction.to_string()),
                }],
            }),
            tools: if web_search {
                Some(vec![Tool {
                    google_search: GoogleSearch {},
                }])
            } else {
                None
            },
        };

        debug!(
            prompt_len = prompt.len(),
            web_search, "Sending request to Gemini API"
        );

        let response = self
            .http
            .post(self.api_url("generateContent"))
            .json(&request)
            .send()
            .await
            .map_err(|e| ModelError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ModelError::Api { status, message });
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(e.to_string()))?;

        // The plan is whatever text the model returned, joined across parts.
        let text = api_response
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ModelError::EmptyResponse);
        }

        debug!(result_len = text.len(), "Received plan from Gemini API");

        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl Part {
    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Content,
    #[serde(default)]
    #[allow(dead_code)]
    finish_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_client() -> GeminiClient {
        GeminiClient::new(
            "test-key".to_string(),
            "gemini-2.5-flash".to_string(),
            "https://generativelanguage.googleapis.com/v1beta".to_string(),
            std::time::Duration::from_secs(120),
        )
        .unwrap()
    }

    #[test]
    fn client_is_bound_to_model() {
        let client = test_client();
        assert_eq!(client.model_name(), "gemini-2.5-flash");
    }

    #[test]
    fn api_url_includes_model_and_method() {
        let client = test_client();
        assert_eq!(
            client.api_url("generateContent"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent?key=test-key"
        );
    }

    #[test]
    fn request_wire_format_matches_v1beta_schema() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some("home, 30 min, dumbbells".to_string()),
                }],
            }],
            system_instruction: Some(SystemInstruction {
                parts: vec![Part {
                    text: Some("You are a trainer.".to_string()),
                }],
            }),
            tools: Some(vec![Tool {
                google_search: GoogleSearch {},
            }]),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "contents": [{
                    "role": "user",
                    "parts": [{"text": "home, 30 min, dumbbells"}]
                }],
                "systemInstruction": {
                    "parts": [{"text": "You are a trainer."}]
                },
                "tools": [{"google_search": {}}]
            })
        );
    }

    #[test]
    fn tools_omitted_when_search_disabled() {
        let request = GenerateContentRequest {
            contents: vec![],
            system_instruction: None,
            tools: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("tools").is_none());
        assert!(value.get("systemInstruction").is_none());
    }

    #[test]
    fn response_text_parses_across_parts() {
        let raw = serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "Week 1: "}, {"text": "push-ups"}]
                },
                "finishReason": "STOP"
            }]
        });

        let response: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        let text: String = response.candidates[0]
            .content
            .parts
            .iter()
            .filter_map(Part::text)
            .collect();
        assert_eq!(text, "Week 1: push-ups");
    }
}
