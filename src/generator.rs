//! Workout plan generation.
//!
//! Composes the fixed system instruction with the user's query and invokes
//! the model with search grounding enabled. The generated text is returned
//! verbatim; classification of failures into status codes is the HTTP
//! surface's job.

use std::sync::Arc;

use tracing::debug;

use crate::model::{ModelError, TextModel};
use crate::prompt::WORKOUT_SYSTEM_PROMPT;

/// Workout plan generator backed by an optional model client.
///
/// The client is absent when startup could not construct one (missing or
/// invalid credential); every call then fails with
/// [`ModelError::NotInitialized`].
#[derive(Clone)]
pub struct PlanGenerator {
    model: Option<Arc<dyn TextModel>>,
}

impl PlanGenerator {
    /// Create a generator. Pass `None` when no model client could be built.
    pub fn new(model: Option<Arc<dyn TextModel>>) -> Self {
        Self { model }
    }

    /// Whether a model client is available.
    pub fn is_available(&self) -> bool {
        self.model.is_some()
    }

    /// Generate a workout plan for the given query.
    ///
    /// The query is sent as the primary content, the fixed system prompt on
    /// the instruction channel, and web search is enabled so the model can
    /// ground exercise selection and links. No post-processing, truncation,
    /// or output validation; errors from the remote call propagate unchanged.
    pub async fn generate(&self, query: &str) -> Result<String, ModelError> {
        // Handlers check availability first, but guard here as well.
        let model = self.model.as_ref().ok_or(ModelError::NotInitialized)?;

        debug!(query_len = query.len(), "Generating workout plan");

        model.generate(query, WORKOUT_SYSTEM_PROMPT, true).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::mock::MockModel;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn generate_fails_when_model_absent() {
        let generator = PlanGenerator::new(None);
        assert!(!generator.is_available());

        let err = generator.generate("home, 30 min").await.unwrap_err();
        assert!(matches!(err, ModelError::NotInitialized));
    }

    #[tokio::test]
    async fn generate_returns_model_text_verbatim() {
        let mock = MockModel::new("Week 1: ...\nWeek 2: ...");
        let generator = PlanGenerator::new(Some(Arc::new(mock.clone())));
        assert!(generator.is_available());

        let plan = generator
            .generate("home, 30 min, dumbbells")
            .await
            .unwrap();
        assert_eq!(plan, "Week 1: ...\nWeek 2: ...");

        // The query goes through untouched, with the fixed system prompt and
        // search grounding enabled.
        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].prompt, "home, 30 min, dumbbells");
        assert_eq!(calls[0].system_instruction, WORKOUT_SYSTEM_PROMPT);
        assert!(calls[0].web_search);
    }

    #[tokio::test]
    async fn generate_propagates_provider_errors_unchanged() {
        let mock = MockModel::failing_provider("quota exceeded");
        let generator = PlanGenerator::new(Some(Arc::new(mock)));

        let err = generator.generate("home, 30 min").await.unwrap_err();
        assert!(err.is_provider());
        assert!(err.to_string().contains("quota exceeded"));
    }
}
