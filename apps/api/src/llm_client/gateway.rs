//! AI gateway: sequential fallback across the configured model list.
//!
//! Every AI feature renders one prompt and hands it to `complete` (raw text)
//! or `complete_json` (first balanced JSON object, then validation). Each
//! model is attempted once, in order; the first accepted response wins.
//! No retries, no backoff.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::analysis::validation::ValidationError;
use crate::llm_client::json::extract_json_object;
use crate::llm_client::{GenerativeModel, LlmError, MODEL_FALLBACK_ORDER};

/// Why a single model attempt was rejected.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error(transparent)]
    Model(#[from] LlmError),

    #[error("AI response was not in expected JSON format")]
    MissingJson,

    #[error("AI response contained malformed JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Rejected(String),
}

/// Every model in the list was attempted and none produced an accepted response.
#[derive(Debug)]
pub struct FallbackExhausted {
    pub attempts: usize,
    pub last_error: Option<AttemptError>,
}

impl FallbackExhausted {
    /// The last attempt's error message, or `default` when nothing was attempted.
    pub fn message_or(&self, default: &str) -> String {
        self.last_error
            .as_ref()
            .map(|e| e.to_string())
            .unwrap_or_else(|| default.to_string())
    }
}

#[derive(Clone)]
pub struct AiGateway {
    backend: Arc<dyn GenerativeModel>,
    models: Arc<[String]>,
}

impl AiGateway {
    /// Gateway over the production fallback order.
    pub fn new(backend: Arc<dyn GenerativeModel>) -> Self {
        let models = MODEL_FALLBACK_ORDER.iter().map(|m| m.to_string()).collect();
        Self::with_models(backend, models)
    }

    pub fn with_models(backend: Arc<dyn GenerativeModel>, models: Vec<String>) -> Self {
        Self {
            backend,
            models: models.into(),
        }
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Attempts each model in order and returns the first response `accept` keeps.
    pub async fn complete<T, F>(
        &self,
        task: &str,
        prompt: &str,
        mut accept: F,
    ) -> Result<T, FallbackExhausted>
    where
        T: Send,
        F: FnMut(String) -> Result<T, AttemptError> + Send,
    {
        let mut last_error = None;

        for (attempt, model) in self.models.iter().enumerate() {
            let outcome = match self.backend.generate(model, prompt).await {
                Ok(text) => accept(text),
                Err(e) => Err(AttemptError::Model(e)),
            };

            match outcome {
                Ok(value) => {
                    debug!(task, model = %model, attempt = attempt + 1, "AI call accepted");
                    return Ok(value);
                }
                Err(e) => {
                    warn!(task, model = %model, error = %e, "AI attempt failed, falling back");
                    last_error = Some(e);
                }
            }
        }

        Err(FallbackExhausted {
            attempts: self.models.len(),
            last_error,
        })
    }

    /// Like `complete`, but extracts the first JSON object from the response
    /// and runs it through `validate` before accepting.
    pub async fn complete_json<T, F>(
        &self,
        task: &str,
        prompt: &str,
        validate: F,
    ) -> Result<T, FallbackExhausted>
    where
        T: Send,
        F: Fn(Value) -> Result<T, ValidationError> + Send,
    {
        self.complete(task, prompt, move |text| {
            let block = extract_json_object(&text).ok_or(AttemptError::MissingJson)?;
            let value: Value = serde_json::from_str(block).map_err(AttemptError::MalformedJson)?;
            Ok(validate(value)?)
        })
        .await
    }
}

#[cfg(test)]
pub mod testing {
    //! Scripted in-memory `GenerativeModel` for gateway tests.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::llm_client::{GenerativeModel, LlmError};

    pub enum Reply {
        Text(String),
        Fail(u16),
    }

    #[derive(Default)]
    pub struct ScriptedModel {
        replies: HashMap<String, Reply>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(mut self, model: &str, text: &str) -> Self {
            self.replies
                .insert(model.to_string(), Reply::Text(text.to_string()));
            self
        }

        pub fn fail(mut self, model: &str, status: u16) -> Self {
            self.replies.insert(model.to_string(), Reply::Fail(status));
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerativeModel for ScriptedModel {
        async fn generate(&self, model: &str, _prompt: &str) -> Result<String, LlmError> {
            self.calls.lock().unwrap().push(model.to_string());
            match self.replies.get(model) {
                Some(Reply::Text(text)) => Ok(text.clone()),
                Some(Reply::Fail(status)) => Err(LlmError::Api {
                    status: *status,
                    message: format!("{model} unavailable"),
                }),
                None => Err(LlmError::EmptyContent),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedModel;
    use super::*;

    fn models() -> Vec<String> {
        vec!["m1".to_string(), "m2".to_string(), "m3".to_string()]
    }

    #[tokio::test]
    async fn test_complete_returns_first_success() {
        let backend = Arc::new(ScriptedModel::new().fail("m1", 503).reply("m2", "hello"));
        let gateway = AiGateway::with_models(backend.clone(), models());

        let text = gateway.complete("test", "prompt", Ok).await.unwrap();

        assert_eq!(text, "hello");
        assert_eq!(backend.calls(), vec!["m1", "m2"]);
    }

    #[tokio::test]
    async fn test_rejected_response_advances_to_next_model() {
        let backend = Arc::new(ScriptedModel::new().reply("m1", "short").reply("m2", "long enough"));
        let gateway = AiGateway::with_models(backend.clone(), models());

        let text = gateway
            .complete("test", "prompt", |t| {
                if t.len() < 6 {
                    Err(AttemptError::Rejected("too short".to_string()))
                } else {
                    Ok(t)
                }
            })
            .await
            .unwrap();

        assert_eq!(text, "long enough");
    }

    #[tokio::test]
    async fn test_exhaustion_keeps_last_error() {
        let backend = Arc::new(ScriptedModel::new().fail("m1", 500).fail("m2", 500).fail("m3", 429));
        let gateway = AiGateway::with_models(backend.clone(), models());

        let err = gateway.complete("test", "prompt", Ok).await.unwrap_err();

        assert_eq!(err.attempts, 3);
        assert_eq!(backend.calls().len(), 3);
        let message = err.message_or("default");
        assert!(message.contains("429"), "message was {message}");
        assert!(message.contains("m3 unavailable"));
    }

    #[tokio::test]
    async fn test_empty_model_list_uses_default_message() {
        let gateway = AiGateway::with_models(Arc::new(ScriptedModel::new()), vec![]);
        let err = gateway.complete("test", "prompt", Ok).await.unwrap_err();
        assert_eq!(err.attempts, 0);
        assert_eq!(err.message_or("nothing tried"), "nothing tried");
    }

    #[tokio::test]
    async fn test_complete_json_skips_prose_only_response() {
        let backend = Arc::new(
            ScriptedModel::new()
                .reply("m1", "I'm sorry, I can't do that.")
                .reply("m2", "Result: {\"value\": 42} done"),
        );
        let gateway = AiGateway::with_models(backend.clone(), models());

        let value = gateway
            .complete_json("test", "prompt", |v| Ok(v["value"].as_i64().unwrap_or(0)))
            .await
            .unwrap();

        assert_eq!(value, 42);
        assert_eq!(backend.calls(), vec!["m1", "m2"]);
    }

    #[tokio::test]
    async fn test_complete_json_malformed_object_is_an_attempt_failure() {
        let backend = Arc::new(ScriptedModel::new().reply("m1", "{'single': 'quotes'}"));
        let gateway = AiGateway::with_models(backend, vec!["m1".to_string()]);

        let err = gateway
            .complete_json("test", "prompt", Ok)
            .await
            .unwrap_err();

        assert!(matches!(err.last_error, Some(AttemptError::MalformedJson(_))));
    }

    #[test]
    fn test_default_gateway_uses_fallback_order() {
        let gateway = AiGateway::new(Arc::new(ScriptedModel::new()));
        assert_eq!(gateway.models().len(), MODEL_FALLBACK_ORDER.len());
        assert_eq!(gateway.models()[0], MODEL_FALLBACK_ORDER[0]);
    }
}
