//! Completion client for the hosted language model
//!
//! Handlers fall back to a single completion call when no deterministic tool
//! can answer. The call returns a `Result`; [`ask`] turns a failure into the
//! answer text shown to the user.

use async_trait::async_trait;
use genai::Client as GenaiClient;
use genai::ModelIden;
use genai::chat::{ChatMessage as GenaiChatMessage, ChatRequest};
use genai::resolver::{AuthData, AuthResolver};
use std::time::Duration;
use tracing::{debug, warn};
use tutor_common::{COMPLETION_ERROR_PREFIX, ProviderConfig, Result, TutorError};

/// A text-in, text-out completion service
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Model identifier requests are sent to
    fn model(&self) -> &str;

    /// Complete a single prompt
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Completion client backed by genai
pub struct GeminiService {
    /// Underlying client for the LLM
    client: GenaiClient,

    /// Model to use
    model: String,

    /// Upper bound on a single request
    timeout: Option<Duration>,
}

impl GeminiService {
    /// Create a new service from provider configuration.
    ///
    /// A configured API key is handed to genai through an auth resolver;
    /// without one genai uses its own environment lookup for the provider.
    pub fn new(config: &ProviderConfig) -> Self {
        let mut builder = GenaiClient::builder();

        if let Some(api_key) = config.api_key.clone() {
            let auth_resolver = AuthResolver::from_resolver_fn(
                move |_model_iden: ModelIden| -> std::result::Result<Option<AuthData>, genai::resolver::Error> {
                    Ok(Some(AuthData::from_single(api_key.clone())))
                },
            );
            builder = builder.with_auth_resolver(auth_resolver);
        }

        GeminiService {
            client: builder.build(),
            model: config.default_model.clone(),
            timeout: config.timeout_seconds.map(Duration::from_secs),
        }
    }
}

#[async_trait]
impl CompletionClient for GeminiService {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        debug!("Sending completion request to {}", self.model);

        let chat_req = ChatRequest::new(vec![GenaiChatMessage::user(prompt)]);
        let call = self.client.exec_chat(&self.model, chat_req, None);

        let response = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                TutorError::Completion(format!("request timed out after {}s", limit.as_secs()))
            })?,
            None => call.await,
        }
        .map_err(|e| TutorError::Completion(e.to_string()))?;

        response
            .content
            .into_iter()
            .find_map(|content| content.into_text())
            .ok_or_else(|| TutorError::Completion("No text content in completion response".to_string()))
    }
}

/// Complete `prompt`, rendering a failure as an error-marked answer
pub async fn ask(client: &dyn CompletionClient, prompt: String) -> String {
    match client.complete(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Completion via {} failed: {}", client.model(), e);
            format!("{}{}", COMPLETION_ERROR_PREFIX, e)
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::Mutex;

    /// Records prompts and replies with canned text or a canned failure
    pub struct FakeCompletion {
        reply: std::result::Result<String, String>,
        prompts: Mutex<Vec<String>>,
    }

    impl FakeCompletion {
        pub fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(details: &str) -> Self {
            Self {
                reply: Err(details.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionClient for FakeCompletion {
        fn model(&self) -> &str {
            "fake-model"
        }

        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().map_err(TutorError::Completion)
        }
    }
}
