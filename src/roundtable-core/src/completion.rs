//! Live completion collaborator over an OpenAI-compatible API.

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::debug;

use crate::config::CompletionConfig;
use crate::error::RoundtableError;
use crate::orchestrator::{ChatMessage, CompletionClient, Role};

/// Completion client backed by async-openai (works against Groq or any
/// other OpenAI-compatible endpoint).
pub struct OpenAiCompletion {
    api_base: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiCompletion {
    pub fn new(config: &CompletionConfig, api_key: impl Into<String>) -> Self {
        Self {
            api_base: config.api_base.clone(),
            api_key: api_key.into(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletion {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, RoundtableError> {
        // The per-round timeout budget lives here, at the collaborator
        // boundary, not inside the orchestrator.
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .connect_timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| RoundtableError::Config(format!("failed to create HTTP client: {e}")))?;

        let config = OpenAIConfig::new()
            .with_api_key(&self.api_key)
            .with_api_base(&self.api_base);

        let client = Client::with_config(config).with_http_client(http_client);

        let request_messages: Vec<ChatCompletionRequestMessage> = messages
            .iter()
            .map(|m| match m.role {
                Role::System => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage {
                        content: m.content.clone().into(),
                        name: None,
                    },
                ),
                Role::User => {
                    ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                        content: m.content.clone().into(),
                        name: None,
                    })
                }
            })
            .collect();

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .max_completion_tokens(self.max_tokens)
            .messages(request_messages)
            .build()
            .map_err(|e| RoundtableError::CompletionCall(e.to_string()))?;

        let response = client
            .chat()
            .create(request)
            .await
            .map_err(|e| RoundtableError::CompletionCall(e.to_string()))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        debug!(model = %self.model, chars = content.len(), "completion received");
        Ok(content)
    }
}
