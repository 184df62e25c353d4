use crate::clock::{ Clock, SystemClock };
use crate::cli::Args;
use crate::error::{ ChatError, UpstreamError };
use crate::history::{
    format_history_for_model,
    initialize_conversation_logger,
    parse_history,
    ConversationLogger,
};
use crate::llm::{ new_client as new_chat_client, ChatClient, LlmConfig };
use crate::models::chat::{
    is_truthy,
    ChatRequest,
    ChatResponse,
    ConversationLogEntry,
    ASSISTANT_ROLE,
};
use crate::reply::{
    content_id,
    filter_restricted_terms,
    is_greeting,
    time_based_greeting,
    DEFAULT_BRAND_NAME,
    DEFAULT_TRAINING_MESSAGE,
};

use chrono::Timelike;
use log::{ info, warn, error };
use serde_json::Value as JsonValue;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub brand_name: String,
    pub training_message: String,
    pub chat_timeout: Option<Duration>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            brand_name: DEFAULT_BRAND_NAME.to_string(),
            training_message: DEFAULT_TRAINING_MESSAGE.to_string(),
            chat_timeout: None,
        }
    }
}

impl From<&Args> for AgentConfig {
    fn from(args: &Args) -> Self {
        Self {
            brand_name: args.brand_name.clone(),
            training_message: args.training_message.clone(),
            chat_timeout: args.chat_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// How a chat request ended.
#[derive(Debug)]
pub enum ChatOutcome {
    /// Greeting or model reply.
    Reply(ChatResponse),
    /// The request was unusable as sent; nothing was logged.
    Rejected(ChatError),
    /// Something failed after validation; the caller gets the training message.
    Degraded(ChatResponse),
}

#[derive(Clone)]
pub struct ChatAgent {
    chat_client: Arc<dyn ChatClient>,
    conversation_logger: Arc<dyn ConversationLogger>,
    clock: Arc<dyn Clock>,
    config: AgentConfig,
}

impl ChatAgent {
    pub fn new(
        chat_client: Arc<dyn ChatClient>,
        conversation_logger: Arc<dyn ConversationLogger>,
        clock: Arc<dyn Clock>,
        config: AgentConfig
    ) -> Self {
        Self {
            chat_client,
            conversation_logger,
            clock,
            config,
        }
    }

    pub fn from_args(args: &Args) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let chat_api_key = if !args.chat_api_key.is_empty() {
            Some(args.chat_api_key.clone())
        } else {
            None
        };
        let chat_config = LlmConfig {
            api_key: chat_api_key,
            completion_model: Some(args.chat_model.clone()),
            base_url: Some(args.chat_base_url.clone()),
        };
        let chat_client = new_chat_client(&chat_config)?;
        info!(
            "Chat client configured: Model={}, BaseURL={}",
            chat_client.get_model(),
            args.chat_base_url
        );

        let conversation_logger = initialize_conversation_logger(args)?;

        Ok(Self::new(chat_client, conversation_logger, Arc::new(SystemClock), AgentConfig::from(args)))
    }

    pub fn brand_name(&self) -> &str {
        &self.config.brand_name
    }

    pub async fn respond(&self, request: ChatRequest) -> ChatOutcome {
        let message = match request.message {
            Some(JsonValue::String(m)) if !m.is_empty() => m,
            Some(other) if is_truthy(&other) => {
                return self.fail(
                    ChatError::InvalidRequest(format!("message must be a string, got {}", other))
                );
            }
            _ => {
                warn!("Rejected chat request without a message");
                return ChatOutcome::Rejected(ChatError::MissingMessage);
            }
        };

        if is_greeting(&message) {
            return ChatOutcome::Reply(self.greet(&message).await);
        }

        match self.ask_model(&message, request.history.as_ref()).await {
            Ok(response) => ChatOutcome::Reply(response),
            Err(e) => self.fail(e),
        }
    }

    /// Logs the failure in full and masks it behind the training message.
    pub fn fail(&self, err: ChatError) -> ChatOutcome {
        error!("Error processing request: {} | {:?}", err, err);
        ChatOutcome::Degraded(self.degraded_response())
    }

    pub fn degraded_response(&self) -> ChatResponse {
        assistant_response(self.config.training_message.clone(), &self.config.training_message)
    }

    async fn greet(&self, message: &str) -> ChatResponse {
        let greeting = time_based_greeting(self.clock.now().hour());
        self.log_exchange(message, greeting).await;
        assistant_response(format!("{}: {}", self.config.brand_name, greeting), greeting)
    }

    async fn ask_model(
        &self,
        message: &str,
        raw_history: Option<&JsonValue>
    ) -> Result<ChatResponse, ChatError> {
        let history = parse_history(raw_history)?;
        let mut session = self.chat_client.start_chat(format_history_for_model(&history));

        let reply = match self.config.chat_timeout {
            Some(limit) =>
                tokio::time
                    ::timeout(limit, session.send_message(message)).await
                    .map_err(|_| UpstreamError::Timeout(limit))??,
            None => session.send_message(message).await?,
        };

        let filtered = filter_restricted_terms(&reply, &self.config.brand_name);
        self.log_exchange(message, &filtered).await;
        let id = content_id(&filtered);
        Ok(ChatResponse {
            content: filtered,
            role: ASSISTANT_ROLE.to_string(),
            id,
        })
    }

    async fn log_exchange(&self, user_message: &str, assistant_response: &str) {
        let entry = ConversationLogEntry {
            timestamp: self.clock.now(),
            user_message: user_message.to_string(),
            assistant_response: assistant_response.to_string(),
        };
        if let Err(e) = self.conversation_logger.append(entry).await {
            error!("Error saving chat to conversation log: {}", e);
        }
    }
}

fn assistant_response(content: String, id_source: &str) -> ChatResponse {
    ChatResponse {
        content,
        role: ASSISTANT_ROLE.to_string(),
        id: content_id(id_source),
    }
}
