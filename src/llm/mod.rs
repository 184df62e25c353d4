pub mod gemini;

use async_trait::async_trait;
use std::error::Error as StdError;
use std::sync::Arc;
use crate::error::UpstreamError;
use crate::models::chat::UpstreamTurn;
use self::gemini::GeminiChatClient;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";

#[derive(Debug, Clone, Default)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub completion_model: Option<String>,
    pub base_url: Option<String>,
}

/// Upstream model capable of opening a conversation seeded with prior turns.
pub trait ChatClient: Send + Sync {
    fn start_chat(&self, history: Vec<UpstreamTurn>) -> Box<dyn ChatSession>;

    fn get_model(&self) -> String;
}

/// One upstream conversation. Lives for a single request.
#[async_trait]
pub trait ChatSession: Send {
    async fn send_message(&mut self, message: &str) -> Result<String, UpstreamError>;
}

pub fn new_client(
    config: &LlmConfig
) -> Result<Arc<dyn ChatClient>, Box<dyn StdError + Send + Sync>> {
    let client = GeminiChatClient::from_config(config)?;
    Ok(Arc::new(client))
}
