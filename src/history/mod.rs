mod file;
mod memory;
mod redis;

use async_trait::async_trait;
use log::info;
use serde_json::Value as JsonValue;
use std::error::Error;
use std::sync::Arc;
use crate::cli::Args;
use crate::error::{ ChatError, PersistenceError };
use crate::models::chat::{ ChatMessage, ConversationLogEntry, UpstreamTurn, ASSISTANT_ROLE };

pub use self::file::FileConversationLogger;
pub use self::memory::MemoryConversationLogger;
pub use self::redis::RedisConversationLogger;

/// Append-only sink for completed exchanges.
#[async_trait]
pub trait ConversationLogger: Send + Sync {
    async fn append(&self, entry: ConversationLogEntry) -> Result<(), PersistenceError>;
}

pub fn create_conversation_logger(
    args: &Args
) -> Result<Arc<dyn ConversationLogger>, Box<dyn Error + Send + Sync>> {
    match args.history_type.to_lowercase().as_str() {
        "file" => Ok(Arc::new(FileConversationLogger::new(&args.history_path))),
        "redis" => {
            let store = RedisConversationLogger::new(&args.history_host, &args.history_redis_key)?;
            Ok(Arc::new(store))
        }
        "memory" => Ok(Arc::new(MemoryConversationLogger::new())),
        _ =>
            Err(
                Box::new(
                    std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        format!("Unsupported history store type: {}", args.history_type)
                    )
                )
            ),
    }
}

pub fn initialize_conversation_logger(
    args: &Args
) -> Result<Arc<dyn ConversationLogger>, Box<dyn Error + Send + Sync>> {
    match args.history_type.to_lowercase().as_str() {
        "file" => info!("Conversation log will be stored in file: {}", args.history_path),
        "redis" =>
            info!(
                "Conversation log will be stored in redis list '{}' at {}",
                args.history_redis_key,
                args.history_host
            ),
        other => info!("Conversation log will be stored in: {}", other),
    }
    create_conversation_logger(args)
}

/// Decodes raw request history into messages, in order. Absent or `null`
/// history is empty; anything other than an array is malformed.
pub fn parse_history(raw: Option<&JsonValue>) -> Result<Vec<ChatMessage>, ChatError> {
    let entries = match raw {
        None | Some(JsonValue::Null) => return Ok(Vec::new()),
        Some(JsonValue::Array(entries)) => entries,
        Some(other) => {
            return Err(ChatError::HistoryNotArray(describe_json_type(other)));
        }
    };
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json
                ::from_value::<ChatMessage>(entry.clone())
                .map_err(|source| ChatError::MalformedHistory { index, source })
        })
        .collect()
}

fn describe_json_type(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Reshapes caller history into upstream turns: `assistant` becomes `model`,
/// every other role becomes `user`. Order and length are preserved.
pub fn format_history_for_model(history: &[ChatMessage]) -> Vec<UpstreamTurn> {
    history
        .iter()
        .map(|msg| {
            if msg.role == ASSISTANT_ROLE {
                UpstreamTurn::model(msg.content.clone())
            } else {
                UpstreamTurn::user(msg.content.clone())
            }
        })
        .collect()
}
