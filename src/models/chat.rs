use chrono::{ DateTime, Local };
use serde::{ Serialize, Deserialize };
use serde_json::Value as JsonValue;

pub const ASSISTANT_ROLE: &str = "assistant";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Body of `POST /api/chat`.
///
/// Both fields stay as raw JSON: `message` is checked for truthiness before
/// anything else, and history is only decoded once the upstream model is
/// actually called, so a malformed history never affects a greeting.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<JsonValue>,
    #[serde(default)]
    pub history: Option<JsonValue>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, history: Vec<ChatMessage>) -> Self {
        let history = history
            .into_iter()
            .map(|msg| serde_json::json!({ "role": msg.role, "content": msg.content }))
            .collect();
        Self {
            message: Some(JsonValue::String(message.into())),
            history: Some(JsonValue::Array(history)),
        }
    }
}

/// JSON truthiness: null, false, zero and empty strings/arrays/objects are falsy.
pub fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(items) => !items.is_empty(),
        JsonValue::Object(fields) => !fields.is_empty(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub content: String,
    pub role: String,
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversationLogEntry {
    pub timestamp: DateTime<Local>,
    pub user_message: String,
    pub assistant_response: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamPart {
    pub text: String,
}

/// One turn in the upstream model's conversation format (`user` or `model`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamTurn {
    pub role: String,
    pub parts: Vec<UpstreamPart>,
}

impl UpstreamTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self::text("user", text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::text("model", text)
    }

    fn text(role: &str, text: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![UpstreamPart { text: text.into() }],
        }
    }
}
