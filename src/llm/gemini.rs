use async_trait::async_trait;
use log::{ debug, info };
use reqwest::Client as HttpClient;
use serde::{ Deserialize, Serialize };
use std::error::Error as StdError;

use super::{ ChatClient, ChatSession, LlmConfig, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL };
use crate::error::UpstreamError;
use crate::models::chat::UpstreamTurn;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: &'a [UpstreamTurn],
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize, Debug)]
struct GeminiPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

/// Joins the text parts of the first candidate. A blocked prompt or a
/// candidate without text is an error, not an empty reply.
fn extract_reply_text(resp: GenerateContentResponse) -> Result<String, UpstreamError> {
    let Some(candidate) = resp.candidates.into_iter().next() else {
        let reason = resp.prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(UpstreamError::EmptyReply(reason));
    };

    let text: String = candidate.content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.is_empty() {
        return Err(
            UpstreamError::EmptyReply(
                candidate.finish_reason.unwrap_or_else(|| "unknown".to_string())
            )
        );
    }
    Ok(text)
}

pub struct GeminiChatClient {
    http: HttpClient,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiChatClient {
    pub fn new(api_key: String, model: Option<String>, base_url: Option<String>) -> Self {
        let chat_model = model.unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());
        let url = base_url.unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());

        Self {
            http: HttpClient::new(),
            api_key,
            model: chat_model,
            base_url: url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        let api_key = config.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| "Google API key is required for GeminiChatClient".to_string())?;

        Ok(Self::new(api_key, config.completion_model.clone(), config.base_url.clone()))
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn open_session(&self, history: Vec<UpstreamTurn>) -> GeminiChatSession {
        GeminiChatSession {
            http: self.http.clone(),
            endpoint: self.endpoint(),
            api_key: self.api_key.clone(),
            history,
        }
    }
}

impl ChatClient for GeminiChatClient {
    fn start_chat(&self, history: Vec<UpstreamTurn>) -> Box<dyn ChatSession> {
        debug!(
            "GeminiChatClient::start_chat() → model={} seeded_turns={}",
            self.model,
            history.len()
        );
        Box::new(self.open_session(history))
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }
}

/// Stateless on the server side: every call resends the full turn list.
pub struct GeminiChatSession {
    http: HttpClient,
    endpoint: String,
    api_key: String,
    history: Vec<UpstreamTurn>,
}

#[async_trait]
impl ChatSession for GeminiChatSession {
    async fn send_message(&mut self, message: &str) -> Result<String, UpstreamError> {
        let mut contents = self.history.clone();
        contents.push(UpstreamTurn::user(message));

        info!("GeminiChatSession::send_message() → {} ({} turns)", self.endpoint, contents.len());
        let resp = self.http
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&(GenerateContentRequest { contents: &contents }))
            .send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { status: status.as_u16(), body });
        }

        let data = resp.json::<GenerateContentResponse>().await?;
        let text = extract_reply_text(data)?;

        contents.push(UpstreamTurn::model(text.clone()));
        self.history = contents;
        Ok(text)
    }
}
