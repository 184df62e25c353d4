//! Fakes shared by the agent and server tests.

use async_trait::async_trait;
use chrono::{ DateTime, Local, TimeZone };
use std::sync::{ Arc, Mutex };
use std::time::Duration;

use crate::agent::{ AgentConfig, ChatAgent };
use crate::clock::Clock;
use crate::error::{ PersistenceError, UpstreamError };
use crate::history::{ ConversationLogger, MemoryConversationLogger };
use crate::llm::{ ChatClient, ChatSession };
use crate::models::chat::{ ConversationLogEntry, UpstreamTurn };

pub struct FixedClock(pub DateTime<Local>);

impl FixedClock {
    pub fn at_hour(hour: u32) -> Self {
        Self(Local.with_ymd_and_hms(2024, 5, 1, hour, 30, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Records every session it opens and answers with a canned reply.
#[derive(Clone)]
pub struct FakeChatClient {
    reply: Result<String, String>,
    delay: Option<Duration>,
    pub calls: Arc<Mutex<Vec<(Vec<UpstreamTurn>, String)>>>,
}

impl FakeChatClient {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            delay: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            reply: Err(reason.to_string()),
            ..Self::replying("")
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ChatClient for FakeChatClient {
    fn start_chat(&self, history: Vec<UpstreamTurn>) -> Box<dyn ChatSession> {
        Box::new(FakeChatSession { client: self.clone(), history })
    }

    fn get_model(&self) -> String {
        "fake-model".to_string()
    }
}

struct FakeChatSession {
    client: FakeChatClient,
    history: Vec<UpstreamTurn>,
}

#[async_trait]
impl ChatSession for FakeChatSession {
    async fn send_message(&mut self, message: &str) -> Result<String, UpstreamError> {
        self.client.calls.lock().unwrap().push((self.history.clone(), message.to_string()));
        if let Some(delay) = self.client.delay {
            tokio::time::sleep(delay).await;
        }
        self.client.reply.clone().map_err(UpstreamError::Other)
    }
}

pub struct FailingLogger;

#[async_trait]
impl ConversationLogger for FailingLogger {
    async fn append(&self, _entry: ConversationLogEntry) -> Result<(), PersistenceError> {
        Err(PersistenceError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full")))
    }
}

pub fn test_config() -> AgentConfig {
    AgentConfig::default()
}

pub fn agent_with(
    client: FakeChatClient,
    logger: Arc<dyn ConversationLogger>,
    hour: u32
) -> ChatAgent {
    ChatAgent::new(Arc::new(client), logger, Arc::new(FixedClock::at_hour(hour)), test_config())
}

pub fn memory_agent(client: FakeChatClient, hour: u32) -> (ChatAgent, Arc<MemoryConversationLogger>) {
    let logger = Arc::new(MemoryConversationLogger::new());
    (agent_with(client, logger.clone(), hour), logger)
}
