use async_trait::async_trait;
use std::sync::Mutex;
use crate::error::PersistenceError;
use crate::history::ConversationLogger;
use crate::models::chat::ConversationLogEntry;

/// In-process log; entries live as long as the process.
#[derive(Default)]
pub struct MemoryConversationLogger {
    entries: Mutex<Vec<ConversationLogEntry>>,
}

impl MemoryConversationLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<ConversationLogEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

#[async_trait]
impl ConversationLogger for MemoryConversationLogger {
    async fn append(&self, entry: ConversationLogEntry) -> Result<(), PersistenceError> {
        match self.entries.lock() {
            Ok(mut entries) => entries.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
        Ok(())
    }
}
