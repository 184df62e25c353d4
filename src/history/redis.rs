use async_trait::async_trait;
use crate::error::PersistenceError;
use crate::history::ConversationLogger;
use crate::models::chat::ConversationLogEntry;
use redis::{ Client, AsyncCommands };

/// Document-store backend: one serialized entry pushed per exchange.
pub struct RedisConversationLogger {
    client: Client,
    key: String,
}

impl RedisConversationLogger {
    pub fn new(host: &str, key: &str) -> Result<Self, PersistenceError> {
        Ok(Self {
            client: Client::open(host)?,
            key: key.to_string(),
        })
    }

    async fn get_connection(&self) -> Result<redis::aio::MultiplexedConnection, redis::RedisError> {
        self.client.get_multiplexed_async_connection().await
    }
}

#[async_trait]
impl ConversationLogger for RedisConversationLogger {
    async fn append(&self, entry: ConversationLogEntry) -> Result<(), PersistenceError> {
        let mut conn = self.get_connection().await?;
        let json_entry = serde_json::to_string(&entry)?;
        let _: i64 = conn.rpush(&self.key, &json_entry).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_connection_url() {
        assert!(RedisConversationLogger::new("not-a-redis-url", "chat_logs").is_err());
    }

    #[test]
    fn accepts_redis_url_without_connecting() {
        let logger = RedisConversationLogger::new("redis://127.0.0.1:6379", "chat_logs").unwrap();
        assert_eq!(logger.key, "chat_logs");
    }
}
