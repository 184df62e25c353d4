use std::time::Duration;
use thiserror::Error;

/// Failures talking to the upstream generative model.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {status}: {body}")]
    Status {
        status: u16,
        body: String,
    },

    #[error("upstream reply contained no text (finish reason: {0})")]
    EmptyReply(String),

    #[error("upstream model did not reply within {0:?}")]
    Timeout(Duration),

    #[error("upstream client error: {0}")]
    Other(String),
}

/// Failures appending to the conversation log.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("conversation log IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("conversation log JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("conversation log redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Message is required.")]
    MissingMessage,

    #[error("invalid chat request: {0}")]
    InvalidRequest(String),

    #[error("malformed history entry at index {index}: {source}")]
    MalformedHistory {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed history: expected an array, got {0}")]
    HistoryNotArray(&'static str),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
