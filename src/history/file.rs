use async_trait::async_trait;
use log::debug;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::ErrorKind;
use std::path::{ Path, PathBuf };
use tokio::sync::Mutex;
use crate::error::PersistenceError;
use crate::history::ConversationLogger;
use crate::models::chat::ConversationLogEntry;

/// Keeps the whole conversation log as one JSON array on disk.
///
/// Every append reads the array, pushes the entry and rewrites the file, so
/// appends from this process are serialized through `write_lock`.
pub struct FileConversationLogger {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileConversationLogger {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<Vec<ConversationLogEntry>, PersistenceError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

fn to_pretty_json(entries: &[ConversationLogEntry]) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    entries.serialize(&mut ser)?;
    Ok(buf)
}

#[async_trait]
impl ConversationLogger for FileConversationLogger {
    async fn append(&self, entry: ConversationLogEntry) -> Result<(), PersistenceError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries().await?;
        entries.push(entry);
        tokio::fs::write(&self.path, to_pretty_json(&entries)?).await?;
        debug!("Appended conversation log entry #{} to {}", entries.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn entry(user: &str, assistant: &str) -> ConversationLogEntry {
        ConversationLogEntry {
            timestamp: Local::now(),
            user_message: user.to_string(),
            assistant_response: assistant.to_string(),
        }
    }

    #[tokio::test]
    async fn creates_file_and_accumulates_entries() {
        let dir = tempdir().unwrap();
        let logger = FileConversationLogger::new(dir.path().join("chat_logs.json"));

        logger.append(entry("hello", "Good morning!")).await.unwrap();
        logger.append(entry("Explain gravity", "Mass attracts mass.")).await.unwrap();

        let raw = std::fs::read_to_string(logger.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let items = json.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["user_message"], "hello");
        assert_eq!(items[1]["assistant_response"], "Mass attracts mass.");
        assert!(items[0]["timestamp"].is_string());
        assert!(raw.contains("\n    {"), "expected 4-space indentation");
    }

    #[tokio::test]
    async fn concurrent_appends_are_all_kept() {
        let dir = tempdir().unwrap();
        let logger = Arc::new(FileConversationLogger::new(dir.path().join("log.json")));

        let mut handles = Vec::new();
        for i in 0..16 {
            let logger = logger.clone();
            handles.push(
                tokio::spawn(async move {
                    logger.append(entry(&format!("q{}", i), "a")).await.unwrap();
                })
            );
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let raw = std::fs::read(logger.path()).unwrap();
        let entries: Vec<ConversationLogEntry> = serde_json::from_slice(&raw).unwrap();
        assert_eq!(entries.len(), 16);
    }

    #[tokio::test]
    async fn corrupt_file_is_a_persistence_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.json");
        std::fs::write(&path, "{ not json").unwrap();
        let logger = FileConversationLogger::new(&path);

        let err = logger.append(entry("hi", "hello")).await.unwrap_err();
        assert!(matches!(err, PersistenceError::Json(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }
}
