use anyhow::Result;
use chrono::Local;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

#[derive(Serialize)]
struct LogEntry {
    timestamp: String, // ISO-8601 local time
    session_id: String,
    role: String,
    content: String,
}

/// Append-only JSONL log of the conversation, one file per run.
pub struct ConversationLogger {
    file_path: PathBuf,
    file: Option<tokio::fs::File>,
}

impl ConversationLogger {
    /// Create a new logger; generates the file name based on the current local time.
    pub async fn new(workspace: &Path) -> Result<Self> {
        let logs_dir = workspace.join("logs");
        fs::create_dir_all(&logs_dir).await?;

        let now_local = Local::now();
        let filename = format!("schat-{}.jsonl", now_local.format("%Y-%m-%d-%H%M%S"));
        let file_path = logs_dir.join(filename);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .await?;
        Ok(Self { file_path, file: Some(file) })
    }

    /// Append a single log entry. Logging failures are reported, never fatal.
    pub async fn log(&mut self, session_id: &str, role: &str, content: &str) {
        let entry = LogEntry {
            timestamp: Local::now().to_rfc3339(),
            session_id: session_id.to_string(),
            role: role.to_string(),
            content: content.to_string(),
        };
        if let Some(file) = &mut self.file {
            if let Ok(json) = serde_json::to_string(&entry) {
                if let Err(e) = file.write_all(json.as_bytes()).await {
                    eprintln!("[Logging error] {}", e);
                } else if let Err(e) = file.write_all(b"\n").await {
                    eprintln!("[Logging error] {}", e);
                }
            }
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Close the logger (explicit drop). Called on graceful shutdown.
    pub async fn shutdown(&mut self) {
        if let Some(file) = self.file.take() {
            let _ = file.sync_all().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_entries_are_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let mut logger = ConversationLogger::new(dir.path()).await.unwrap();

        logger.log("session_1_a", "user", "Hello").await;
        logger.log("session_1_a", "assistant", "Hi!").await;
        logger.shutdown().await;

        let content = std::fs::read_to_string(logger.file_path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["role"], "user");
        assert_eq!(first["session_id"], "session_1_a");
        assert_eq!(first["content"], "Hello");
    }
}
