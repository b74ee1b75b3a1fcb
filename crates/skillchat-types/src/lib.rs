//! Core types and structures for skillchat
//!
//! This crate provides the foundational types used across all skillchat crates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// Prefix every acceptable provider credential starts with
pub const API_KEY_PREFIX: &str = "sk-ant-";

/// Default sampling temperature (the service default)
pub const DEFAULT_TEMPERATURE: f64 = 1.0;

/// Default response token budget (the service default)
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

// ============================================================================
// Session Identity
// ============================================================================

/// Generate a fresh session identifier.
///
/// The id is opaque to the client but must be unique per conversation, so it
/// combines the creation timestamp with a random suffix.
pub fn generate_session_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: String = uuid::Uuid::new_v4().simple().to_string()[..9].to_string();
    format!("session_{}_{}", millis, suffix)
}

// ============================================================================
// Message Types
// ============================================================================

/// Who authored a message in the conversation log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single turn entry in the append-only conversation log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }
}

// ============================================================================
// Usage and Statistics
// ============================================================================

/// Token usage reported by the service for one completed turn
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl Usage {
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// Running statistics for the active session.
///
/// Credited only on confirmed assistant responses; a user message that never
/// round-tripped is never counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub message_count: u64,
    pub total_tokens: u64,
}

impl SessionStats {
    /// Credit one completed user/assistant turn pair.
    pub fn credit(&mut self, usage: &Usage) {
        self.message_count += 2;
        self.total_tokens += usage.total();
    }

    pub fn reset(&mut self) {
        *self = SessionStats::default();
    }
}

// ============================================================================
// Skills
// ============================================================================

/// A selectable assistant behavior advertised by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Skill {
    /// Display label, e.g. `Book Machine (custom)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.kind)
    }
}

// ============================================================================
// Attachments
// ============================================================================

/// A file already uploaded and referenced, awaiting inclusion in the next send.
///
/// Beyond the filename the upload response is an opaque contract, so every
/// server-assigned reference field is carried verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub filename: String,
    #[serde(flatten)]
    pub reference: serde_json::Map<String, serde_json::Value>,
}

impl Attachment {
    pub fn new(filename: impl Into<String>) -> Self {
        Self { filename: filename.into(), reference: serde_json::Map::new() }
    }
}

// ============================================================================
// Error Taxonomy
// ============================================================================

/// Every failure the client surfaces to the user.
///
/// Nothing here propagates as an uncaught fault and nothing is retried; each
/// variant becomes a user-visible notice at the call site.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("no API key configured")]
    MissingCredential,

    #[error("invalid setting: {0}")]
    Validation(String),

    #[error("request rejected ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("network failure: {0}")]
    Transport(String),

    #[error("upload of {filename} failed: {reason}")]
    Upload { filename: String, reason: String },
}

impl ChatError {
    /// The text shown to the user for this failure.
    pub fn notice(&self) -> String {
        match self {
            ChatError::Rejected { detail, .. } if !detail.is_empty() => detail.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_shape() {
        let id = generate_session_id();
        assert!(id.starts_with("session_"));
        let parts: Vec<&str> = id.splitn(3, '_').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 9);
    }

    #[test]
    fn test_session_ids_unique() {
        let a = generate_session_id();
        let b = generate_session_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_stats_crediting() {
        let mut stats = SessionStats::default();
        stats.credit(&Usage { input_tokens: 5, output_tokens: 3 });
        assert_eq!(stats.message_count, 2);
        assert_eq!(stats.total_tokens, 8);

        stats.credit(&Usage { input_tokens: 10, output_tokens: 20 });
        assert_eq!(stats.message_count, 4);
        assert_eq!(stats.total_tokens, 38);

        stats.reset();
        assert_eq!(stats, SessionStats::default());
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
        let role: Role = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(role, Role::System);
    }

    #[test]
    fn test_skill_label() {
        let skill = Skill {
            id: "skill_01".to_string(),
            name: "Book Machine".to_string(),
            kind: "custom".to_string(),
            description: None,
        };
        assert_eq!(skill.label(), "Book Machine (custom)");
    }

    #[test]
    fn test_attachment_preserves_reference_fields() {
        let json = r#"{"filename":"notes.txt","size":42,"path":"uploads/notes.txt"}"#;
        let att: Attachment = serde_json::from_str(json).unwrap();
        assert_eq!(att.filename, "notes.txt");
        assert_eq!(att.reference["size"], 42);

        let back = serde_json::to_value(&att).unwrap();
        assert_eq!(back["path"], "uploads/notes.txt");
    }
}
