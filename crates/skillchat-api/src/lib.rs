//! Collaborator boundary for the skillchat service.
//!
//! The four remote endpoints (skills, upload, chat, export) are opaque
//! request/response contracts. `ChatApi` is the seam the rest of the client
//! programs against; `HttpApiClient` is the reqwest implementation.

use async_trait::async_trait;
use std::path::Path;

use skillchat_models::{ChatCompletion, ChatRequest, ExportDocument};
use skillchat_types::{Attachment, ChatError, Skill};

mod client;

pub use client::HttpApiClient;

/// Remote service operations used by the client core.
///
/// One call per user action; nothing is retried here.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Fetch the selectable skills. Authenticated.
    async fn list_skills(&self, api_key: &str) -> Result<Vec<Skill>, ChatError>;

    /// Upload one file for staging. One call per file; a failure is isolated
    /// to that file.
    async fn upload(&self, path: &Path) -> Result<Attachment, ChatError>;

    /// Send a chat turn. Authenticated.
    async fn send_chat(
        &self,
        api_key: &str,
        request: &ChatRequest,
    ) -> Result<ChatCompletion, ChatError>;

    /// Fetch the rendered transcript for a session.
    async fn export(&self, session_id: &str) -> Result<ExportDocument, ChatError>;
}
