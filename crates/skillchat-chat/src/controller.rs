use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use skillchat_api::ChatApi;
use skillchat_models::{ChatRequest, ExportDocument};
use skillchat_types::{ChatError, Usage, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

use skillchat_settings::SettingsStore;
use skillchat_skills::SkillCatalog;

use crate::attachments::AttachmentManager;
use crate::session::ConversationSession;

/// Send lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendState {
    Idle,
    Sending,
}

/// The only place concurrency-sensitive send decisions are made.
///
/// `Idle -> Sending` happens through `try_begin`; `Sending -> Idle` happens
/// unconditionally through `settle` once the request reaches success,
/// rejection, or transport failure, so input can never stay stuck disabled.
#[derive(Debug)]
pub struct SendGate {
    state: SendState,
}

impl SendGate {
    pub fn new() -> Self {
        Self { state: SendState::Idle }
    }

    /// Enter `Sending` if idle. Returns false when a request is already in
    /// flight; the attempt is rejected, never queued.
    pub fn try_begin(&mut self) -> bool {
        match self.state {
            SendState::Idle => {
                self.state = SendState::Sending;
                true
            }
            SendState::Sending => false,
        }
    }

    /// Return to `Idle`, whatever the request's fate was.
    pub fn settle(&mut self) {
        self.state = SendState::Idle;
    }

    pub fn state(&self) -> SendState {
        self.state
    }

    pub fn is_sending(&self) -> bool {
        self.state == SendState::Sending
    }
}

impl Default for SendGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a send attempt, for the presentation layer to render.
#[derive(Debug)]
pub enum SendOutcome {
    /// The turn completed; the assistant message is already appended and the
    /// statistics credited.
    Completed { reply: String, usage: Usage },
    /// The request settled in rejection or transport failure; nothing was
    /// committed (no assistant entry, attachments still pending).
    Failed { notice: String },
    /// A request is already in flight; this attempt was rejected, not queued.
    Busy,
    /// No credential configured; the caller should prompt for settings.
    NeedsCredential,
    /// The trimmed message was empty; nothing to do.
    EmptyMessage,
}

/// Result of staging one file.
#[derive(Debug)]
pub enum AttachOutcome {
    Staged { filename: String },
    Failed { notice: String },
}

/// Orchestrates user-initiated actions against the remote service and keeps
/// the session state consistent with their asynchronous outcomes.
pub struct ChatController {
    api: Arc<dyn ChatApi>,
    settings: SettingsStore,
    catalog: SkillCatalog,
    session: ConversationSession,
    attachments: AttachmentManager,
    gate: SendGate,
    temperature: f64,
    max_tokens: u32,
}

impl ChatController {
    pub fn new(api: Arc<dyn ChatApi>, settings: SettingsStore) -> Self {
        Self {
            api,
            settings,
            catalog: SkillCatalog::new(),
            session: ConversationSession::new(),
            attachments: AttachmentManager::new(),
            gate: SendGate::new(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Send one user turn. The user message is appended optimistically at
    /// dispatch; statistics are credited together with the assistant append
    /// on success only.
    pub async fn send(&mut self, text: &str) -> SendOutcome {
        let api_key = match self.settings.api_key() {
            Some(key) => key.to_string(),
            None => return SendOutcome::NeedsCredential,
        };

        let message = text.trim();
        if message.is_empty() {
            return SendOutcome::EmptyMessage;
        }

        if !self.gate.try_begin() {
            return SendOutcome::Busy;
        }

        self.session.append_user(message);

        let request = ChatRequest {
            message: message.to_string(),
            skill_id: self.catalog.selected_id().map(str::to_string),
            session_id: self.session.id().to_string(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            attachments: self.attachments.pending().to_vec(),
        };

        let result = self.api.send_chat(&api_key, &request).await;

        // The gate opens before the outcome is inspected; failure paths must
        // never leave the input disabled.
        self.gate.settle();

        match result {
            Ok(completion) => {
                self.session
                    .append_assistant(&completion.response, &completion.usage);
                self.attachments.clear();
                SendOutcome::Completed {
                    reply: completion.response,
                    usage: completion.usage,
                }
            }
            Err(err) => SendOutcome::Failed {
                notice: format!("Failed to send message: {}", err.notice()),
            },
        }
    }

    /// Upload and stage one file. Not gated by the send state: staging is
    /// additive, not a conversational turn. A failure is isolated to this
    /// file.
    pub async fn attach(&mut self, path: &Path) -> AttachOutcome {
        match self.api.upload(path).await {
            Ok(attachment) => {
                let filename = attachment.filename.clone();
                self.attachments.stage(attachment);
                AttachOutcome::Staged { filename }
            }
            Err(err) => AttachOutcome::Failed { notice: err.notice() },
        }
    }

    /// Remove a staged attachment by filename before send. Returns false
    /// when nothing matched.
    pub fn remove_attachment(&mut self, filename: &str) -> bool {
        self.attachments.remove(filename)
    }

    /// Reset the session after the user confirmed the clear. Returns the
    /// local system notice to display. Confirmation itself is the
    /// presentation layer's pre-action guard.
    pub fn clear(&mut self) -> String {
        self.session.start();
        "Chat cleared. New session started.".to_string()
    }

    /// Fetch the rendered transcript for the active session.
    pub async fn export(&self) -> Result<ExportDocument, ChatError> {
        self.api.export(self.session.id()).await
    }

    /// Refresh the skill catalog using the persisted credential and default
    /// skill. Without a credential this empties the catalog locally.
    pub async fn refresh_skills(&mut self) -> Result<(), ChatError> {
        let api_key = self.settings.api_key().map(str::to_string);
        let default_skill = self.settings.default_skill().map(str::to_string);
        self.catalog
            .refresh(self.api.as_ref(), api_key.as_deref(), default_skill.as_deref())
            .await
    }

    pub fn save_api_key(&mut self, value: &str) -> Result<()> {
        self.settings.set_api_key(value)
    }

    pub fn save_default_skill(&mut self, value: &str) -> Result<()> {
        self.settings.set_default_skill(value)
    }

    pub fn select_skill(&mut self, id: &str) -> Result<(), ChatError> {
        self.catalog.select(id)
    }

    pub fn clear_skill(&mut self) {
        self.catalog.clear_selection();
    }

    pub fn set_temperature(&mut self, temperature: f64) {
        self.temperature = temperature;
    }

    pub fn set_max_tokens(&mut self, max_tokens: u32) {
        self.max_tokens = max_tokens;
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn has_credential(&self) -> bool {
        self.settings.api_key().is_some()
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    pub fn attachments(&self) -> &AttachmentManager {
        &self.attachments
    }

    pub fn send_state(&self) -> SendState {
        self.gate.state()
    }
}
