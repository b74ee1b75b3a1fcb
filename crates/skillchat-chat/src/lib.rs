//! Session core for skillchat
//!
//! This crate owns the conversation state: the active session (identity,
//! append-only log, statistics), the staged attachments, and the controller
//! that orchestrates user-initiated send/clear/export actions behind the
//! single-in-flight send gate. It has no rendering of its own; the
//! presentation layer consumes the typed outcomes it returns.

pub mod attachments;
pub mod controller;
pub mod session;

pub use attachments::AttachmentManager;
pub use controller::{AttachOutcome, ChatController, SendGate, SendOutcome, SendState};
pub use session::ConversationSession;
