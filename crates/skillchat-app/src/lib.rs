//! Presentation adapter and binary for skillchat.
//!
//! The session core (skillchat-chat) exposes pure state-transition
//! operations; everything in this crate renders their outcomes — a rustyline
//! REPL, one-shot subcommands, and the conversation log on disk.

pub mod app;
pub mod cli;
pub mod config;
pub mod logger;

pub use cli::{Cli, Commands};
pub use config::{setup_from_cli, AppConfig};
pub use logger::ConversationLogger;
