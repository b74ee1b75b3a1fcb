//! Wire request/response shapes for the skillchat service endpoints

pub mod requests;
pub mod responses;

pub use requests::ChatRequest;
pub use responses::{ApiErrorBody, ChatCompletion, ExportDocument, SkillList};
