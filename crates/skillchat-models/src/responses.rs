use serde::Deserialize;
use skillchat_types::{Skill, Usage};

/// Successful chat endpoint response
#[derive(Debug, Deserialize)]
pub struct ChatCompletion {
    pub response: String,
    pub usage: Usage,
}

/// Skills endpoint response
#[derive(Debug, Deserialize)]
pub struct SkillList {
    pub skills: Vec<Skill>,
}

/// Export endpoint response
#[derive(Debug, Deserialize)]
pub struct ExportDocument {
    pub markdown: String,
    pub filename: String,
}

/// Failure body returned with a non-2xx status
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}
