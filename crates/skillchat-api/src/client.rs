use async_trait::async_trait;
use colored::Colorize;
use std::path::Path;

use skillchat_models::{ApiErrorBody, ChatCompletion, ChatRequest, ExportDocument, SkillList};
use skillchat_types::{Attachment, ChatError, Skill};

use crate::ChatApi;

/// HTTP implementation of the service contracts using reqwest.
///
/// The credential travels in the `X-API-Key` header. No local timeout is
/// enforced; the transport's own behavior applies.
pub struct HttpApiClient {
    base_url: String,
    client: reqwest::Client,
    verbose: bool,
}

impl HttpApiClient {
    pub fn new(base_url: &str) -> Self {
        // Ensure base_url doesn't end with a slash
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn skills_url(&self) -> String {
        format!("{}/api/skills", self.base_url)
    }

    fn upload_url(&self) -> String {
        format!("{}/api/upload", self.base_url)
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    fn export_url(&self, session_id: &str) -> String {
        format!("{}/api/export/{}", self.base_url, session_id)
    }

    fn debug_request(&self, method: &str, url: &str, body: Option<&str>) {
        if self.verbose {
            match body {
                Some(body) => eprintln!(
                    "{}",
                    format!("🔧 DEBUG: {} {} body: {}", method, url, body).bright_black()
                ),
                None => eprintln!("{}", format!("🔧 DEBUG: {} {}", method, url).bright_black()),
            }
        }
    }

    /// Convert a settled non-2xx response into `Rejected`, preferring the
    /// server-supplied detail text.
    async fn reject(response: reqwest::Response) -> ChatError {
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        rejection(status, &text)
    }
}

/// Map a non-2xx status and body text into the error taxonomy.
fn rejection(status: u16, body: &str) -> ChatError {
    let detail = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.detail)
        .filter(|detail| !detail.is_empty())
        .unwrap_or_else(|| "Request failed".to_string());
    ChatError::Rejected { status, detail }
}

fn transport(err: reqwest::Error) -> ChatError {
    ChatError::Transport(err.to_string())
}

#[async_trait]
impl ChatApi for HttpApiClient {
    async fn list_skills(&self, api_key: &str) -> Result<Vec<Skill>, ChatError> {
        let url = self.skills_url();
        self.debug_request("GET", &url, None);

        let response = self
            .client
            .get(&url)
            .header("X-API-Key", api_key)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }

        let list: SkillList = response.json().await.map_err(transport)?;
        Ok(list.skills)
    }

    async fn upload(&self, path: &Path) -> Result<Attachment, ChatError> {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let upload_failure = |reason: String| ChatError::Upload {
            filename: filename.clone(),
            reason,
        };

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| upload_failure(e.to_string()))?;

        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.clone());
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = self.upload_url();
        self.debug_request("POST", &url, None);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| upload_failure(e.to_string()))?;

        if !response.status().is_success() {
            let rejected = Self::reject(response).await;
            return Err(upload_failure(rejected.notice()));
        }

        response
            .json::<Attachment>()
            .await
            .map_err(|e| upload_failure(e.to_string()))
    }

    async fn send_chat(
        &self,
        api_key: &str,
        request: &ChatRequest,
    ) -> Result<ChatCompletion, ChatError> {
        let url = self.chat_url();
        if self.verbose {
            let body = serde_json::to_string(request).unwrap_or_default();
            self.debug_request("POST", &url, Some(&body));
        }

        let response = self
            .client
            .post(&url)
            .header("X-API-Key", api_key)
            .json(request)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }

        response.json::<ChatCompletion>().await.map_err(transport)
    }

    async fn export(&self, session_id: &str) -> Result<ExportDocument, ChatError> {
        let url = self.export_url(session_id);
        self.debug_request("GET", &url, None);

        let response = self.client.get(&url).send().await.map_err(transport)?;

        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }

        response.json::<ExportDocument>().await.map_err(transport)
    }
}
