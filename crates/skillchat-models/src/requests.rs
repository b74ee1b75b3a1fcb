use serde::Serialize;
use skillchat_types::Attachment;

/// Chat endpoint request body.
///
/// `skill_id` serializes as an explicit `null` when no skill is selected;
/// the service distinguishes "no skill" from a missing field.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub skill_id: Option<String>,
    pub session_id: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub attachments: Vec<Attachment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = ChatRequest {
            message: "Hello".to_string(),
            skill_id: None,
            session_id: "session_1700000000000_abc123def".to_string(),
            temperature: 0.7,
            max_tokens: 1024,
            attachments: Vec::new(),
        };

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "message": "Hello",
                "skill_id": null,
                "session_id": "session_1700000000000_abc123def",
                "temperature": 0.7,
                "max_tokens": 1024,
                "attachments": [],
            })
        );
    }

    #[test]
    fn test_request_carries_attachment_references() {
        let attachment: Attachment = serde_json::from_str(
            r#"{"filename":"notes.txt","size":42,"path":"uploads/notes.txt"}"#,
        )
        .unwrap();
        let request = ChatRequest {
            message: "summarize".to_string(),
            skill_id: Some("skill_01".to_string()),
            session_id: "session_1_a".to_string(),
            temperature: 1.0,
            max_tokens: 4096,
            attachments: vec![attachment],
        };

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["skill_id"], "skill_01");
        assert_eq!(body["attachments"][0]["filename"], "notes.txt");
        assert_eq!(body["attachments"][0]["size"], 42);
    }
}
