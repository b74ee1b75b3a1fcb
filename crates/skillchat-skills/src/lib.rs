//! Cached catalog of selectable skills.

use skillchat_api::ChatApi;
use skillchat_types::{ChatError, Skill};

/// Fetched-and-cached skill list plus the current selection.
///
/// `refresh` replaces the cached list wholesale; it never merges. The
/// configured default skill becomes the selection when the refreshed catalog
/// contains it, otherwise the selection falls back to no skill without error.
#[derive(Debug, Default)]
pub struct SkillCatalog {
    skills: Vec<Skill>,
    selected: Option<String>,
}

impl SkillCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh the catalog from the service. Idempotent and safe to call
    /// repeatedly (e.g. after a settings change). With no credential this is
    /// a no-op that yields the empty catalog without a network call.
    pub async fn refresh(
        &mut self,
        api: &dyn ChatApi,
        api_key: Option<&str>,
        default_skill: Option<&str>,
    ) -> Result<(), ChatError> {
        let api_key = match api_key {
            Some(key) if !key.is_empty() => key,
            _ => {
                self.skills.clear();
                self.selected = None;
                return Ok(());
            }
        };

        let skills = api.list_skills(api_key).await?;
        self.skills = skills;
        self.selected = default_skill
            .filter(|id| self.contains(id))
            .map(|id| id.to_string());
        Ok(())
    }

    /// Select a skill by id, validated by catalog membership.
    pub fn select(&mut self, id: &str) -> Result<(), ChatError> {
        if !self.contains(id) {
            return Err(ChatError::Validation(format!("unknown skill id: {}", id)));
        }
        self.selected = Some(id.to_string());
        Ok(())
    }

    /// Fall back to no skill.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected(&self) -> Option<&Skill> {
        self.selected
            .as_deref()
            .and_then(|id| self.skills.iter().find(|skill| skill.id == id))
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    fn contains(&self, id: &str) -> bool {
        self.skills.iter().any(|skill| skill.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use skillchat_models::{ChatCompletion, ChatRequest, ExportDocument};
    use skillchat_types::Attachment;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockApi {
        skills: Vec<Skill>,
        calls: AtomicUsize,
        fail_with: Option<fn() -> ChatError>,
    }

    impl MockApi {
        fn with_skills(skills: Vec<Skill>) -> Self {
            Self { skills, calls: AtomicUsize::new(0), fail_with: None }
        }

        fn failing(fail_with: fn() -> ChatError) -> Self {
            Self { skills: Vec::new(), calls: AtomicUsize::new(0), fail_with: Some(fail_with) }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChatApi for MockApi {
        async fn list_skills(&self, _api_key: &str) -> Result<Vec<Skill>, ChatError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.fail_with {
                Some(fail) => Err(fail()),
                None => Ok(self.skills.clone()),
            }
        }

        async fn upload(&self, _path: &Path) -> Result<Attachment, ChatError> {
            unimplemented!("not exercised by catalog tests")
        }

        async fn send_chat(
            &self,
            _api_key: &str,
            _request: &ChatRequest,
        ) -> Result<ChatCompletion, ChatError> {
            unimplemented!("not exercised by catalog tests")
        }

        async fn export(&self, _session_id: &str) -> Result<ExportDocument, ChatError> {
            unimplemented!("not exercised by catalog tests")
        }
    }

    fn skill(id: &str, name: &str) -> Skill {
        Skill {
            id: id.to_string(),
            name: name.to_string(),
            kind: "custom".to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_refresh_without_credential_makes_no_network_call() {
        let api = MockApi::with_skills(vec![skill("skill_01", "One")]);
        let mut catalog = SkillCatalog::new();

        catalog.refresh(&api, None, None).await.unwrap();
        assert!(catalog.is_empty());
        assert_eq!(api.call_count(), 0);

        catalog.refresh(&api, Some(""), None).await.unwrap();
        assert!(catalog.is_empty());
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_refresh_replaces_wholesale() {
        let api = MockApi::with_skills(vec![skill("skill_01", "One")]);
        let mut catalog = SkillCatalog::new();
        catalog.refresh(&api, Some("sk-ant-k"), None).await.unwrap();
        assert_eq!(catalog.skills().len(), 1);

        let api = MockApi::with_skills(vec![skill("skill_02", "Two"), skill("skill_03", "Three")]);
        catalog.refresh(&api, Some("sk-ant-k"), None).await.unwrap();
        assert_eq!(catalog.skills().len(), 2);
        assert!(!catalog.skills().iter().any(|s| s.id == "skill_01"));
    }

    #[tokio::test]
    async fn test_default_skill_preselected_when_present() {
        let api = MockApi::with_skills(vec![skill("skill_01", "One"), skill("skill_02", "Two")]);
        let mut catalog = SkillCatalog::new();
        catalog
            .refresh(&api, Some("sk-ant-k"), Some("skill_02"))
            .await
            .unwrap();
        assert_eq!(catalog.selected_id(), Some("skill_02"));
        assert_eq!(catalog.selected().unwrap().name, "Two");
    }

    #[tokio::test]
    async fn test_absent_default_falls_back_to_no_skill() {
        let api = MockApi::with_skills(vec![skill("skill_01", "One")]);
        let mut catalog = SkillCatalog::new();
        catalog
            .refresh(&api, Some("sk-ant-k"), Some("skill_gone"))
            .await
            .unwrap();
        assert_eq!(catalog.selected_id(), None);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_catalog() {
        let api = MockApi::with_skills(vec![skill("skill_01", "One")]);
        let mut catalog = SkillCatalog::new();
        catalog.refresh(&api, Some("sk-ant-k"), None).await.unwrap();

        let failing = MockApi::failing(|| ChatError::Transport("connection refused".to_string()));
        let err = catalog.refresh(&failing, Some("sk-ant-k"), None).await.unwrap_err();
        assert!(matches!(err, ChatError::Transport(_)));
        assert_eq!(catalog.skills().len(), 1);
    }

    #[test]
    fn test_select_validates_membership() {
        let mut catalog = SkillCatalog::new();
        catalog.skills = vec![skill("skill_01", "One")];

        assert!(catalog.select("skill_01").is_ok());
        assert_eq!(catalog.selected_id(), Some("skill_01"));

        let err = catalog.select("skill_99").unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
        assert_eq!(catalog.selected_id(), Some("skill_01"));

        catalog.clear_selection();
        assert_eq!(catalog.selected_id(), None);
    }
}
