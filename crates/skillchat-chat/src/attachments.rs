use skillchat_types::Attachment;

/// Ordered set of files staged for the next outgoing message.
///
/// Entries are created on successful upload, consumed exactly once when a
/// send succeeds, or removed explicitly by the user before send. Nothing
/// here retries or re-uploads.
#[derive(Debug, Default)]
pub struct AttachmentManager {
    pending: Vec<Attachment>,
}

impl AttachmentManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an upload result for the next send.
    pub fn stage(&mut self, attachment: Attachment) {
        self.pending.push(attachment);
    }

    /// Remove the first staged attachment with the given filename. Returns
    /// false (no-op) when nothing matches.
    pub fn remove(&mut self, filename: &str) -> bool {
        match self.pending.iter().position(|a| a.filename == filename) {
            Some(index) => {
                self.pending.remove(index);
                true
            }
            None => false,
        }
    }

    /// Read-only snapshot of the pending set, in staging order.
    pub fn pending(&self) -> &[Attachment] {
        &self.pending
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staging_preserves_order() {
        let mut manager = AttachmentManager::new();
        manager.stage(Attachment::new("a.txt"));
        manager.stage(Attachment::new("b.txt"));

        let names: Vec<&str> =
            manager.pending().iter().map(|a| a.filename.as_str()).collect();
        assert_eq!(names, ["a.txt", "b.txt"]);
    }

    #[test]
    fn test_remove_first_match_only() {
        let mut manager = AttachmentManager::new();
        manager.stage(Attachment::new("dup.txt"));
        manager.stage(Attachment::new("other.txt"));
        manager.stage(Attachment::new("dup.txt"));

        assert!(manager.remove("dup.txt"));
        let names: Vec<&str> =
            manager.pending().iter().map(|a| a.filename.as_str()).collect();
        assert_eq!(names, ["other.txt", "dup.txt"]);

        assert!(!manager.remove("absent.txt"));
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_clear_consumes_everything() {
        let mut manager = AttachmentManager::new();
        manager.stage(Attachment::new("a.txt"));
        manager.clear();
        assert!(manager.is_empty());
    }
}
