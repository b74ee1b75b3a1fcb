use skillchat_types::{generate_session_id, Message, SessionStats, Usage};

/// The single active conversation: identity, append-only log, running
/// statistics.
///
/// Exactly one session identifier is active at a time; every message in the
/// log belongs to it. Statistics are credited only on confirmed assistant
/// responses so they always reflect completed turns.
#[derive(Debug)]
pub struct ConversationSession {
    id: String,
    messages: Vec<Message>,
    stats: SessionStats,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self {
            id: generate_session_id(),
            messages: Vec::new(),
            stats: SessionStats::default(),
        }
    }

    /// Begin a fresh session: new identifier, empty log, zeroed statistics.
    /// Called once at startup and again on explicit clear.
    pub fn start(&mut self) {
        self.id = generate_session_id();
        self.messages.clear();
        self.stats.reset();
    }

    /// Append a user message. Statistics are untouched; a message that never
    /// round-tripped is never counted.
    pub fn append_user(&mut self, text: &str) {
        self.messages.push(Message::user(text));
    }

    /// Append a confirmed assistant response and credit the paired turn.
    pub fn append_assistant(&mut self, text: &str, usage: &Usage) {
        self.messages.push(Message::assistant(text));
        self.stats.credit(usage);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillchat_types::Role;

    #[test]
    fn test_append_and_credit() {
        let mut session = ConversationSession::new();
        assert!(session.is_empty());

        session.append_user("Hello");
        assert_eq!(session.stats(), SessionStats::default());

        session.append_assistant("Hi!", &Usage { input_tokens: 5, output_tokens: 3 });
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[0].role, Role::User);
        assert_eq!(session.messages()[1].role, Role::Assistant);
        assert_eq!(session.stats().message_count, 2);
        assert_eq!(session.stats().total_tokens, 8);
    }

    #[test]
    fn test_start_resets_everything_with_new_id() {
        let mut session = ConversationSession::new();
        let first_id = session.id().to_string();

        session.append_user("Hello");
        session.append_assistant("Hi!", &Usage { input_tokens: 5, output_tokens: 3 });

        session.start();
        assert_ne!(session.id(), first_id);
        assert!(session.is_empty());
        assert_eq!(session.stats(), SessionStats::default());
    }
}
