use crate::types::{Message, Role};

/// Append-only log of prior user/assistant turns. The system message is
/// synthesized fresh on every question and never stored here. Unbounded
/// growth is accepted for a single interactive session.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        debug_assert!(message.role != Role::System);
        self.messages.push(message);
    }

    /// Last `n` messages in chronological order.
    pub fn recent(&self, n: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// One entry per question asked: the article that ranked first. Only the
/// latest entry is ever consulted, to detect topic changes between
/// consecutive questions.
#[derive(Debug, Default)]
pub struct MatchHistory {
    matches: Vec<String>,
}

impl MatchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, article_id: impl Into<String>) {
        self.matches.push(article_id.into());
    }

    pub fn last(&self) -> Option<&str> {
        self.matches.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }
}
