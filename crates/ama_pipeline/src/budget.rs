use ama_core::{Message, TokenCounter};
use tracing::debug;

/// Token budgets for one outgoing request. Two independent ceilings: the
/// system message alone, and the whole message list.
#[derive(Debug, Clone)]
pub struct PromptBudget {
    pub system_token_limit: usize,
    pub total_token_limit: usize,
    pub history_window: usize,
    /// Hard stop for the truncation loop, in case the counter never reports
    /// a smaller count for shorter text.
    pub max_truncation_iterations: usize,
}

impl Default for PromptBudget {
    fn default() -> Self {
        Self {
            system_token_limit: 2500,
            total_token_limit: 3500,
            history_window: 9,
            max_truncation_iterations: 10,
        }
    }
}

impl PromptBudget {
    /// Builds the outgoing message list: truncated system message, as much
    /// recent history as fits under the total ceiling (in chronological
    /// order), and the new user message, which is always included.
    pub fn build(
        &self,
        counter: &dyn TokenCounter,
        system_text: &str,
        history: &[Message],
        user: Message,
    ) -> Vec<Message> {
        let system = self.truncate_system(counter, system_text);

        let mut accepted: Vec<Message> = Vec::new();
        let window_start = history.len().saturating_sub(self.history_window);
        for candidate in history[window_start..].iter().rev() {
            let mut trial = Vec::with_capacity(accepted.len() + 3);
            trial.push(system.clone());
            trial.push(user.clone());
            trial.extend(accepted.iter().cloned());
            trial.push(candidate.clone());
            if counter.count(&trial) < self.total_token_limit {
                accepted.push(candidate.clone());
            }
        }
        // The walk accepts newest-first; restore chronological order.
        accepted.reverse();

        let mut messages = Vec::with_capacity(accepted.len() + 2);
        messages.push(system);
        messages.extend(accepted);
        messages.push(user);
        debug!("Total messages count is: {}", messages.len());
        messages
    }

    /// Shrinks the system text word-proportionally until it fits. Each
    /// iteration keeps `floor(words * limit / tokens)` words, dropping at
    /// least one, so the loop converges even when the token-to-word ratio
    /// barely moves.
    fn truncate_system(&self, counter: &dyn TokenCounter, system_text: &str) -> Message {
        let mut system = Message::system(system_text);
        let mut tokens = counter.count(std::slice::from_ref(&system));

        for _ in 0..self.max_truncation_iterations {
            if tokens <= self.system_token_limit {
                break;
            }
            let words: Vec<&str> = system.content.split_whitespace().collect();
            if words.is_empty() {
                break;
            }
            let keep = (words.len() * self.system_token_limit / tokens).min(words.len() - 1);
            debug!(
                "System message at {} tokens, keeping {} of {} words",
                tokens,
                keep,
                words.len()
            );
            system.content = words[..keep].join(" ");
            tokens = counter.count(std::slice::from_ref(&system));
        }
        system
    }
}
