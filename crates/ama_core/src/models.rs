use async_trait::async_trait;

use crate::types::Message;
use crate::Result;

/// Maps text to a fixed-dimensionality embedding vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Generates a chat completion for an ordered list of role-tagged messages.
#[async_trait]
pub trait ChatModel: Send + Sync {
    fn name(&self) -> &str;

    async fn complete(&self, messages: &[Message], max_reply_tokens: u32) -> Result<String>;
}

/// Counts model tokens for a message list, including the per-message framing
/// overhead of the target chat model.
pub trait TokenCounter: Send + Sync {
    fn count(&self, messages: &[Message]) -> usize;
}
