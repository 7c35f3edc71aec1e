use std::collections::HashMap;
use std::fmt;

use ama_core::{ChatModel, Embedder, Message, Result, Role};
use async_trait::async_trait;

const DUMMY_DIMENSIONS: usize = 1536;

/// Deterministic offline model. Embeddings are built from text length and
/// character frequencies, so similar texts land close together without any
/// network call; completions echo the question back.
#[derive(Default)]
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

#[async_trait]
impl Embedder for DummyModel {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut embedding = vec![0.0; DUMMY_DIMENSIONS];
        let text_len = text.len().max(1) as f32;
        embedding[0] = text_len / 1000.0;

        let mut char_freq = HashMap::new();
        for c in text.chars() {
            *char_freq.entry(c).or_insert(0usize) += 1;
        }
        // Bucket by char code so the same text always yields the same vector.
        for (c, count) in char_freq {
            let slot = 1 + (c as usize) % (DUMMY_DIMENSIONS - 1);
            embedding[slot] += count as f32 / text_len;
        }
        Ok(embedding)
    }
}

#[async_trait]
impl ChatModel for DummyModel {
    fn name(&self) -> &str {
        "dummy"
    }

    async fn complete(&self, messages: &[Message], _max_reply_tokens: u32) -> Result<String> {
        let question = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or("");
        Ok(format!("[dummy] no model configured; you asked: {question}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn embeddings_are_deterministic() {
        let model = DummyModel;
        let a = model.embed("What is the capital of France?").await.unwrap();
        let b = model.embed("What is the capital of France?").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), DUMMY_DIMENSIONS);
        assert!(a[0] > 0.0);
    }

    #[tokio::test]
    async fn completion_echoes_last_user_message() {
        let model = DummyModel;
        let messages = vec![Message::system("ctx"), Message::user("hello?")];
        let reply = model.complete(&messages, 1000).await.unwrap();
        assert!(reply.contains("hello?"));
    }
}
