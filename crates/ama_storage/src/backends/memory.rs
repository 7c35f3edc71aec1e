use std::collections::HashMap;

use async_trait::async_trait;
use ama_core::{EmbeddingStore, Result};
use tokio::sync::RwLock;

/// Non-persistent backend, used by tests and as a cheap stand-in when no
/// cache directory is wanted.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<f32>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmbeddingStore for MemoryStore {
    async fn load(&self, article_id: &str) -> Result<Option<Vec<f32>>> {
        let entries = self.entries.read().await;
        Ok(entries.get(article_id).cloned())
    }

    async fn save(&self, article_id: &str, embedding: &[f32]) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(article_id.to_string(), embedding.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_overwrites_prior_value() {
        let store = MemoryStore::new();
        store.save("rome", &[1.0]).await.unwrap();
        store.save("rome", &[2.0]).await.unwrap();
        assert_eq!(store.load("rome").await.unwrap(), Some(vec![2.0]));
    }
}
