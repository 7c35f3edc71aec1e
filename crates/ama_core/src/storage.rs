use async_trait::async_trait;

use crate::Result;

/// Key-value persistence for article embeddings, keyed by article id.
#[async_trait]
pub trait EmbeddingStore: Send + Sync {
    /// Load a previously saved embedding, or `None` if the id was never saved.
    async fn load(&self, article_id: &str) -> Result<Option<Vec<f32>>>;

    /// Persist an embedding for the given id, replacing any prior value.
    async fn save(&self, article_id: &str, embedding: &[f32]) -> Result<()>;
}
