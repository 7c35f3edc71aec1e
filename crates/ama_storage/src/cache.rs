use std::sync::Arc;

use ama_core::{Embedder, EmbeddingStore, Result};
use tracing::info;

/// Get-or-compute front for an [`EmbeddingStore`]. Each previously uncached
/// article triggers exactly one embedding call and one save; cached articles
/// never touch the embedding service again.
pub struct EmbeddingCache {
    store: Arc<dyn EmbeddingStore>,
}

impl EmbeddingCache {
    pub fn new(store: Arc<dyn EmbeddingStore>) -> Self {
        Self { store }
    }

    /// A service failure here propagates uncaught: startup embedding
    /// generation aborts on the first article that cannot be embedded.
    pub async fn get_or_compute(
        &self,
        embedder: &dyn Embedder,
        article_id: &str,
        article_text: &str,
    ) -> Result<Vec<f32>> {
        if let Some(embedding) = self.store.load(article_id).await? {
            info!("Article '{}' embeddings already generated. Skipping..", article_id);
            return Ok(embedding);
        }

        info!("Article '{}' embeddings not generated. Generating..", article_id);
        let embedding = embedder.embed(article_text).await?;
        self.store.save(article_id, &embedding).await?;
        Ok(embedding)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use ama_core::Error;
    use async_trait::async_trait;

    use super::*;
    use crate::backends::MemoryStore;

    struct CountingEmbedder {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingEmbedder {
        fn new(fail: bool) -> Self {
            Self { calls: AtomicUsize::new(0), fail }
        }
    }

    #[async_trait]
    impl Embedder for CountingEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::Service("embedding service down".into()));
            }
            Ok(vec![text.len() as f32, 1.0, 0.0])
        }
    }

    #[tokio::test]
    async fn second_call_skips_the_service() {
        let cache = EmbeddingCache::new(Arc::new(MemoryStore::new()));
        let embedder = CountingEmbedder::new(false);

        let first = cache.get_or_compute(&embedder, "paris", "Paris is...").await.unwrap();
        let second = cache.get_or_compute(&embedder, "paris", "Paris is...").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn service_failure_propagates() {
        let cache = EmbeddingCache::new(Arc::new(MemoryStore::new()));
        let embedder = CountingEmbedder::new(true);
        let result = cache.get_or_compute(&embedder, "paris", "Paris is...").await;
        assert!(matches!(result, Err(Error::Service(_))));
    }
}
