use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ama_core::{EmbeddingStore, Result};

/// One `<article_id>.json` file per embedding, each holding a bare JSON array
/// of floats. A malformed file is a fatal load error; the cache is never
/// silently regenerated over a corrupt entry.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn entry_path(&self, article_id: &str) -> PathBuf {
        self.dir.join(format!("{article_id}.json"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl EmbeddingStore for FileStore {
    async fn load(&self, article_id: &str) -> Result<Option<Vec<f32>>> {
        let path = self.entry_path(article_id);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let embedding: Vec<f32> = serde_json::from_str(&raw)?;
        Ok(Some(embedding))
    }

    async fn save(&self, article_id: &str, embedding: &[f32]) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let raw = serde_json::to_string(embedding)?;
        tokio::fs::write(self.entry_path(article_id), raw).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_returns_none_for_missing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.load("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("embeddings"));
        let embedding = vec![0.25, -1.0, 0.5];
        store.save("paris", &embedding).await.unwrap();
        let loaded = store.load("paris").await.unwrap().unwrap();
        assert_eq!(loaded, embedding);
    }

    #[tokio::test]
    async fn corrupt_entry_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("bad.json"), "not json")
            .await
            .unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.load("bad").await.is_err());
    }
}
