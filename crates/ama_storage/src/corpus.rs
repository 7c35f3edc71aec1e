use std::path::Path;

use ama_core::{Article, Error, Result};
use tracing::info;

/// Loads every `*.txt` file under `dir` as one article, id = file stem.
/// Articles come back name-sorted so iteration order, and therefore ranking
/// tie-breaks, stay identical across runs.
pub async fn load_corpus(dir: impl AsRef<Path>) -> Result<Vec<Article>> {
    let dir = dir.as_ref();
    info!("Attempting to check articles in {}...", dir.display());

    let mut articles = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let content = tokio::fs::read_to_string(&path).await?;
        articles.push(Article { id: stem.to_string(), content });
    }

    if articles.is_empty() {
        return Err(Error::Config(format!(
            "no .txt articles found in {}",
            dir.display()
        )));
    }

    articles.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(articles)
}
