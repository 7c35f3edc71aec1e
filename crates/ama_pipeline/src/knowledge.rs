use std::collections::HashMap;

use ama_core::{Article, MatchHistory, ScoredArticle};
use tracing::debug;

/// Minimum similarity for a non-top article to contribute its text.
pub const SCORE_THRESHOLD: f32 = 0.80;

/// Picks which articles' text goes into the system context for one question:
/// the top match, the previous question's top match when the topic changed,
/// and then remaining articles scoring at or above the threshold, all under a
/// strict cap of `max_knowledge` articles total.
#[derive(Debug, Clone)]
pub struct KnowledgeAssembler {
    pub max_knowledge: usize,
    pub threshold: f32,
}

impl Default for KnowledgeAssembler {
    fn default() -> Self {
        Self { max_knowledge: 5, threshold: SCORE_THRESHOLD }
    }
}

impl KnowledgeAssembler {
    pub fn with_max_knowledge(max_knowledge: usize) -> Self {
        Self { max_knowledge, ..Self::default() }
    }

    /// Returns the concatenated knowledge text and records the top match in
    /// the history. An empty ranking yields empty knowledge and records
    /// nothing.
    pub fn assemble(
        &self,
        ranked: &[ScoredArticle],
        articles: &HashMap<String, Article>,
        history: &mut MatchHistory,
    ) -> String {
        let Some(top) = ranked.first() else {
            return String::new();
        };
        debug!("Resorting to find answer from: {}", top.id);

        let mut selected: Vec<&str> = vec![top.id.as_str()];

        // Carry the previous question's article across a topic change so
        // follow-up questions referencing it still have its text in context.
        if let Some(previous) = history.last() {
            if previous != top.id && selected.len() < self.max_knowledge {
                if let Some(article) = articles.get(previous) {
                    selected.push(article.id.as_str());
                }
            }
        }

        for scored in &ranked[1..] {
            if selected.len() >= self.max_knowledge {
                break;
            }
            if scored.score >= self.threshold && !selected.contains(&scored.id.as_str()) {
                selected.push(scored.id.as_str());
            }
        }

        debug!("Compiled knowledge of {} articles", selected.len());

        let knowledge = selected
            .iter()
            .filter_map(|id| articles.get(*id))
            .map(|article| article.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        history.record(top.id.clone());
        knowledge
    }
}
