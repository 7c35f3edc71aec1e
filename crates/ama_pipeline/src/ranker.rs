use ama_core::ScoredArticle;

/// Cosine similarity between two vectors, in [-1, 1]. A zero-magnitude input
/// has no direction to compare; it scores 0.0 instead of dividing by zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    dot / (mag_a * mag_b)
}

/// Scores every corpus entry against the query and returns them sorted
/// strictly descending. The sort is stable, so equal scores keep the corpus
/// iteration order.
pub fn rank(query: &[f32], corpus: &[(String, Vec<f32>)]) -> Vec<ScoredArticle> {
    let mut scored: Vec<ScoredArticle> = corpus
        .iter()
        .map(|(id, embedding)| ScoredArticle {
            id: id.clone(),
            score: cosine_similarity(query, embedding),
        })
        .collect();
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored
}
