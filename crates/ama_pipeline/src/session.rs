use std::collections::HashMap;
use std::sync::Arc;

use ama_core::{
    Article, ChatModel, Conversation, Embedder, MatchHistory, Message, Result, TokenCounter,
};
use ama_storage::EmbeddingCache;
use tracing::{debug, info};

use crate::budget::PromptBudget;
use crate::knowledge::KnowledgeAssembler;
use crate::ranker::rank;

/// Instruction prefixed to the knowledge text on every question.
pub const SYSTEM_PROMPT: &str = "You are a chat bot who is supposed to help users with tourism \
related questions. You should politely decline answering any question not related to tourism. \
You should always answer in the same language as the question is. Your only source of knowledge \
is following text: ";

pub const MAX_REPLY_TOKENS: u32 = 1000;

/// One interactive Q&A session over a fixed corpus. Owns all mutable state
/// (conversation log, match history) so nothing lives in globals; each call
/// to [`Session::ask`] runs the whole embed → rank → assemble → budget →
/// complete pipeline for one question.
pub struct Session {
    articles: HashMap<String, Article>,
    /// Corpus-ordered so equal-score ranking ties are deterministic.
    embeddings: Vec<(String, Vec<f32>)>,
    conversation: Conversation,
    matches: MatchHistory,
    embedder: Arc<dyn Embedder>,
    chat: Arc<dyn ChatModel>,
    counter: Arc<dyn TokenCounter>,
    assembler: KnowledgeAssembler,
    budget: PromptBudget,
}

impl Session {
    /// Embeds (or loads from cache) every article, then returns a ready
    /// session. Fails on the first article whose embedding cannot be
    /// produced; no partial corpus is served.
    pub async fn bootstrap(
        articles: Vec<Article>,
        cache: &EmbeddingCache,
        embedder: Arc<dyn Embedder>,
        chat: Arc<dyn ChatModel>,
        counter: Arc<dyn TokenCounter>,
        assembler: KnowledgeAssembler,
        budget: PromptBudget,
    ) -> Result<Self> {
        let mut embeddings = Vec::with_capacity(articles.len());
        for article in &articles {
            let embedding = cache
                .get_or_compute(embedder.as_ref(), &article.id, &article.content)
                .await?;
            embeddings.push((article.id.clone(), embedding));
        }
        info!("Articles and embeddings are loaded. AMA!");

        Ok(Self {
            articles: articles.into_iter().map(|a| (a.id.clone(), a)).collect(),
            embeddings,
            conversation: Conversation::new(),
            matches: MatchHistory::new(),
            embedder,
            chat,
            counter,
            assembler,
            budget,
        })
    }

    pub async fn ask(&mut self, question: &str) -> Result<String> {
        let question_embedding = self.embedder.embed(question).await?;

        debug!("Comparing question embeddings to articles..");
        let ranked = rank(&question_embedding, &self.embeddings);
        debug!("Embeddings scores: {:?}", ranked);

        let knowledge = self.assembler.assemble(&ranked, &self.articles, &mut self.matches);
        let system_text = format!("{SYSTEM_PROMPT}{knowledge}");

        let history = self.conversation.recent(self.budget.history_window);
        let user = Message::user(question);
        let outgoing =
            self.budget
                .build(self.counter.as_ref(), &system_text, history, user.clone());

        let reply = self.chat.complete(&outgoing, MAX_REPLY_TOKENS).await?;

        // Recorded only after a successful completion, so a failed turn
        // leaves the user/assistant alternation intact.
        self.conversation.push(user);
        self.conversation.push(Message::assistant(reply.clone()));
        Ok(reply)
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn article_count(&self) -> usize {
        self.articles.len()
    }
}
