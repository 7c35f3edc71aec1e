use std::sync::{Arc, Mutex};

use ama_core::{Article, ChatModel, Embedder, Error, Message, Result, Role, TokenCounter};
use ama_pipeline::{KnowledgeAssembler, PromptBudget, Session};
use ama_storage::{EmbeddingCache, MemoryStore};
use async_trait::async_trait;

/// Maps texts onto a 2d "France vs UK" axis so ranking is predictable.
struct StubEmbedder;

#[async_trait]
impl Embedder for StubEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let lower = text.to_lowercase();
        if lower.contains("paris") || lower.contains("france") {
            Ok(vec![1.0, 0.05])
        } else if lower.contains("london") || lower.contains("uk") {
            Ok(vec![0.05, 1.0])
        } else {
            Ok(vec![0.5, 0.5])
        }
    }
}

/// Records every request it receives and replies with a canned answer.
struct StubChat {
    requests: Mutex<Vec<Vec<Message>>>,
    fail: bool,
}

impl StubChat {
    fn new() -> Self {
        Self { requests: Mutex::new(Vec::new()), fail: false }
    }

    fn failing() -> Self {
        Self { requests: Mutex::new(Vec::new()), fail: true }
    }

    fn last_request(&self) -> Vec<Message> {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl ChatModel for StubChat {
    fn name(&self) -> &str {
        "stub"
    }

    async fn complete(&self, messages: &[Message], _max_reply_tokens: u32) -> Result<String> {
        if self.fail {
            return Err(Error::Service("chat service down".into()));
        }
        self.requests.lock().unwrap().push(messages.to_vec());
        Ok("Paris is the capital of France.".to_string())
    }
}

struct WordCounter;

impl TokenCounter for WordCounter {
    fn count(&self, messages: &[Message]) -> usize {
        messages
            .iter()
            .map(|m| m.content.split_whitespace().count() + 4)
            .sum::<usize>()
            + 2
    }
}

fn corpus() -> Vec<Article> {
    vec![
        Article {
            id: "london".to_string(),
            content: "London is the capital of the UK and sits on the Thames.".to_string(),
        },
        Article {
            id: "paris".to_string(),
            content: "Paris is the capital of France and hosts the Louvre.".to_string(),
        },
    ]
}

async fn session_with(chat: Arc<StubChat>) -> Session {
    let cache = EmbeddingCache::new(Arc::new(MemoryStore::new()));
    Session::bootstrap(
        corpus(),
        &cache,
        Arc::new(StubEmbedder),
        chat,
        Arc::new(WordCounter),
        KnowledgeAssembler::default(),
        PromptBudget::default(),
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn question_is_answered_from_the_closest_article() {
    let chat = Arc::new(StubChat::new());
    let mut session = session_with(chat.clone()).await;

    let reply = session.ask("What is the capital of France?").await.unwrap();
    assert_eq!(reply, "Paris is the capital of France.");

    let request = chat.last_request();
    assert_eq!(request[0].role, Role::System);
    assert!(request[0].content.contains("Paris is the capital of France and hosts the Louvre."));
    assert!(!request[0].content.contains("London"));
    assert_eq!(request.last().unwrap().content, "What is the capital of France?");
}

#[tokio::test]
async fn reply_is_appended_to_the_conversation() {
    let chat = Arc::new(StubChat::new());
    let mut session = session_with(chat).await;

    session.ask("What is the capital of France?").await.unwrap();

    let conversation = session.conversation();
    assert_eq!(conversation.len(), 2);
    let last = conversation.last().unwrap();
    assert_eq!(last.role, Role::Assistant);
    assert_eq!(last.content, "Paris is the capital of France.");
}

#[tokio::test]
async fn later_turns_carry_prior_history() {
    let chat = Arc::new(StubChat::new());
    let mut session = session_with(chat.clone()).await;

    session.ask("What is the capital of France?").await.unwrap();
    session.ask("And what about the UK, what is London?").await.unwrap();

    let request = chat.last_request();
    // system + two prior turns + new question
    assert_eq!(request.len(), 4);
    assert_eq!(request[1].content, "What is the capital of France?");
    assert_eq!(request[2].role, Role::Assistant);
    // Topic changed, so the previous match's text rides along.
    assert!(request[0].content.contains("London is the capital of the UK"));
    assert!(request[0].content.contains("Paris is the capital of France and hosts the Louvre."));
}

#[tokio::test]
async fn failed_turn_leaves_conversation_untouched() {
    let chat = Arc::new(StubChat::failing());
    let mut session = session_with(chat).await;

    let result = session.ask("What is the capital of France?").await;
    assert!(matches!(result, Err(Error::Service(_))));
    assert!(session.conversation().is_empty());
}
