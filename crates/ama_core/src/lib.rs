pub mod error;
pub mod models;
pub mod state;
pub mod storage;
pub mod types;

pub use error::Error;
pub use models::{ChatModel, Embedder, TokenCounter};
pub use state::{Conversation, MatchHistory};
pub use storage::EmbeddingStore;
pub use types::{Article, Message, Role, ScoredArticle};

pub type Result<T> = std::result::Result<T, Error>;
