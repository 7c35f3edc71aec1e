pub mod backends;
pub mod cache;
pub mod corpus;

pub use backends::{FileStore, MemoryStore};
pub use cache::EmbeddingCache;
pub use corpus::load_corpus;
