pub mod budget;
pub mod knowledge;
pub mod ranker;
pub mod session;

pub use budget::PromptBudget;
pub use knowledge::KnowledgeAssembler;
pub use ranker::{cosine_similarity, rank};
pub use session::Session;
