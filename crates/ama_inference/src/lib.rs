pub mod models;
pub mod tokens;

pub use models::{create_model, DummyModel, OpenAiModel};
pub use tokens::ChatMlCounter;
