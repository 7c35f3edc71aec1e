use std::sync::Arc;

use ama_core::{ChatModel, Embedder, Error, Result};

pub mod dummy;
pub mod openai;

pub use dummy::DummyModel;
pub use openai::OpenAiModel;

/// Builds the embedding and chat handles for the requested model. A single
/// concrete model backs both capabilities; the two handles share it.
pub fn create_model(
    name: &str,
    api_key: Option<String>,
    base_url: Option<String>,
) -> Result<(Arc<dyn Embedder>, Arc<dyn ChatModel>)> {
    match name {
        "openai" => {
            let model = Arc::new(OpenAiModel::new(api_key, base_url)?);
            Ok((model.clone() as Arc<dyn Embedder>, model as Arc<dyn ChatModel>))
        }
        "dummy" => {
            let model = Arc::new(DummyModel);
            Ok((model.clone() as Arc<dyn Embedder>, model as Arc<dyn ChatModel>))
        }
        other => Err(Error::Config(format!(
            "unknown model '{other}', expected 'openai' or 'dummy'"
        ))),
    }
}
