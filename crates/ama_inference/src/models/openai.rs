use std::fmt;
use std::time::Duration;

use ama_core::{ChatModel, Embedder, Error, Message, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

const EMBEDDING_MODEL: &str = "text-embedding-ada-002";
const CHAT_MODEL: &str = "gpt-3.5-turbo";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

pub struct OpenAiModel {
    client: Client,
    api_key: String,
    base_url: String,
}

impl fmt::Debug for OpenAiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiModel")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl OpenAiModel {
    pub fn new(api_key: Option<String>, base_url: Option<String>) -> Result<Self> {
        let api_key = api_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::Config("OPENAI_API_KEY is required".to_string()))?;
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
        })
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Service(format!("OpenAI API {status}: {body}")));
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl Embedder for OpenAiModel {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbeddingRequest { model: EMBEDDING_MODEL, input: text };
        let response: EmbeddingResponse = self.post_json("/embeddings", &request).await?;
        let data = response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| Error::Service("embedding response contained no data".to_string()))?;
        Ok(data.embedding)
    }
}

#[async_trait]
impl ChatModel for OpenAiModel {
    fn name(&self) -> &str {
        CHAT_MODEL
    }

    async fn complete(&self, messages: &[Message], max_reply_tokens: u32) -> Result<String> {
        debug!("Messages to be sent to OpenAI: {}", messages.len());
        let request = ChatRequest {
            model: CHAT_MODEL,
            messages,
            max_tokens: max_reply_tokens,
        };
        let response: ChatResponse = self.post_json("/chat/completions", &request).await?;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::Service("chat response contained no choices".to_string()))?;
        Ok(choice.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_requires_api_key() {
        assert!(matches!(OpenAiModel::new(None, None), Err(Error::Config(_))));
        assert!(matches!(
            OpenAiModel::new(Some(String::new()), None),
            Err(Error::Config(_))
        ));
        assert!(OpenAiModel::new(Some("sk-test".to_string()), None).is_ok());
    }

    #[test]
    fn chat_request_serializes_roles_lowercase() {
        let messages = vec![Message::system("ctx"), Message::user("q")];
        let request = ChatRequest { model: CHAT_MODEL, messages: &messages, max_tokens: 1000 };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["max_tokens"], 1000);
    }
}
