//! src/llm/mod.rs

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::errors::StyleError;

pub mod openai;
pub mod prompt;
pub mod stream;

pub use openai::OpenAiClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// 生成参数。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self { temperature: 0.7, max_tokens: 2000 }
    }
}

/// 流式输出的文本增量。
pub type DeltaStream = BoxStream<'static, Result<String, StyleError>>;

/// The `LLMClient` trait defines the interface for a chat-completion model client.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Returns the name of the LLM client.
    fn name(&self) -> &str;

    /// Sends the conversation and waits for the complete response text.
    async fn chat(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<String, StyleError>;

    /// Sends the conversation and yields text deltas until the stream ends.
    async fn chat_stream(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<DeltaStream, StyleError>;
}

/// Factory：根据配置创建 LLM 客户端。
pub fn create_llm_client(config: &LlmConfig) -> Result<Box<dyn LLMClient>, StyleError> {
    Ok(Box::new(OpenAiClient::new(config)?))
}
