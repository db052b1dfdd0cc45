//! Language-model service interface.

mod openai;

pub use openai::OpenAiProvider;

use async_trait::async_trait;

use crate::error::Result;
use crate::tools::ToolSpec;
use crate::types::{ModelMessage, ToolInvocation};

/// A request to the language-model service: full history plus tool schema.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub messages: Vec<ModelMessage>,
    pub tools: Vec<ToolSpec>,
}

/// What the model produced: a final text reply, or one tool invocation.
///
/// The service's dynamic tool-calling JSON is parsed into this tagged form
/// immediately; unknown names and bad arguments are caught by the executor's
/// schema validation rather than trusted.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply {
    Text(String),
    Invocation(ToolInvocation),
}

/// The language-model service, treated as a black box.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name for logging.
    fn provider_name(&self) -> &str;

    /// One model round-trip over the given history and tool schema.
    async fn respond(&self, request: &ModelRequest) -> Result<ModelReply>;
}
