//! OpenAI chat-completions provider.

use serde::Deserialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{CalChatError, Result};
use crate::http::{bearer_headers, shared_client, status_to_error};
use crate::types::{ModelMessage, Role, ToolInvocation};

use super::{ModelProvider, ModelReply, ModelRequest};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o";

pub struct OpenAiProvider {
    model: String,
    api_key: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_request_body(&self, request: &ModelRequest) -> serde_json::Value {
        let mut messages = Vec::new();
        for msg in &request.messages {
            match msg.role {
                Role::System => {
                    messages.push(serde_json::json!({
                        "role": "system",
                        "content": msg.text(),
                    }));
                }
                Role::User => {
                    messages.push(serde_json::json!({
                        "role": "user",
                        "content": msg.text(),
                    }));
                }
                Role::Assistant => {
                    if let Some(inv) = msg.invocation() {
                        messages.push(serde_json::json!({
                            "role": "assistant",
                            "content": null,
                            "tool_calls": [{
                                "id": inv.id,
                                "type": "function",
                                "function": {
                                    "name": inv.name,
                                    "arguments": inv.arguments.to_string(),
                                },
                            }],
                        }));
                    } else {
                        messages.push(serde_json::json!({
                            "role": "assistant",
                            "content": msg.text(),
                        }));
                    }
                }
                Role::Tool => {
                    if let Some(result) = msg.tool_outcome() {
                        let content = serde_json::to_string(&result.outcome)
                            .unwrap_or_else(|_| "{}".to_string());
                        messages.push(serde_json::json!({
                            "role": "tool",
                            "tool_call_id": result.invocation_id,
                            "content": content,
                        }));
                    }
                }
            }
        }

        let tools: Vec<serde_json::Value> = request
            .tools
            .iter()
            .map(|spec| {
                serde_json::json!({
                    "type": "function",
                    "function": {
                        "name": spec.name.to_string(),
                        "description": spec.description,
                        "parameters": spec.parameters.schema,
                    },
                })
            })
            .collect();

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "temperature": 0,
        });
        if !tools.is_empty() {
            body["tools"] = serde_json::Value::Array(tools);
        }
        body
    }
}

#[async_trait::async_trait]
impl ModelProvider for OpenAiProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn respond(&self, request: &ModelRequest) -> Result<ModelReply> {
        let body = self.build_request_body(request);
        let url = format!("{}/chat/completions", self.base_url);

        debug!(model = %self.model, "chat completion request");
        let resp = shared_client()
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let data: ChatResponse = resp.json().await?;
        let choice = data.choices.into_iter().next().ok_or_else(|| {
            CalChatError::MalformedModelReply("no choices in response".into())
        })?;

        let mut tool_calls = choice.message.tool_calls.unwrap_or_default();
        if tool_calls.len() > 1 {
            // The core drives one invocation per response; extras are dropped.
            warn!(count = tool_calls.len(), "model returned multiple tool calls; using the first");
        }
        if let Some(tc) = tool_calls.drain(..).next() {
            let arguments = serde_json::from_str(&tc.function.arguments).map_err(|e| {
                CalChatError::MalformedModelReply(format!(
                    "tool call arguments are not valid JSON: {e}"
                ))
            })?;
            let id = if tc.id.is_empty() {
                Uuid::new_v4().to_string()
            } else {
                tc.id
            };
            return Ok(ModelReply::Invocation(ToolInvocation {
                id,
                name: tc.function.name,
                arguments,
            }));
        }

        match choice.message.content {
            Some(text) if !text.is_empty() => Ok(ModelReply::Text(text)),
            _ => Err(CalChatError::MalformedModelReply(
                "choice carries neither text nor a tool call".into(),
            )),
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: WireMessage,
}

#[derive(Deserialize)]
struct WireMessage {
    content: Option<String>,
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Deserialize)]
struct WireToolCall {
    #[serde(default)]
    id: String,
    function: WireFunction,
}

#[derive(Deserialize)]
struct WireFunction {
    name: String,
    arguments: String,
}
