//! Per-conversation session state.

use crate::config::SessionConfig;
use crate::types::{ContentPart, ModelMessage, ToolInvocation, ToolResult};

/// Append-only message history for one conversation.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<ModelMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user message.
    pub fn add_user_message(&mut self, text: impl Into<String>) {
        self.messages.push(ModelMessage::user(text));
    }

    /// Append an assistant text message.
    pub fn add_assistant_message(&mut self, text: impl Into<String>) {
        self.messages.push(ModelMessage::assistant(text));
    }

    /// Append an assistant message carrying a tool invocation.
    pub fn add_invocation(&mut self, invocation: ToolInvocation) {
        self.messages
            .push(ModelMessage::assistant_invocation(invocation));
    }

    /// Append the result for a previously appended invocation.
    pub fn add_tool_result(&mut self, result: ToolResult) {
        self.messages.push(ModelMessage::tool_result(result));
    }

    /// All messages, oldest first.
    pub fn messages(&self) -> &[ModelMessage] {
        &self.messages
    }

    /// Whether some appended invocation still lacks its result.
    ///
    /// The orchestrator must not request another model turn while this holds.
    pub fn has_unresolved_invocation(&self) -> bool {
        let invocations = self.count_parts(|p| matches!(p, ContentPart::ToolCall(_)));
        let results = self.count_parts(|p| matches!(p, ContentPart::ToolResult(_)));
        invocations != results
    }

    fn count_parts(&self, pred: impl Fn(&ContentPart) -> bool) -> usize {
        self.messages
            .iter()
            .flat_map(|m| m.content.iter())
            .filter(|p| pred(p))
            .count()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Per-conversation context: user identity, timezone, message history.
///
/// Owned by one conversation; mutated only by the orchestrator; dropped when
/// the conversation ends (not persisted).
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    conversation: Conversation,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            conversation: Conversation::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub(crate) fn conversation_mut(&mut self) -> &mut Conversation {
        &mut self.conversation
    }
}
