//! Convenience re-exports for common use.

pub use crate::booking::{BookingClient, CalComClient, CreateBookingRequest};
pub use crate::config::{AssistantConfig, SessionConfig};
pub use crate::error::{CalChatError, FailureKind, Result};
pub use crate::executor::ActionExecutor;
pub use crate::model::{ModelProvider, ModelReply, ModelRequest, OpenAiProvider};
pub use crate::orchestrator::{Conversation, ConversationOrchestrator, Session};
pub use crate::tools::{ToolName, ToolParameters, ToolSchema, ToolSpec};
pub use crate::types::{
    BookingRecord, BookingStatus, ModelMessage, Role, ToolInvocation, ToolOutcome, ToolResult,
};
