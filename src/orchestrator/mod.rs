//! The conversation loop: model round-trips driving tool execution.

mod session;

pub use session::{Conversation, Session};

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::booking::CalComClient;
use crate::config::{AssistantConfig, SessionConfig};
use crate::error::{CalChatError, Result};
use crate::executor::ActionExecutor;
use crate::model::{ModelProvider, ModelReply, ModelRequest, OpenAiProvider};
use crate::types::ModelMessage;
use crate::util::timeout::with_timeout;

const DEFAULT_MAX_STEPS: u32 = 5;
const DEFAULT_MODEL_TIMEOUT: Duration = Duration::from_secs(60);

/// Reply used when a turn fails for reasons the model cannot explain.
const FALLBACK_REPLY: &str =
    "Sorry, something went wrong while handling that. Please try again.";

/// Reply used when the tool loop hits its step cap.
const MAX_STEPS_REPLY: &str = "Sorry, I couldn't complete that in a reasonable number of \
                               steps. Could you rephrase or split the request?";

/// Drives one conversation: sends history plus the tool schema to the model,
/// executes any invocation it proposes, and repeats until the model answers
/// in plain text.
pub struct ConversationOrchestrator {
    provider: Arc<dyn ModelProvider>,
    executor: ActionExecutor,
    max_steps: u32,
    model_timeout: Duration,
}

impl ConversationOrchestrator {
    pub fn new(provider: Arc<dyn ModelProvider>, executor: ActionExecutor) -> Self {
        Self {
            provider,
            executor,
            max_steps: DEFAULT_MAX_STEPS,
            model_timeout: DEFAULT_MODEL_TIMEOUT,
        }
    }

    /// Wire up the default OpenAI + Cal.com stack from configuration.
    pub fn from_config(config: &AssistantConfig) -> Self {
        let provider = OpenAiProvider::new(&config.openai_api_key)
            .with_model(&config.model)
            .with_base_url(&config.openai_base_url);
        let client = CalComClient::new(&config.cal_api_key).with_base_url(&config.cal_base_url);
        let executor =
            ActionExecutor::new(Arc::new(client)).with_call_timeout(config.booking_timeout);
        Self::new(Arc::new(provider), executor)
            .with_max_steps(config.max_tool_steps)
            .with_model_timeout(config.model_timeout)
    }

    /// Cap on consecutive tool invocations per user message.
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_model_timeout(mut self, model_timeout: Duration) -> Self {
        self.model_timeout = model_timeout;
        self
    }

    /// Handle one user message to completion and return the reply text.
    ///
    /// Turn-fatal failures (malformed model replies, model-service transport
    /// errors) are logged and surfaced as an apology; the session stays
    /// intact for the next message.
    pub async fn handle_user_message(&self, session: &mut Session, utterance: &str) -> String {
        match self.run_turn(session, utterance).await {
            Ok(reply) => reply,
            Err(e) => {
                let reply = match e {
                    CalChatError::MaxStepsExceeded(steps) => {
                        warn!(steps, "turn ended at the tool step cap");
                        MAX_STEPS_REPLY
                    }
                    _ => {
                        error!(error = %e, "turn failed");
                        FALLBACK_REPLY
                    }
                };
                session.conversation_mut().add_assistant_message(reply);
                reply.to_string()
            }
        }
    }

    async fn run_turn(&self, session: &mut Session, utterance: &str) -> Result<String> {
        session.conversation_mut().add_user_message(utterance);
        let system = ModelMessage::system(self.system_prompt(session.config()));

        for step in 0..self.max_steps {
            debug_assert!(!session.conversation().has_unresolved_invocation());

            let mut messages = vec![system.clone()];
            messages.extend_from_slice(session.conversation().messages());
            let request = ModelRequest {
                messages,
                tools: self.executor.schema().describe().to_vec(),
            };

            debug!(step, "requesting model turn");
            let reply =
                with_timeout(self.model_timeout, self.provider.respond(&request)).await?;

            match reply {
                ModelReply::Text(text) => {
                    session.conversation_mut().add_assistant_message(&text);
                    return Ok(text);
                }
                ModelReply::Invocation(invocation) => {
                    debug!(tool = %invocation.name, "model requested a tool invocation");
                    session.conversation_mut().add_invocation(invocation.clone());
                    let result = self.executor.execute(&invocation, session.config()).await;
                    session.conversation_mut().add_tool_result(result);
                }
            }
        }

        Err(CalChatError::MaxStepsExceeded(self.max_steps))
    }

    fn system_prompt(&self, config: &SessionConfig) -> String {
        format!(
            "You are a helpful assistant for managing calendar bookings.\n\
             - You can list, book, and cancel events.\n\
             - Confirm the desired date and time with the user before booking.\n\
             - The user's email is '{}'; use it for all operations.\n\
             - The user's timezone is '{}'; interpret times in it.\n\
             - When listing events, include each booking's ID, since \
             cancellation requires it.\n\
             - Be polite and conversational.",
            config.user_email, config.timezone
        )
    }
}
