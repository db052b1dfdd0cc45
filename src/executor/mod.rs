//! Validation-and-dispatch boundary between model output and the scheduling
//! API.
//!
//! All failures come back as `ToolResult` data for the model to phrase, never
//! as errors to the caller.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::booking::{BookingClient, CreateBookingRequest};
use crate::config::SessionConfig;
use crate::error::{CalChatError, Result};
use crate::tools::{validate_arguments, ToolArguments, ToolName, ToolSchema};
use crate::types::{ToolInvocation, ToolResult};
use crate::util::retry::RetryPolicy;
use crate::util::timeout::with_timeout;

/// Arguments for `book_event` after structural validation.
#[derive(Debug, Deserialize)]
struct BookEventArgs {
    start_time: String,
    attendee_name: String,
    reason: String,
}

/// Arguments for `cancel_event` after structural validation.
#[derive(Debug, Deserialize)]
struct CancelEventArgs {
    booking_id: i64,
}

/// Validates tool invocations and dispatches them to the booking client.
pub struct ActionExecutor {
    client: Arc<dyn BookingClient>,
    schema: ToolSchema,
    retry: RetryPolicy,
    call_timeout: Duration,
}

impl ActionExecutor {
    pub fn new(client: Arc<dyn BookingClient>) -> Self {
        Self {
            client,
            schema: ToolSchema::new(),
            retry: RetryPolicy::default(),
            call_timeout: Duration::from_secs(30),
        }
    }

    /// Override the transient-fault retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Override the per-call timeout on scheduling API requests.
    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// The tool schema this executor validates against.
    pub fn schema(&self) -> &ToolSchema {
        &self.schema
    }

    /// Execute one invocation against the scheduling API.
    pub async fn execute(&self, invocation: &ToolInvocation, session: &SessionConfig) -> ToolResult {
        match self.dispatch(invocation, session).await {
            Ok(payload) => ToolResult::success(&invocation.id, payload),
            Err(e) => {
                warn!(tool = %invocation.name, error = %e, "tool invocation failed");
                ToolResult::failure(&invocation.id, e.failure_kind(), e.to_string())
            }
        }
    }

    async fn dispatch(
        &self,
        invocation: &ToolInvocation,
        session: &SessionConfig,
    ) -> Result<serde_json::Value> {
        let name: ToolName = invocation
            .name
            .parse()
            .map_err(|_| CalChatError::InvalidArgument(format!("unknown tool '{}'", invocation.name)))?;

        let spec = self.schema.spec(name);
        validate_arguments(&invocation.arguments, &spec.parameters.schema)
            .map_err(CalChatError::InvalidArgument)?;

        let args = ToolArguments::new(invocation.arguments.clone());
        debug!(tool = %name, "dispatching tool invocation");
        match name {
            ToolName::BookEvent => self.book_event(args.deserialize()?, session).await,
            ToolName::ListEvents => self.list_events(session).await,
            ToolName::CancelEvent => self.cancel_event(args.deserialize()?).await,
        }
    }

    async fn book_event(
        &self,
        args: BookEventArgs,
        session: &SessionConfig,
    ) -> Result<serde_json::Value> {
        let start_time = DateTime::parse_from_rfc3339(&args.start_time).map_err(|e| {
            CalChatError::InvalidArgument(format!(
                "start_time is not a valid ISO 8601 date-time: {e}"
            ))
        })?;
        if start_time.with_timezone(&Utc) <= Utc::now() {
            return Err(CalChatError::InvalidArgument(format!(
                "start_time {} is not in the future",
                args.start_time
            )));
        }

        let request = CreateBookingRequest {
            start_time,
            attendee_name: args.attendee_name,
            attendee_email: session.user_email.clone(),
            reason: args.reason,
            time_zone: session.timezone.clone(),
        };
        let record = self
            .call_remote(|| self.client.create_booking(&request))
            .await?;
        Ok(serde_json::to_value(record)?)
    }

    async fn list_events(&self, session: &SessionConfig) -> Result<serde_json::Value> {
        let records = self
            .call_remote(|| self.client.list_bookings(&session.user_email))
            .await?;
        Ok(serde_json::to_value(records)?)
    }

    async fn cancel_event(&self, args: CancelEventArgs) -> Result<serde_json::Value> {
        self.call_remote(|| self.client.cancel_booking(args.booking_id))
            .await?;
        Ok(serde_json::json!({
            "cancelled": true,
            "booking_id": args.booking_id,
        }))
    }

    /// Run a booking call timeout-bound, retrying transient faults.
    async fn call_remote<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.retry
            .execute(|| with_timeout(self.call_timeout, operation()))
            .await
    }
}
