//! The assistant's action surface: booking tools and their contracts.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::types::ToolParameters;

/// Supported action names.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ToolName {
    BookEvent,
    ListEvents,
    CancelEvent,
}

/// Specification of a single tool: name, description, parameter contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: ToolName,
    pub description: String,
    pub parameters: ToolParameters,
}

/// Static description of the actions the assistant may dispatch.
#[derive(Debug, Clone)]
pub struct ToolSchema {
    specs: Vec<ToolSpec>,
}

impl Default for ToolSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolSchema {
    pub fn new() -> Self {
        let specs = vec![
            ToolSpec {
                name: ToolName::BookEvent,
                description: "Book a new calendar event. The start time must be an ISO 8601 \
                              date-time in the user's timezone, and must be in the future."
                    .into(),
                parameters: ToolParameters::object()
                    .date_time(
                        "start_time",
                        "Start of the event, ISO 8601 (e.g. '2026-08-15T14:00:00Z')",
                        true,
                    )
                    .string("attendee_name", "Name of the person the event is with", true)
                    .string("reason", "Reason or agenda for the meeting", true)
                    .build(),
            },
            ToolSpec {
                name: ToolName::ListEvents,
                description: "List all upcoming bookings for the user, including each \
                              booking's ID (required for cancellations)."
                    .into(),
                parameters: ToolParameters::empty(),
            },
            ToolSpec {
                name: ToolName::CancelEvent,
                description: "Cancel a booking by its numeric ID. List events first to find \
                              the ID."
                    .into(),
                parameters: ToolParameters::object()
                    .positive_integer("booking_id", "ID of the booking to cancel", true)
                    .build(),
            },
        ];
        Self { specs }
    }

    /// Ordered tool specifications. Pure; no side effects.
    pub fn describe(&self) -> &[ToolSpec] {
        &self.specs
    }

    /// Look up the spec for a tool name.
    pub fn spec(&self, name: ToolName) -> &ToolSpec {
        self.specs
            .iter()
            .find(|s| s.name == name)
            .expect("every ToolName has a spec")
    }
}
