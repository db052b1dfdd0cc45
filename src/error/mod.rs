//! Error types for calchat.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Primary error type for all calchat operations.
#[derive(Error, Debug)]
pub enum CalChatError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("No booking found: {0}")]
    BookingNotFound(String),

    #[error("Booking rejected: {0}")]
    BookingRejected(String),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Malformed model reply: {0}")]
    MalformedModelReply(String),

    #[error("Tool loop exceeded {0} steps")]
    MaxStepsExceeded(u32),
}

impl CalChatError {
    /// Create an API error from a status code and body.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Whether this error is a transient fault worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) => true,
            Self::Api { status, .. } => *status == 429 || (500..=599).contains(status),
            _ => false,
        }
    }

    /// Classify this error into the failure taxonomy surfaced to the model.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::InvalidArgument(_) => FailureKind::InvalidArguments,
            Self::BookingNotFound(_) => FailureKind::NotFound,
            Self::BookingRejected(_) | Self::Configuration(_) => FailureKind::RemoteRejected,
            Self::MaxStepsExceeded(_) => FailureKind::MaxStepsExceeded,
            Self::Api { .. } if !self.is_retryable() => FailureKind::RemoteRejected,
            _ => FailureKind::RemoteUnavailable,
        }
    }
}

/// Classification of a tool failure, fed back to the model as data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FailureKind {
    InvalidArguments,
    NotFound,
    RemoteRejected,
    RemoteUnavailable,
    MaxStepsExceeded,
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, CalChatError>;
