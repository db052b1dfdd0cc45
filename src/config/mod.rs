//! Configuration for the assistant core.
//!
//! Credentials and timezone are opaque inputs validated only for
//! non-emptiness; sourcing them (env file, UI field) is the host's concern.

use std::time::Duration;

use crate::error::{CalChatError, Result};

const DEFAULT_CAL_BASE_URL: &str = "https://api.cal.com/v2";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_MAX_TOOL_STEPS: u32 = 5;

/// Process-level configuration: credentials, endpoints, limits.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub cal_api_key: String,
    pub openai_api_key: String,
    pub cal_base_url: String,
    pub openai_base_url: String,
    pub model: String,
    /// Cap on consecutive tool invocations per user message.
    pub max_tool_steps: u32,
    pub model_timeout: Duration,
    pub booking_timeout: Duration,
}

impl AssistantConfig {
    /// Create a config from explicit credentials.
    pub fn new(cal_api_key: impl Into<String>, openai_api_key: impl Into<String>) -> Result<Self> {
        let cal_api_key = require_non_empty("cal_api_key", cal_api_key.into())?;
        let openai_api_key = require_non_empty("openai_api_key", openai_api_key.into())?;
        Ok(Self {
            cal_api_key,
            openai_api_key,
            cal_base_url: DEFAULT_CAL_BASE_URL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tool_steps: DEFAULT_MAX_TOOL_STEPS,
            model_timeout: Duration::from_secs(60),
            booking_timeout: Duration::from_secs(30),
        })
    }

    /// Load from environment variables (`CAL_API_KEY`, `OPENAI_API_KEY`,
    /// optional `CAL_API_BASE_URL` / `OPENAI_BASE_URL` / `CALCHAT_MODEL`).
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        let cal_api_key = std::env::var("CAL_API_KEY")
            .map_err(|_| CalChatError::Configuration("CAL_API_KEY is not set".into()))?;
        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| CalChatError::Configuration("OPENAI_API_KEY is not set".into()))?;

        let mut config = Self::new(cal_api_key, openai_api_key)?;
        if let Ok(url) = std::env::var("CAL_API_BASE_URL") {
            config.cal_base_url = url;
        }
        if let Ok(url) = std::env::var("OPENAI_BASE_URL") {
            config.openai_base_url = url;
        }
        if let Ok(model) = std::env::var("CALCHAT_MODEL") {
            config.model = model;
        }
        Ok(config)
    }

    /// Override the model id.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the tool step cap.
    pub fn with_max_tool_steps(mut self, max_tool_steps: u32) -> Self {
        self.max_tool_steps = max_tool_steps;
        self
    }
}

/// Per-conversation configuration threaded through the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Email identifying the user to the scheduling API.
    pub user_email: String,
    /// IANA timezone name, passed through to the scheduling API.
    pub timezone: String,
}

impl SessionConfig {
    pub fn new(user_email: impl Into<String>, timezone: impl Into<String>) -> Result<Self> {
        Ok(Self {
            user_email: require_non_empty("user_email", user_email.into())?,
            timezone: require_non_empty("timezone", timezone.into())?,
        })
    }
}

fn require_non_empty(name: &str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        return Err(CalChatError::Configuration(format!("{name} must not be empty")));
    }
    Ok(value)
}
