//! calchat — conversational booking assistant core.
//!
//! Turns free-form chat messages into validated calls against a
//! Cal.com-style scheduling API, driven by a tool-calling language model.
//! The model proposes tool invocations; the executor validates and dispatches
//! them; the orchestrator loops until the model answers in plain text.
//!
//! # Quick Start
//!
//! ```no_run
//! use calchat::prelude::*;
//!
//! # async fn example() -> calchat::error::Result<()> {
//! let config = AssistantConfig::from_env()?;
//! let orchestrator = ConversationOrchestrator::from_config(&config);
//!
//! let session_config = SessionConfig::new("user@example.com", "America/New_York")?;
//! let mut session = Session::new(session_config);
//!
//! let reply = orchestrator
//!     .handle_user_message(&mut session, "show me my scheduled events")
//!     .await;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

pub mod booking;
pub mod config;
pub mod error;
pub mod executor;
pub mod http;
pub mod model;
pub mod orchestrator;
pub mod prelude;
pub mod tools;
pub mod types;
pub mod util;
