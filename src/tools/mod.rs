//! Tool schema and argument handling for model function calling.

pub mod arguments;
pub mod schema;
pub mod types;
pub mod validation;

pub use arguments::ToolArguments;
pub use schema::{ToolName, ToolSchema, ToolSpec};
pub use types::ToolParameters;
pub use validation::validate_arguments;
