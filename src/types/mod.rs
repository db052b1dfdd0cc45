//! Core domain types.

pub mod booking;
pub mod message;

pub use booking::*;
pub use message::*;
