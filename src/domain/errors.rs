//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these. Handlers never propagate
//! them to the caller; they are matched and turned into a chat message.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Backend answered, but not with one of the statuses the intent accepts.
    #[error("{endpoint} returned status {status}")]
    UnexpectedStatus { endpoint: String, status: u16 },

    #[error("Backend request failed: {0}")]
    Transport(String),

    #[error("Failed to decode backend response: {0}")]
    Decode(String),

    #[error("Invalid value for slot '{slot}': {value}")]
    InvalidSlot { slot: &'static str, value: String },

    #[error("Action server error: {0}")]
    Server(String),

    #[error("Console error: {0}")]
    Console(String),
}
