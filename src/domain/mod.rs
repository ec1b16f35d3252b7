//! Core domain layer. No external I/O dependencies.
//!
//! Entities, date phrases and message formatting live here. Dependencies flow inward.

pub mod date_range;
pub mod entities;
pub mod errors;
pub mod formatter;

pub use date_range::DateRange;
pub use entities::{
    BackendRequest, BackendResponse, HttpMethod, OutgoingMessage, Slot, Slots,
};
pub use errors::DomainError;
