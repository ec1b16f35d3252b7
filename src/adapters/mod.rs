//! Infrastructure adapters. Implement outbound ports, drive inbound ones.
//!
//! Backend HTTP client, clocks, action server, console. Map errors to DomainError.

pub mod backend;
pub mod clock;
pub mod ui;
pub mod webhook;
