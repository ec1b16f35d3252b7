//! Backend adapters. Implement `BackendPort`.
//!
//! `RestBackend` talks HTTP; `ScriptedBackend` replays canned responses.

pub mod rest_backend;
pub mod scripted;

pub use rest_backend::RestBackend;
pub use scripted::ScriptedBackend;
