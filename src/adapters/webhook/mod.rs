//! Action server adapter. Drives the application through `ActionRegistry`.

pub mod server;

pub use server::{router, serve};
