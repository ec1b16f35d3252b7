//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: Called by the action server / console into the application
//! - Outbound: Called by application into infrastructure

pub mod inbound;
pub mod outbound;

pub use inbound::ActionHandler;
pub use outbound::{BackendPort, Clock};
