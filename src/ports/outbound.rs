//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{BackendRequest, BackendResponse, DomainError};
use chrono::NaiveDate;

/// Media-monitoring backend API.
#[async_trait::async_trait]
pub trait BackendPort: Send + Sync {
    /// Issue one request and return the raw status and body.
    ///
    /// Any HTTP status is `Ok`; only transport failures (connection refused,
    /// body read error) are `Err(DomainError::Transport)`.
    async fn send(&self, request: &BackendRequest) -> Result<BackendResponse, DomainError>;
}

/// Source of "today" for date phrases and default schedule dates.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}
