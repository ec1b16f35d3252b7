//! Scripted backend for tests and offline runs.
//!
//! Answers requests from a queue of canned responses and records every request
//! it receives, so callers can assert on exactly what would have been sent.

use crate::domain::{BackendRequest, BackendResponse, DomainError};
use crate::ports::BackendPort;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::info;

enum Reply {
    Respond(BackendResponse),
    Fail(String),
}

/// In-memory `BackendPort`. Replies are consumed in FIFO order; once the
/// queue is empty every request fails with a transport error.
#[derive(Default)]
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<BackendRequest>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON response.
    pub fn respond(self, status: u16, body: Value) -> Self {
        self.respond_raw(status, body.to_string())
    }

    /// Queue a response with an arbitrary (possibly non-JSON) body.
    pub fn respond_raw(self, status: u16, body: impl Into<String>) -> Self {
        self.push(Reply::Respond(BackendResponse {
            status,
            body: body.into(),
        }))
    }

    /// Queue a transport failure.
    pub fn fail(self, reason: impl Into<String>) -> Self {
        self.push(Reply::Fail(reason.into()))
    }

    fn push(self, reply: Reply) -> Self {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
        self
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<BackendRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl BackendPort for ScriptedBackend {
    async fn send(&self, request: &BackendRequest) -> Result<BackendResponse, DomainError> {
        info!(request = %request, "[SCRIPTED] backend call");
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let reply = self
            .replies
            .lock()
            .map_err(|e| DomainError::Transport(format!("scripted backend poisoned: {}", e)))?
            .pop_front();

        match reply {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Fail(reason)) => Err(DomainError::Transport(reason)),
            None => Err(DomainError::Transport(format!(
                "no scripted reply for {}",
                request
            ))),
        }
    }
}
