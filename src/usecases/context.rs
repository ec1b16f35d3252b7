//! Shared plumbing for actions: backend access, clock, date phrases.

use crate::domain::date_range::{self, DateRange};
use crate::domain::{BackendRequest, DomainError};
use crate::ports::{BackendPort, Clock};
use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

/// Statuses accepted by read and compute endpoints.
pub const OK: &[u16] = &[200];
/// Statuses accepted by endpoints that create a resource.
pub const OK_OR_CREATED: &[u16] = &[200, 201];

/// Resolves date phrases against an injected clock.
#[derive(Clone)]
pub struct DateRangeResolver {
    clock: Arc<dyn Clock>,
}

impl DateRangeResolver {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn resolve(&self, phrase: Option<&str>) -> Option<DateRange> {
        date_range::resolve(phrase, self.today())
    }
}

/// Dependencies every action is constructed with.
#[derive(Clone)]
pub struct ActionContext {
    backend: Arc<dyn BackendPort>,
    dates: DateRangeResolver,
}

impl ActionContext {
    pub fn new(backend: Arc<dyn BackendPort>, clock: Arc<dyn Clock>) -> Self {
        Self {
            backend,
            dates: DateRangeResolver::new(clock),
        }
    }

    pub fn dates(&self) -> &DateRangeResolver {
        &self.dates
    }

    /// Send `request` and decode the body as JSON when the status is in `accepted`.
    ///
    /// Any other status becomes `DomainError::UnexpectedStatus` without looking
    /// at the body. An empty body on an accepted status decodes to `null`.
    pub async fn call(
        &self,
        request: BackendRequest,
        accepted: &[u16],
    ) -> Result<Value, DomainError> {
        let response = self.backend.send(&request).await?;
        if !accepted.contains(&response.status) {
            return Err(DomainError::UnexpectedStatus {
                endpoint: request.to_string(),
                status: response.status,
            });
        }

        debug!(request = %request, status = response.status, "backend accepted request");

        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&response.body)
            .map_err(|e| DomainError::Decode(format!("{}: {}", request, e)))
    }
}

/// Body of a list endpoint. Anything but a JSON array is a decode error.
pub fn expect_records(body: Value, endpoint: &str) -> Result<Vec<Value>, DomainError> {
    match body {
        Value::Array(records) => Ok(records),
        other => Err(DomainError::Decode(format!(
            "{}: expected a JSON array, got {}",
            endpoint,
            kind_of(&other)
        ))),
    }
}

/// Add `key` to a JSON body when the slot value is present.
pub fn put_present(body: &mut Map<String, Value>, key: &str, value: Option<&String>) {
    if let Some(v) = value {
        body.insert(key.to_string(), Value::String(v.clone()));
    }
}

/// Add `key` to a query string when the slot value is present.
pub fn push_present(query: &mut Vec<(String, String)>, key: &str, value: Option<&String>) {
    if let Some(v) = value {
        query.push((key.to_string(), v.clone()));
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
