//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/IO types here — adapters map reqwest/axum types into these.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Conversation slots the actions read. Names match the bot's domain file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Topic,
    Platform,
    Timeframe,
    Keyword,
    DateRange,
    Format,
    MetricType,
    ReportType,
    AlertThreshold,
    JournalistName,
    JournalistSource,
    Email,
    PostContent,
    PostScheduleTime,
    Category,
}

impl Slot {
    pub const fn name(self) -> &'static str {
        match self {
            Slot::Topic => "topic",
            Slot::Platform => "platform",
            Slot::Timeframe => "timeframe",
            Slot::Keyword => "keyword",
            Slot::DateRange => "date_range",
            Slot::Format => "format",
            Slot::MetricType => "metric_type",
            Slot::ReportType => "report_type",
            Slot::AlertThreshold => "alert_threshold",
            Slot::JournalistName => "journalist_name",
            Slot::JournalistSource => "journalist_source",
            Slot::Email => "email",
            Slot::PostContent => "post_content",
            Slot::PostScheduleTime => "post_schedule_time",
            Slot::Category => "category",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Slot values for one conversation turn, as sent by the dialogue engine.
///
/// Values are untyped JSON. A slot counts as present when it holds a non-empty
/// string, a non-zero number or `true`; everything else (missing, `null`, `""`,
/// `0`, `false`, arrays, objects) is treated as not filled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slots(Map<String, Value>);

impl Slots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used by the console and tests.
    pub fn with(mut self, slot: Slot, value: impl Into<Value>) -> Self {
        self.0.insert(slot.name().to_string(), value.into());
        self
    }

    /// Raw value of a filled slot.
    pub fn value(&self, slot: Slot) -> Option<&Value> {
        let value = self.0.get(slot.name())?;
        let filled = match value {
            Value::String(s) => !s.is_empty(),
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::Bool(b) => *b,
            _ => false,
        };
        filled.then_some(value)
    }

    /// Text of a filled slot. Numbers are rendered with their JSON text.
    pub fn get(&self, slot: Slot) -> Option<String> {
        match self.value(slot)? {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn is_filled(&self, slot: Slot) -> bool {
        self.get(slot).is_some()
    }

    /// True when at least one of `slots` is filled.
    pub fn any_filled(&self, slots: &[Slot]) -> bool {
        slots.iter().any(|s| self.is_filled(*s))
    }
}

/// The single chat message an action emits per invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub text: String,
}

impl OutgoingMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl fmt::Display for OutgoingMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

/// One call against the backend API. `path` is relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendRequest {
    pub method: HttpMethod,
    pub path: String,
    /// Query parameters (GET only), in insertion order.
    pub query: Vec<(String, String)>,
    /// JSON body (POST only).
    pub body: Option<Value>,
}

impl BackendRequest {
    pub fn get(path: impl Into<String>, query: Vec<(String, String)>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            query,
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Looks up a query parameter by name.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for BackendRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = match self.method {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        };
        write!(f, "{} {}", method, self.path)
    }
}

/// Raw backend answer: status code and undecoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendResponse {
    pub status: u16,
    pub body: String,
}
