//! Create a keyword alert (`POST /keywords`).

use super::context::{ActionContext, OK_OR_CREATED};
use crate::domain::formatter::display_value;
use crate::domain::{BackendRequest, DomainError, OutgoingMessage, Slot, Slots};
use crate::ports::ActionHandler;
use serde_json::{Map, Value};
use tracing::{error, info, warn};

const ENDPOINT: &str = "/keywords";
/// Mentions needed before an alert fires when the user gives no threshold.
pub const DEFAULT_ALERT_THRESHOLD: i64 = 5;

pub struct KeywordAlert {
    ctx: ActionContext,
}

impl KeywordAlert {
    pub fn new(ctx: ActionContext) -> Self {
        Self { ctx }
    }

    async fn create(
        &self,
        keyword: &str,
        category: Option<&String>,
        threshold: Option<&Value>,
    ) -> Result<i64, DomainError> {
        let threshold = parse_threshold(threshold)?;

        let mut body = Map::new();
        body.insert("word".to_string(), Value::from(keyword));
        body.insert("isActive".to_string(), Value::Bool(true));
        if let Some(category) = category {
            body.insert("category".to_string(), Value::from(category.as_str()));
        }
        body.insert("alertThreshold".to_string(), Value::from(threshold));

        let created = self
            .ctx
            .call(BackendRequest::post(ENDPOINT, Value::Object(body)), OK_OR_CREATED)
            .await?;
        let id = created.get("id").cloned().unwrap_or_default();
        info!(keyword, threshold, id = %id, "keyword alert created");
        Ok(threshold)
    }
}

/// Integer threshold from the filled slot, or the default when unset.
///
/// Numbers are truncated toward zero (`10.0` and `10.7` both give 10); text
/// must parse as an integer.
fn parse_threshold(raw: Option<&Value>) -> Result<i64, DomainError> {
    let invalid = |value: &Value| DomainError::InvalidSlot {
        slot: Slot::AlertThreshold.name(),
        value: display_value(value),
    };
    match raw {
        None => Ok(DEFAULT_ALERT_THRESHOLD),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                    .map(|f| f.trunc() as i64)
            })
            .ok_or_else(|| invalid(&Value::Number(n.clone()))),
        Some(Value::String(text)) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid(&Value::String(text.clone()))),
        Some(Value::Bool(true)) => Ok(1),
        Some(other) => Err(invalid(other)),
    }
}

#[async_trait::async_trait]
impl ActionHandler for KeywordAlert {
    fn name(&self) -> &'static str {
        "action_set_keyword_alert"
    }

    fn slots(&self) -> &'static [Slot] {
        &[Slot::Keyword, Slot::AlertThreshold, Slot::Category]
    }

    async fn run(&self, slots: &Slots) -> OutgoingMessage {
        let Some(keyword) = slots.get(Slot::Keyword) else {
            return OutgoingMessage::new(
                "I need to know which keyword you want to track. Please provide a keyword to set up the alert.",
            );
        };
        let category = slots.get(Slot::Category);

        match self
            .create(&keyword, category.as_ref(), slots.value(Slot::AlertThreshold))
            .await
        {
            Ok(threshold) => {
                let mut message = format!(
                    "Alert set for keyword '{}'. You'll be notified when mentions exceed {} occurrences.",
                    keyword, threshold
                );
                if let Some(category) = &category {
                    message.push_str(&format!("\nCategory: {}", category));
                }
                message.push_str("\nYou can manage your alerts in the Settings section.");
                OutgoingMessage::new(message)
            }
            Err(DomainError::UnexpectedStatus { status, .. }) => {
                warn!(status, keyword = %keyword, "keyword alert refused");
                OutgoingMessage::new(
                    "I couldn't set up the keyword alert at this time. Please try again later or set it up manually in the Settings section.",
                )
            }
            Err(e) => {
                error!(error = %e, keyword = %keyword, "Error setting keyword alert");
                OutgoingMessage::new(
                    "I encountered an error while setting up your alert. Please try again or use the Settings section to create an alert manually.",
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::backend::ScriptedBackend;
    use crate::adapters::clock::SystemClock;
    use serde_json::json;
    use std::sync::Arc;

    fn action(backend: &Arc<ScriptedBackend>) -> KeywordAlert {
        KeywordAlert::new(ActionContext::new(backend.clone(), Arc::new(SystemClock)))
    }

    #[tokio::test]
    async fn test_missing_keyword_prompts_without_calling_backend() {
        let backend = Arc::new(ScriptedBackend::new().respond(201, json!({})));
        let slots = Slots::new()
            .with(Slot::Category, "brand")
            .with(Slot::AlertThreshold, 3);

        let message = action(&backend).run(&slots).await;

        assert_eq!(
            message.text,
            "I need to know which keyword you want to track. Please provide a keyword to set up the alert."
        );
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_default_threshold() {
        let backend = Arc::new(ScriptedBackend::new().respond(201, json!({"id": 12})));
        let message = action(&backend)
            .run(&Slots::new().with(Slot::Keyword, "recall"))
            .await;

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, ENDPOINT);
        assert_eq!(
            requests[0].body,
            Some(json!({"word": "recall", "isActive": true, "alertThreshold": 5}))
        );
        assert_eq!(
            message.text,
            "Alert set for keyword 'recall'. You'll be notified when mentions exceed 5 occurrences.\n\
             You can manage your alerts in the Settings section."
        );
    }

    #[tokio::test]
    async fn test_threshold_from_text_or_number_and_category() {
        let backend = Arc::new(
            ScriptedBackend::new()
                .respond(200, json!({}))
                .respond(201, json!({})),
        );
        let action = action(&backend);

        let message = action
            .run(
                &Slots::new()
                    .with(Slot::Keyword, "merger")
                    .with(Slot::AlertThreshold, "20")
                    .with(Slot::Category, "finance"),
            )
            .await;
        assert!(message.text.contains("exceed 20 occurrences."));
        assert!(message.text.contains("\nCategory: finance\n"));

        action
            .run(
                &Slots::new()
                    .with(Slot::Keyword, "merger")
                    .with(Slot::AlertThreshold, 7),
            )
            .await;

        let requests = backend.requests();
        assert_eq!(
            requests[0].body,
            Some(json!({
                "word": "merger",
                "isActive": true,
                "category": "finance",
                "alertThreshold": 20,
            }))
        );
        assert_eq!(
            requests[1].body.as_ref().and_then(|b| b.get("alertThreshold")),
            Some(&json!(7))
        );
    }

    #[tokio::test]
    async fn test_non_numeric_threshold_is_an_error_without_backend_call() {
        let backend = Arc::new(ScriptedBackend::new().respond(201, json!({})));
        let message = action(&backend)
            .run(
                &Slots::new()
                    .with(Slot::Keyword, "merger")
                    .with(Slot::AlertThreshold, "a lot"),
            )
            .await;

        assert!(message.text.starts_with("I encountered an error while setting up your alert."));
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_refused() {
        let backend = Arc::new(ScriptedBackend::new().respond(409, json!({"error": "exists"})));
        let message = action(&backend)
            .run(&Slots::new().with(Slot::Keyword, "recall"))
            .await;
        assert!(message.text.starts_with("I couldn't set up the keyword alert at this time."));
    }

    #[tokio::test]
    async fn test_float_threshold_from_dialogue_engine() {
        let backend = Arc::new(ScriptedBackend::new().respond(201, json!({"id": 5})));
        let slots: Slots = serde_json::from_value(json!({
            "keyword": "merger",
            "alert_threshold": 10.0,
        }))
        .unwrap();

        let message = action(&backend).run(&slots).await;

        assert!(message.text.contains("exceed 10 occurrences."));
        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].body.as_ref().and_then(|b| b.get("alertThreshold")),
            Some(&json!(10))
        );
    }

    #[tokio::test]
    async fn test_zero_threshold_uses_default() {
        let backend = Arc::new(ScriptedBackend::new().respond(201, json!({})));
        let slots = Slots::new()
            .with(Slot::Keyword, "merger")
            .with(Slot::AlertThreshold, 0);

        let message = action(&backend).run(&slots).await;

        assert!(message.text.contains("exceed 5 occurrences."));
        assert_eq!(
            backend.requests()[0].body.as_ref().and_then(|b| b.get("alertThreshold")),
            Some(&json!(5))
        );
    }

    #[test]
    fn test_parse_threshold() {
        assert_eq!(parse_threshold(None).unwrap(), DEFAULT_ALERT_THRESHOLD);
        assert_eq!(parse_threshold(Some(&json!(" 12 "))).unwrap(), 12);
        assert_eq!(parse_threshold(Some(&json!(7))).unwrap(), 7);
        assert_eq!(parse_threshold(Some(&json!(10.0))).unwrap(), 10);
        assert_eq!(parse_threshold(Some(&json!(10.7))).unwrap(), 10);
        let err = parse_threshold(Some(&json!("1.5"))).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for slot 'alert_threshold': 1.5");
    }
}
