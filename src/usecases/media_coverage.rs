//! Press coverage lookup by topic, keyword and timeframe.

use super::context::{ActionContext, OK, expect_records, push_present};
use crate::domain::formatter::{PREVIEW_LIMIT, field_text};
use crate::domain::{BackendRequest, DomainError, OutgoingMessage, Slot, Slots};
use crate::ports::ActionHandler;
use serde_json::Value;
use tracing::warn;

const ENDPOINT: &str = "/press-releases";
const FILTERS: &[Slot] = &[Slot::Topic, Slot::Timeframe, Slot::Keyword];
/// Characters of each summary shown in a highlight.
const SUMMARY_PREVIEW_CHARS: usize = 100;

pub struct MediaCoverage {
    ctx: ActionContext,
}

impl MediaCoverage {
    pub fn new(ctx: ActionContext) -> Self {
        Self { ctx }
    }

    async fn fetch(&self, query: Vec<(String, String)>) -> Result<Vec<Value>, DomainError> {
        let request = BackendRequest::get(ENDPOINT, query);
        let endpoint = request.to_string();
        let body = self.ctx.call(request, OK).await?;
        expect_records(body, &endpoint)
    }
}

fn highlight(item: &Value) -> String {
    let title = field_text(item, "title").unwrap_or_else(|| "Untitled".to_string());
    let summary: String = field_text(item, "summary")
        .unwrap_or_else(|| "No summary available".to_string())
        .chars()
        .take(SUMMARY_PREVIEW_CHARS)
        .collect();
    format!("- {}: {}...\n", title, summary)
}

fn success_message(
    items: &[Value],
    topic: Option<&String>,
    keyword: Option<&String>,
    timeframe: Option<&String>,
) -> String {
    if items.is_empty() {
        return "I couldn't find any media coverage matching your criteria.".to_string();
    }

    let mut message = format!("Found {} media coverage items ", items.len());
    if let Some(topic) = topic {
        message.push_str(&format!("about '{}' ", topic));
    }
    if let Some(keyword) = keyword {
        message.push_str(&format!("mentioning '{}' ", keyword));
    }
    if let Some(timeframe) = timeframe {
        message.push_str(&format!("during {} ", timeframe));
    }

    message.push_str("\n\nHere are some highlights:\n");
    for item in items.iter().take(PREVIEW_LIMIT) {
        message.push_str(&highlight(item));
    }

    if items.len() > PREVIEW_LIMIT {
        message.push_str(&format!(
            "\nAnd {} more items. Check the dashboard for complete results.",
            items.len() - PREVIEW_LIMIT
        ));
    }
    message
}

#[async_trait::async_trait]
impl ActionHandler for MediaCoverage {
    fn name(&self) -> &'static str {
        "action_get_media_coverage"
    }

    fn slots(&self) -> &'static [Slot] {
        FILTERS
    }

    async fn run(&self, slots: &Slots) -> OutgoingMessage {
        if !slots.any_filled(FILTERS) {
            return OutgoingMessage::new(
                "I need more information to check media coverage. Can you specify the topic, keyword, or timeframe?",
            );
        }

        let topic = slots.get(Slot::Topic);
        let timeframe = slots.get(Slot::Timeframe);
        let keyword = slots.get(Slot::Keyword);

        let mut query = Vec::new();
        push_present(&mut query, "topic", topic.as_ref());
        push_present(&mut query, "timeframe", timeframe.as_ref());
        push_present(&mut query, "keyword", keyword.as_ref());

        match self.fetch(query).await {
            Ok(items) => OutgoingMessage::new(success_message(
                &items,
                topic.as_ref(),
                keyword.as_ref(),
                timeframe.as_ref(),
            )),
            Err(DomainError::UnexpectedStatus { status, .. }) => {
                warn!(status, "media coverage unavailable");
                OutgoingMessage::new(
                    "I couldn't retrieve media coverage data at this time. Please try again later.",
                )
            }
            Err(e) => {
                warn!(error = %e, "media coverage lookup failed");
                OutgoingMessage::new(format!(
                    "I encountered an error getting media coverage: {}",
                    e
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::backend::ScriptedBackend;
    use crate::adapters::clock::SystemClock;
    use crate::domain::HttpMethod;
    use serde_json::json;
    use std::sync::Arc;

    fn action(backend: &Arc<ScriptedBackend>) -> MediaCoverage {
        MediaCoverage::new(ActionContext::new(backend.clone(), Arc::new(SystemClock)))
    }

    #[tokio::test]
    async fn test_asks_for_filters_when_none_given() {
        let backend = Arc::new(ScriptedBackend::new());
        let message = action(&backend)
            .run(&Slots::new().with(Slot::Platform, "Twitter"))
            .await;

        assert!(message.text.starts_with("I need more information to check media coverage."));
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_queries_with_present_filters_and_lists_highlights() {
        let long_summary = "x".repeat(150);
        let backend = Arc::new(ScriptedBackend::new().respond(
            200,
            json!([
                {"title": "Launch recap", "summary": "A short summary"},
                {"title": "Analyst view", "summary": long_summary},
                {"summary": null},
                {"title": "Fourth"},
                {"title": "Fifth"},
            ]),
        ));
        let slots = Slots::new()
            .with(Slot::Keyword, "launch")
            .with(Slot::Timeframe, "this month");

        let message = action(&backend).run(&slots).await;

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[0].path, ENDPOINT);
        assert_eq!(requests[0].query_param("keyword"), Some("launch"));
        assert_eq!(requests[0].query_param("timeframe"), Some("this month"));
        assert_eq!(requests[0].query_param("topic"), None);

        assert!(message.text.starts_with(
            "Found 5 media coverage items mentioning 'launch' during this month \n\nHere are some highlights:\n"
        ));
        assert!(message.text.contains("- Launch recap: A short summary...\n"));
        assert!(message.text.contains(&format!("- Analyst view: {}...\n", "x".repeat(100))));
        assert!(message.text.contains("- Untitled: No summary available...\n"));
        assert!(!message.text.contains("Fourth"));
        assert!(message.text.ends_with(
            "\nAnd 2 more items. Check the dashboard for complete results."
        ));
    }

    #[tokio::test]
    async fn test_empty_result() {
        let backend = Arc::new(ScriptedBackend::new().respond(200, json!([])));
        let message = action(&backend)
            .run(&Slots::new().with(Slot::Topic, "obscure"))
            .await;
        assert_eq!(
            message.text,
            "I couldn't find any media coverage matching your criteria."
        );
    }

    #[tokio::test]
    async fn test_failures() {
        let backend = Arc::new(
            ScriptedBackend::new()
                .respond(500, json!({"error": "boom"}))
                .respond(200, json!({"not": "a list"})),
        );
        let slots = Slots::new().with(Slot::Topic, "ai");
        let action = action(&backend);

        assert_eq!(
            action.run(&slots).await.text,
            "I couldn't retrieve media coverage data at this time. Please try again later."
        );
        assert!(action
            .run(&slots)
            .await
            .text
            .starts_with("I encountered an error getting media coverage: Failed to decode"));
    }
}
