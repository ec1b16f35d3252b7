//! Engagement totals over social posts matching platform / topic / timeframe.

use super::context::{ActionContext, OK, expect_records, push_present};
use crate::domain::{BackendRequest, DomainError, OutgoingMessage, Slot, Slots};
use crate::ports::ActionHandler;
use serde_json::Value;
use tracing::warn;

const ENDPOINT: &str = "/social-posts";
const FILTERS: &[Slot] = &[Slot::Platform, Slot::Topic, Slot::Timeframe];

pub struct ContentMetrics {
    ctx: ActionContext,
}

impl ContentMetrics {
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

/// Totals across a list of posts. Counters may be integers or floats;
/// missing or non-numeric ones count as 0.
#[derive(Debug, Default, PartialEq)]
struct Totals {
    posts: usize,
    engagement: f64,
    likes: f64,
    shares: f64,
    comments: f64,
}

impl Totals {
    fn from_posts(posts: &[Value]) -> Self {
        let sum = |field: &str| -> f64 {
            posts
                .iter()
                .filter_map(|p| p.get(field).and_then(Value::as_f64))
                .sum()
        };
        Self {
            posts: posts.len(),
            engagement: sum("engagement"),
            likes: sum("likes"),
            shares: sum("shares"),
            comments: sum("comments"),
        }
    }

    fn average_engagement(&self) -> Option<f64> {
        (self.posts > 0).then(|| self.engagement / self.posts as f64)
    }
}

/// Whole totals print as integers ("17"), others as-is ("2.5").
fn count_text(total: f64) -> String {
    if total.fract() == 0.0 && total.abs() < 1e15 {
        format!("{}", total as i64)
    } else {
        total.to_string()
    }
}

fn success_message(
    totals: &Totals,
    platform: Option<&String>,
    topic: Option<&String>,
    timeframe: Option<&String>,
) -> String {
    let mut message = String::from("Content metrics ");
    if let Some(platform) = platform {
        message.push_str(&format!("for {} ", platform));
    }
    if let Some(topic) = topic {
        message.push_str(&format!("on topic '{}' ", topic));
    }
    if let Some(timeframe) = timeframe {
        message.push_str(&format!("during {} ", timeframe));
    }

    message.push_str(":\n\n");
    message.push_str(&format!("- Total posts: {}\n", totals.posts));
    message.push_str(&format!("- Total engagement: {}\n", count_text(totals.engagement)));
    message.push_str(&format!("- Likes: {}\n", count_text(totals.likes)));
    message.push_str(&format!("- Shares: {}\n", count_text(totals.shares)));
    message.push_str(&format!("- Comments: {}\n", count_text(totals.comments)));

    if let Some(avg) = totals.average_engagement() {
        message.push_str(&format!("\nAverage engagement per post: {:.2}", avg));
    }
    message
}

#[async_trait::async_trait]
impl ActionHandler for ContentMetrics {
    fn name(&self) -> &'static str {
        "action_get_content_metrics"
    }

    fn slots(&self) -> &'static [Slot] {
        FILTERS
    }

    async fn run(&self, slots: &Slots) -> OutgoingMessage {
        if !slots.any_filled(FILTERS) {
            return OutgoingMessage::new(
                "I need more information to analyze content metrics. Can you specify the platform, topic, or timeframe?",
            );
        }

        let platform = slots.get(Slot::Platform);
        let topic = slots.get(Slot::Topic);
        let timeframe = slots.get(Slot::Timeframe);

        let mut query = Vec::new();
        push_present(&mut query, "platform", platform.as_ref());
        push_present(&mut query, "topic", topic.as_ref());
        push_present(&mut query, "timeframe", timeframe.as_ref());

        match self.fetch(query).await {
            Ok(posts) => OutgoingMessage::new(success_message(
                &Totals::from_posts(&posts),
                platform.as_ref(),
                topic.as_ref(),
                timeframe.as_ref(),
            )),
            Err(DomainError::UnexpectedStatus { status, .. }) => {
                warn!(status, "content metrics unavailable");
                OutgoingMessage::new(
                    "I couldn't retrieve content metrics at this time. Please try again later.",
                )
            }
            Err(e) => {
                warn!(error = %e, "content metrics failed");
                OutgoingMessage::new(format!(
                    "I encountered an error analyzing content metrics: {}",
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
    use serde_json::json;
    use std::sync::Arc;

    fn action(backend: &Arc<ScriptedBackend>) -> ContentMetrics {
        ContentMetrics::new(ActionContext::new(backend.clone(), Arc::new(SystemClock)))
    }

    #[test]
    fn test_totals_ignore_missing_counters() {
        let posts = vec![
            json!({"engagement": 10, "likes": 4, "shares": 1}),
            json!({"engagement": 5, "comments": 2}),
            json!({"likes": "n/a"}),
        ];
        let totals = Totals::from_posts(&posts);
        assert_eq!(
            totals,
            Totals {
                posts: 3,
                engagement: 15.0,
                likes: 4.0,
                shares: 1.0,
                comments: 2.0,
            }
        );
        assert_eq!(totals.average_engagement(), Some(5.0));
        assert_eq!(Totals::default().average_engagement(), None);
    }

    #[tokio::test]
    async fn test_reports_totals_and_average() {
        let backend = Arc::new(ScriptedBackend::new().respond(
            200,
            json!([
                {"engagement": 10, "likes": 7, "shares": 2, "comments": 1},
                {"engagement": 3, "likes": 1, "shares": 0, "comments": 2},
                {"engagement": 4},
            ]),
        ));
        let slots = Slots::new().with(Slot::Platform, "LinkedIn");

        let message = action(&backend).run(&slots).await;

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, ENDPOINT);
        assert_eq!(requests[0].query_param("platform"), Some("LinkedIn"));
        assert_eq!(
            message.text,
            "Content metrics for LinkedIn :\n\n\
             - Total posts: 3\n\
             - Total engagement: 17\n\
             - Likes: 8\n\
             - Shares: 2\n\
             - Comments: 3\n\
             \nAverage engagement per post: 5.67"
        );
    }

    #[test]
    fn test_float_counters_are_summed() {
        let posts = vec![
            json!({"engagement": 2.5, "likes": 3.0}),
            json!({"engagement": 1.5}),
        ];
        let totals = Totals::from_posts(&posts);
        assert_eq!(totals.engagement, 4.0);
        assert_eq!(totals.likes, 3.0);
        assert_eq!(totals.average_engagement(), Some(2.0));
    }

    #[test]
    fn test_huge_counters_do_not_overflow() {
        let posts = vec![
            json!({"engagement": i64::MAX}),
            json!({"engagement": i64::MAX}),
        ];
        let totals = Totals::from_posts(&posts);
        assert!(totals.engagement > i64::MAX as f64);
    }

    #[test]
    fn test_count_text() {
        assert_eq!(count_text(17.0), "17");
        assert_eq!(count_text(0.0), "0");
        assert_eq!(count_text(2.5), "2.5");
    }

    #[tokio::test]
    async fn test_float_counters_in_message() {
        let backend = Arc::new(ScriptedBackend::new().respond(
            200,
            json!([
                {"engagement": 2.5, "likes": 3.0},
                {"engagement": 1.5},
            ]),
        ));
        let message = action(&backend)
            .run(&Slots::new().with(Slot::Platform, "Instagram"))
            .await;

        assert!(message.text.contains("- Total engagement: 4\n"));
        assert!(message.text.contains("- Likes: 3\n"));
        assert!(message.text.ends_with("\nAverage engagement per post: 2.00"));
    }

    #[tokio::test]
    async fn test_no_posts_has_no_average() {
        let backend = Arc::new(ScriptedBackend::new().respond(200, json!([])));
        let message = action(&backend)
            .run(&Slots::new().with(Slot::Topic, "ai"))
            .await;
        assert!(message.text.contains("- Total posts: 0\n"));
        assert!(!message.text.contains("Average engagement"));
    }

    #[tokio::test]
    async fn test_prompt_and_failures() {
        let backend = Arc::new(ScriptedBackend::new().respond(404, json!({})).fail("timeout"));
        let action = action(&backend);

        assert!(action
            .run(&Slots::new())
            .await
            .text
            .starts_with("I need more information to analyze content metrics."));
        assert!(backend.requests().is_empty());

        let slots = Slots::new().with(Slot::Timeframe, "yesterday");
        assert_eq!(
            action.run(&slots).await.text,
            "I couldn't retrieve content metrics at this time. Please try again later."
        );
        assert_eq!(
            action.run(&slots).await.text,
            "I encountered an error analyzing content metrics: Backend request failed: timeout"
        );
    }
}
