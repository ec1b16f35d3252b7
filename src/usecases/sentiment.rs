//! Sentiment analysis for a topic / platform / timeframe.

use super::context::{ActionContext, OK, put_present};
use crate::domain::formatter::{display_value, field_text};
use crate::domain::{BackendRequest, DomainError, OutgoingMessage, Slot, Slots};
use crate::ports::ActionHandler;
use serde_json::{Map, Value};
use tracing::warn;

const ENDPOINT: &str = "/nlp/analyze-sentiment";
const FILTERS: &[Slot] = &[Slot::Topic, Slot::Platform, Slot::Timeframe];

pub struct SentimentAnalysis {
    ctx: ActionContext,
}

impl SentimentAnalysis {
    pub fn new(ctx: ActionContext) -> Self {
        Self { ctx }
    }
}

struct Filters {
    topic: Option<String>,
    platform: Option<String>,
    timeframe: Option<String>,
}

impl Filters {
    fn from_slots(slots: &Slots) -> Self {
        Self {
            topic: slots.get(Slot::Topic),
            platform: slots.get(Slot::Platform),
            timeframe: slots.get(Slot::Timeframe),
        }
    }

    fn body(&self) -> Value {
        let mut body = Map::new();
        put_present(&mut body, "topic", self.topic.as_ref());
        put_present(&mut body, "platform", self.platform.as_ref());
        put_present(&mut body, "timeframe", self.timeframe.as_ref());
        Value::Object(body)
    }
}

fn count(data: &Value, field: &str) -> String {
    data.get(field)
        .map(display_value)
        .unwrap_or_else(|| "0".to_string())
}

fn success_message(filters: &Filters, data: &Value) -> String {
    let mut message = String::from("Sentiment analysis for ");
    if let Some(topic) = &filters.topic {
        message.push_str(&format!("topic '{}' ", topic));
    }
    if let Some(platform) = &filters.platform {
        message.push_str(&format!("on {} ", platform));
    }
    if let Some(timeframe) = &filters.timeframe {
        message.push_str(&format!("during {} ", timeframe));
    }

    message.push_str("shows: \n");
    message.push_str(&format!(
        "- Overall sentiment: {}\n",
        field_text(data, "overall_sentiment").unwrap_or_else(|| "Unknown".to_string())
    ));
    message.push_str(&format!("- Positive mentions: {}\n", count(data, "positive_count")));
    message.push_str(&format!("- Negative mentions: {}\n", count(data, "negative_count")));
    message.push_str(&format!("- Neutral mentions: {}", count(data, "neutral_count")));
    message
}

#[async_trait::async_trait]
impl ActionHandler for SentimentAnalysis {
    fn name(&self) -> &'static str {
        "action_get_sentiment_analysis"
    }

    fn slots(&self) -> &'static [Slot] {
        FILTERS
    }

    async fn run(&self, slots: &Slots) -> OutgoingMessage {
        if !slots.any_filled(FILTERS) {
            return OutgoingMessage::new(
                "I need more information to analyze sentiment. Can you tell me the topic, platform, or timeframe you're interested in?",
            );
        }

        let filters = Filters::from_slots(slots);
        let request = BackendRequest::post(ENDPOINT, filters.body());
        match self.ctx.call(request, OK).await {
            Ok(data) => OutgoingMessage::new(success_message(&filters, &data)),
            Err(DomainError::UnexpectedStatus { status, .. }) => {
                warn!(status, "sentiment analysis unavailable");
                OutgoingMessage::new(
                    "I couldn't retrieve sentiment data at this time. Please try again later.",
                )
            }
            Err(e) => {
                warn!(error = %e, "sentiment analysis failed");
                OutgoingMessage::new(format!(
                    "I encountered an error analyzing sentiment: {}",
                    e
                ))
            }
        }
    }
}
