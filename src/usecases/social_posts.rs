//! Publish or schedule a social media post (`POST /social-posts`).

use super::context::{ActionContext, OK_OR_CREATED};
use crate::domain::date_range::iso_date;
use crate::domain::{BackendRequest, DomainError, OutgoingMessage, Slot, Slots};
use crate::ports::ActionHandler;
use serde_json::{Value, json};
use tracing::{error, info, warn};

const ENDPOINT: &str = "/social-posts";

/// Content and platform, both required before anything is sent.
struct PostDraft {
    content: String,
    /// Platform as the user typed it; sent lowercased, echoed verbatim.
    platform: String,
}

impl PostDraft {
    fn from_slots(
        slots: &Slots,
        missing_content: &'static str,
        missing_platform: &'static str,
    ) -> Result<Self, OutgoingMessage> {
        let content = slots
            .get(Slot::PostContent)
            .ok_or_else(|| OutgoingMessage::new(missing_content))?;
        let platform = slots
            .get(Slot::Platform)
            .ok_or_else(|| OutgoingMessage::new(missing_platform))?;
        Ok(Self { content, platform })
    }

    fn body(&self, status: &str) -> Value {
        json!({
            "content": self.content,
            "platform": self.platform.to_lowercase(),
            "status": status,
        })
    }
}

pub struct PublishPost {
    ctx: ActionContext,
}

impl PublishPost {
    pub fn new(ctx: ActionContext) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl ActionHandler for PublishPost {
    fn name(&self) -> &'static str {
        "action_publish_social_post"
    }

    fn slots(&self) -> &'static [Slot] {
        &[Slot::PostContent, Slot::Platform]
    }

    async fn run(&self, slots: &Slots) -> OutgoingMessage {
        let draft = match PostDraft::from_slots(
            slots,
            "What would you like to post? Please provide the content for your social media post.",
            "Which platform would you like to post to? Please specify the social media platform.",
        ) {
            Ok(draft) => draft,
            Err(prompt) => return prompt,
        };

        let request = BackendRequest::post(ENDPOINT, draft.body("published"));
        match self.ctx.call(request, OK_OR_CREATED).await {
            Ok(_) => {
                info!(platform = %draft.platform, "social post published");
                OutgoingMessage::new(format!(
                    "Your post has been published to {}.\nYou can view and manage your posts in the Social Media dashboard.",
                    draft.platform
                ))
            }
            Err(DomainError::UnexpectedStatus { status, .. }) => {
                warn!(status, platform = %draft.platform, "publish refused");
                OutgoingMessage::new(
                    "I couldn't publish your post at this time. Please try again later or publish it manually from the Social Media dashboard.",
                )
            }
            Err(e) => {
                error!(error = %e, platform = %draft.platform, "Error publishing social post");
                OutgoingMessage::new(
                    "I encountered an error while publishing your post. Please try again or publish it manually from the Social Media dashboard.",
                )
            }
        }
    }
}

pub struct SchedulePost {
    ctx: ActionContext,
}

impl SchedulePost {
    pub fn new(ctx: ActionContext) -> Self {
        Self { ctx }
    }

    /// Start of the `date_range` phrase (today when unresolved), plus `T{time}` when given.
    fn scheduled_for(&self, date_range: Option<&str>, time: Option<&str>) -> String {
        let dates = self.ctx.dates();
        let day = dates
            .resolve(date_range)
            .map(|range| range.start)
            .unwrap_or_else(|| dates.today());
        match time {
            Some(time) => format!("{}T{}", iso_date(day), time),
            None => iso_date(day),
        }
    }
}

#[async_trait::async_trait]
impl ActionHandler for SchedulePost {
    fn name(&self) -> &'static str {
        "action_schedule_social_post"
    }

    fn slots(&self) -> &'static [Slot] {
        &[
            Slot::PostContent,
            Slot::Platform,
            Slot::DateRange,
            Slot::PostScheduleTime,
        ]
    }

    async fn run(&self, slots: &Slots) -> OutgoingMessage {
        let draft = match PostDraft::from_slots(
            slots,
            "What would you like to schedule for posting? Please provide the content.",
            "Which platform would you like to schedule the post for? Please specify the social media platform.",
        ) {
            Ok(draft) => draft,
            Err(prompt) => return prompt,
        };
        let date_range = slots.get(Slot::DateRange);
        let time = slots.get(Slot::PostScheduleTime);

        let scheduled_for = self.scheduled_for(date_range.as_deref(), time.as_deref());
        let mut body = draft.body("scheduled");
        body["scheduledFor"] = Value::from(scheduled_for.as_str());

        match self.ctx.call(BackendRequest::post(ENDPOINT, body), OK_OR_CREATED).await {
            Ok(_) => {
                info!(platform = %draft.platform, scheduled_for = %scheduled_for, "social post scheduled");
                let mut message = format!(
                    "Your post has been scheduled for publication on {}.",
                    draft.platform
                );
                match (&date_range, &time) {
                    (Some(date), Some(time)) => {
                        message.push_str(&format!("\nScheduled for: {} at {}", date, time))
                    }
                    (Some(date), None) => message.push_str(&format!("\nScheduled for: {}", date)),
                    _ => {}
                }
                message.push_str(
                    "\nYou can view and manage your scheduled posts in the Social Media dashboard.",
                );
                OutgoingMessage::new(message)
            }
            Err(DomainError::UnexpectedStatus { status, .. }) => {
                warn!(status, platform = %draft.platform, "schedule refused");
                OutgoingMessage::new(
                    "I couldn't schedule your post at this time. Please try again later or schedule it manually from the Social Media dashboard.",
                )
            }
            Err(e) => {
                error!(error = %e, platform = %draft.platform, "Error scheduling social post");
                OutgoingMessage::new(
                    "I encountered an error while scheduling your post. Please try again or schedule it manually from the Social Media dashboard.",
                )
            }
        }
    }
}
