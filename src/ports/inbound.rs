//! Inbound port. The dispatch layer (action server, console) calls into the application.

use crate::domain::{OutgoingMessage, Slot, Slots};

/// One conversational action, selected by name.
///
/// `run` always yields exactly one message: clarification prompts, success
/// summaries and failures are all messages, never errors.
#[async_trait::async_trait]
pub trait ActionHandler: Send + Sync {
    /// Action name as registered with the dialogue engine (e.g. `action_set_keyword_alert`).
    fn name(&self) -> &'static str;

    /// Slots this action reads, in the order the console asks for them.
    fn slots(&self) -> &'static [Slot];

    async fn run(&self, slots: &Slots) -> OutgoingMessage;
}
