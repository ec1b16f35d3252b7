//! Dispatch table: action name -> handler.

use super::context::ActionContext;
use super::{
    ContentMetrics, CustomReport, JournalistContact, KeywordAlert, KpiReport, MediaCoverage,
    PublishPost, SchedulePost, SentimentAnalysis,
};
use crate::domain::{OutgoingMessage, Slots};
use crate::ports::ActionHandler;
use std::sync::Arc;
use tracing::{info, warn};

/// Registered actions, kept in registration order.
#[derive(Clone, Default)]
pub struct ActionRegistry {
    handlers: Vec<Arc<dyn ActionHandler>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All media-monitoring actions, sharing one context.
    pub fn with_default_actions(ctx: ActionContext) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(SentimentAnalysis::new(ctx.clone())));
        registry.register(Arc::new(MediaCoverage::new(ctx.clone())));
        registry.register(Arc::new(ContentMetrics::new(ctx.clone())));
        registry.register(Arc::new(KpiReport::new(ctx.clone())));
        registry.register(Arc::new(KeywordAlert::new(ctx.clone())));
        registry.register(Arc::new(JournalistContact::new(ctx.clone())));
        registry.register(Arc::new(PublishPost::new(ctx.clone())));
        registry.register(Arc::new(SchedulePost::new(ctx.clone())));
        registry.register(Arc::new(CustomReport::new(ctx)));
        registry
    }

    /// Add a handler. A handler with the same name replaces the earlier one.
    pub fn register(&mut self, handler: Arc<dyn ActionHandler>) {
        match self.handlers.iter().position(|h| h.name() == handler.name()) {
            Some(idx) => {
                warn!(action = handler.name(), "replacing registered action");
                self.handlers[idx] = handler;
            }
            None => self.handlers.push(handler),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn ActionHandler>> {
        self.handlers.iter().find(|h| h.name() == name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    pub fn handlers(&self) -> &[Arc<dyn ActionHandler>] {
        &self.handlers
    }

    /// Run the named action. `None` when nothing is registered under `name`.
    pub async fn dispatch(&self, name: &str, slots: &Slots) -> Option<OutgoingMessage> {
        let handler = self.get(name)?;
        info!(action = name, "running action");
        Some(handler.run(slots).await)
    }
}
