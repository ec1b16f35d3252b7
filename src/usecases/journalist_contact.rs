//! Add a journalist to the media contacts (`POST /journalists`).

use super::context::{ActionContext, OK_OR_CREATED, put_present};
use crate::domain::{BackendRequest, DomainError, OutgoingMessage, Slot, Slots};
use crate::ports::ActionHandler;
use serde_json::{Map, Value};
use tracing::{error, warn};

const ENDPOINT: &str = "/journalists";

pub struct JournalistContact {
    ctx: ActionContext,
}

impl JournalistContact {
    pub fn new(ctx: ActionContext) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl ActionHandler for JournalistContact {
    fn name(&self) -> &'static str {
        "action_add_journalist_contact"
    }

    fn slots(&self) -> &'static [Slot] {
        &[Slot::JournalistName, Slot::JournalistSource, Slot::Email]
    }

    async fn run(&self, slots: &Slots) -> OutgoingMessage {
        let Some(name) = slots.get(Slot::JournalistName) else {
            return OutgoingMessage::new(
                "I need the journalist's name to add them to your contacts. Please provide a name.",
            );
        };
        let organization = slots.get(Slot::JournalistSource);

        let mut body = Map::new();
        body.insert("name".to_string(), Value::from(name.as_str()));
        body.insert("isActive".to_string(), Value::Bool(true));
        put_present(&mut body, "organization", organization.as_ref());
        put_present(&mut body, "email", slots.get(Slot::Email).as_ref());

        let request = BackendRequest::post(ENDPOINT, Value::Object(body));
        match self.ctx.call(request, OK_OR_CREATED).await {
            Ok(_) => {
                let mut message = format!("Added journalist '{}' to your contacts.", name);
                if let Some(organization) = &organization {
                    message.push_str(&format!("\nOrganization: {}", organization));
                }
                message.push_str(
                    "\nYou can view and manage journalist contacts in the Media Center section.",
                );
                OutgoingMessage::new(message)
            }
            Err(DomainError::UnexpectedStatus { status, .. }) => {
                warn!(status, journalist = %name, "journalist contact refused");
                OutgoingMessage::new(
                    "I couldn't add the journalist contact at this time. Please try again later or add them manually in the Media Center section.",
                )
            }
            Err(e) => {
                error!(error = %e, journalist = %name, "Error adding journalist contact");
                OutgoingMessage::new(
                    "I encountered an error while adding the journalist contact. Please try again or add them manually in the Media Center section.",
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

    fn action(backend: &Arc<ScriptedBackend>) -> JournalistContact {
        JournalistContact::new(ActionContext::new(backend.clone(), Arc::new(SystemClock)))
    }

    #[tokio::test]
    async fn test_requires_name() {
        let backend = Arc::new(ScriptedBackend::new());
        let message = action(&backend)
            .run(&Slots::new().with(Slot::Email, "jane@news.example"))
            .await;
        assert!(message.text.starts_with("I need the journalist's name"));
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_creates_contact_with_renamed_fields() {
        let backend = Arc::new(ScriptedBackend::new().respond(201, json!({"id": 3})));
        let slots = Slots::new()
            .with(Slot::JournalistName, "Jane Doe")
            .with(Slot::JournalistSource, "Daily Planet")
            .with(Slot::Email, "jane@planet.example");

        let message = action(&backend).run(&slots).await;

        assert_eq!(
            backend.requests()[0].body,
            Some(json!({
                "name": "Jane Doe",
                "isActive": true,
                "organization": "Daily Planet",
                "email": "jane@planet.example",
            }))
        );
        assert_eq!(
            message.text,
            "Added journalist 'Jane Doe' to your contacts.\n\
             Organization: Daily Planet\n\
             You can view and manage journalist contacts in the Media Center section."
        );
    }

    #[tokio::test]
    async fn test_failures() {
        let backend = Arc::new(ScriptedBackend::new().respond(400, json!({})).fail("dns"));
        let slots = Slots::new().with(Slot::JournalistName, "Jane Doe");
        let action = action(&backend);

        assert!(action
            .run(&slots)
            .await
            .text
            .starts_with("I couldn't add the journalist contact at this time."));
        assert!(action
            .run(&slots)
            .await
            .text
            .starts_with("I encountered an error while adding the journalist contact."));
        assert_eq!(
            backend.requests()[0].body,
            Some(json!({"name": "Jane Doe", "isActive": true}))
        );
    }
}
