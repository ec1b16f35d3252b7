//! Interactive console. Inquire-based prompts over the action registry.
//!
//! Pick an action, answer its slot prompts (empty = not filled), read the reply.

use crate::domain::{DomainError, Slot, Slots};
use crate::usecases::ActionRegistry;
use inquire::{InquireError, Select, Text};
use std::sync::Arc;
use tracing::info;

const QUIT: &str = "Quit";

/// Console adapter. Loops until the user quits or cancels a prompt.
pub struct ConsoleInputPort {
    registry: Arc<ActionRegistry>,
}

impl ConsoleInputPort {
    pub fn new(registry: Arc<ActionRegistry>) -> Self {
        Self { registry }
    }

    pub async fn run(&self) -> Result<(), DomainError> {
        loop {
            let mut options: Vec<&str> = self.registry.names();
            options.push(QUIT);

            let choice = match Select::new("Which action should run?", options).prompt() {
                Ok(choice) => choice,
                Err(e) if is_cancel(&e) => return Ok(()),
                Err(e) => return Err(DomainError::Console(e.to_string())),
            };
            if choice == QUIT {
                return Ok(());
            }
            let Some(handler) = self.registry.get(choice) else {
                continue;
            };

            let mut answers = Vec::new();
            for slot in handler.slots() {
                let label = format!("{}:", slot);
                match Text::new(&label)
                    .with_help_message("leave empty to skip")
                    .prompt()
                {
                    Ok(answer) => answers.push((*slot, answer)),
                    Err(e) if is_cancel(&e) => return Ok(()),
                    Err(e) => return Err(DomainError::Console(e.to_string())),
                }
            }

            let slots = slots_from_answers(answers);
            info!(action = choice, "console run");
            let message = handler.run(&slots).await;
            println!("\n{}\n", message);
        }
    }
}

fn is_cancel(e: &InquireError) -> bool {
    matches!(
        e,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Non-blank answers become string slots; blank ones stay unfilled.
fn slots_from_answers(answers: Vec<(Slot, String)>) -> Slots {
    answers
        .into_iter()
        .filter(|(_, answer)| !answer.trim().is_empty())
        .fold(Slots::new(), |slots, (slot, answer)| {
            slots.with(slot, answer.trim())
        })
}
