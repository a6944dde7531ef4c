//! Interactive confirmation for destructive commands.
//!
//! Responsibilities:
//! - Answer the controller's confirmation requests with a terminal prompt.
//! - Choose between the prompt and `--force`.
//!
//! Invariants:
//! - A prompt that cannot be shown (no TTY, I/O error) counts as "no".

use std::sync::Arc;

use dialoguer::Confirm;
use futures::future::BoxFuture;
use keygate_panel::{AutoConfirm, ConfirmPrompt, ConfirmationGate};
use tracing::{debug, warn};

/// Asks on the terminal via `dialoguer`, defaulting to "no".
#[derive(Debug, Clone, Copy, Default)]
pub struct DialoguerGate;

impl ConfirmationGate for DialoguerGate {
    fn confirm<'a>(&'a self, prompt: &'a ConfirmPrompt) -> BoxFuture<'a, bool> {
        let text = prompt.body.clone();
        Box::pin(async move {
            debug!(prompt = %text, "Asking for confirmation");
            let answer = tokio::task::spawn_blocking(move || {
                Confirm::new().with_prompt(text).default(false).interact()
            })
            .await;

            match answer {
                Ok(Ok(confirmed)) => confirmed,
                Ok(Err(e)) => {
                    warn!(error = %e, "Confirmation prompt unavailable, treating as declined");
                    false
                }
                Err(e) => {
                    warn!(error = %e, "Confirmation prompt task failed");
                    false
                }
            }
        })
    }
}

/// `--force` skips the prompt.
pub fn confirmation_gate(force: bool) -> Arc<dyn ConfirmationGate> {
    if force {
        Arc::new(AutoConfirm(true))
    } else {
        Arc::new(DialoguerGate)
    }
}
