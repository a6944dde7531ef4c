//! Confirmation gate for destructive actions.
//!
//! The controller awaits [`ConfirmationGate::confirm`] before issuing a
//! destructive request. Answering `false` is a normal outcome.

use futures::future::BoxFuture;

/// Title and body shown to whoever answers the confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub body: String,
}

impl ConfirmPrompt {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

pub trait ConfirmationGate: Send + Sync {
    /// Resolve to `true` to proceed with the guarded action.
    fn confirm<'a>(&'a self, prompt: &'a ConfirmPrompt) -> BoxFuture<'a, bool>;
}

/// Gate with a fixed answer (`--force`, scripted runs, tests).
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl ConfirmationGate for AutoConfirm {
    fn confirm<'a>(&'a self, prompt: &'a ConfirmPrompt) -> BoxFuture<'a, bool> {
        let answer = self.0;
        Box::pin(async move {
            tracing::debug!(title = %prompt.title, answer, "Confirmation answered automatically");
            answer
        })
    }
}
