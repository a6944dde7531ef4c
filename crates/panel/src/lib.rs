//! Credential lifecycle core for the panel's API users.
//!
//! Responsibilities:
//! - Own the session context: API settings, the credential registry, busy
//!   flags, the pending create form and the one-time secret slot.
//! - Drive every operation against a [`CredentialStore`] and reload the
//!   registry after each successful mutation.
//! - Reach the outside world only through the [`ConfirmationGate`],
//!   [`Clipboard`] and [`Notifier`] seams.
//!
//! Does NOT handle:
//! - HTTP transport, login or retries (handled by `keygate-client`).
//! - Rendering or prompting (handled by the front end that implements the seams).

pub mod clipboard;
pub mod controller;
pub mod error;
pub mod gate;
pub mod notify;
pub mod state;
pub mod store;

pub use clipboard::{Clipboard, RecordingClipboard, SystemClipboard};
pub use controller::{BootstrapOutcome, BootstrapRequest, CredentialController, DeleteOutcome};
pub use error::{PanelError, RequestFailure, ValidationError};
pub use gate::{AutoConfirm, ConfirmPrompt, ConfirmationGate};
pub use notify::{ChannelNotifier, Notice, NoticeLevel, Notifier, TracingNotifier};
pub use state::{BusyFlags, PanelState, PendingForm, RevealedSecret};
pub use store::{CredentialStore, SharedClient};
