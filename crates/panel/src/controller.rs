//! Credential lifecycle controller.
//!
//! Responsibilities:
//! - Validate input before any request is issued.
//! - Run each operation against the [`CredentialStore`], raising the matching
//!   busy flag (or pending id) for the duration of the call.
//! - Reload the credential registry after every successful mutation.
//! - Populate the one-time secret slot from create and rotate responses.
//! - Report outcomes through the [`Notifier`].
//!
//! Does NOT handle:
//! - Retries. A failed operation is re-run by the caller.
//! - Per-credential locking. Two mutations on the same id both proceed and the
//!   registry reflects whichever reload finishes last.
//!
//! Invariants:
//! - No state borrow is held across an `.await`.
//! - A failed request leaves settings and registry at their last loaded value.
//! - Busy flags and pending ids are cleared on every exit path via [`BusyGuard`].

use std::sync::Arc;

use keygate_client::{ApiSettings, ClientError, CreateCredentialParams, CreatedCredential, Credential, CredentialId};
use keygate_config::constants::{DEFAULT_API_RATE_LIMIT_PER_MINUTE, DEFAULT_API_TOKEN_ONLY, DEFAULT_BOOTSTRAP_NAME};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::clipboard::Clipboard;
use crate::error::{PanelError, RequestFailure, ValidationError};
use crate::gate::{ConfirmPrompt, ConfirmationGate};
use crate::notify::{Notice, NoticeLevel, Notifier};
use crate::state::{BusyFlags, BusyGuard, PanelState, PendingForm, RevealedSecret};
use crate::store::CredentialStore;

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The confirmation gate answered no; nothing was sent.
    Declined,
}

/// First-time provisioning of the API access policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapRequest {
    /// Turn token-only access on. `false` leaves the current policy as is.
    pub token_only: bool,
    pub default_rate: i64,
    pub name: String,
    pub rate: i64,
}

impl Default for BootstrapRequest {
    fn default() -> Self {
        Self {
            token_only: DEFAULT_API_TOKEN_ONLY,
            default_rate: i64::from(DEFAULT_API_RATE_LIMIT_PER_MINUTE),
            name: DEFAULT_BOOTSTRAP_NAME.to_string(),
            rate: i64::from(DEFAULT_API_RATE_LIMIT_PER_MINUTE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The registry was empty and the bootstrap credential was created.
    Created(Option<Credential>),
    /// Credentials already existed (count); none was created.
    AlreadyProvisioned(usize),
}

/// Drives credential operations and owns the panel session state.
pub struct CredentialController {
    store: Arc<dyn CredentialStore>,
    gate: Arc<dyn ConfirmationGate>,
    clipboard: Arc<dyn Clipboard>,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<PanelState>,
}

fn check_id(id: CredentialId) -> Result<CredentialId, ValidationError> {
    if id == 0 {
        Err(ValidationError::InvalidId)
    } else {
        Ok(id)
    }
}

fn check_rate(rate: i64) -> Result<u32, ValidationError> {
    if rate < 0 {
        return Err(ValidationError::NegativeRate);
    }
    u32::try_from(rate).map_err(|_| ValidationError::RateOutOfRange(rate))
}

impl CredentialController {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        gate: Arc<dyn ConfirmationGate>,
        clipboard: Arc<dyn Clipboard>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (state, _) = watch::channel(PanelState::default());
        Self {
            store,
            gate,
            clipboard,
            notifier,
            state,
        }
    }

    /// Current state snapshot. Do not hold it across an `.await`.
    pub fn state(&self) -> watch::Ref<'_, PanelState> {
        self.state.borrow()
    }

    /// Receiver notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<PanelState> {
        self.state.subscribe()
    }

    /// Replace the pending create form with raw user input.
    pub fn set_form(&self, name: impl Into<String>, rate: i64) {
        let form = PendingForm {
            name: name.into(),
            rate,
        };
        self.state.send_modify(|s| s.form = form);
    }

    async fn notify(&self, level: NoticeLevel, message: impl Into<String>) {
        self.notifier.notify(Notice::new(level, message)).await;
    }

    async fn reject(&self, err: ValidationError) -> PanelError {
        debug!(error = %err, "Input rejected");
        self.notify(NoticeLevel::Warning, err.to_string()).await;
        err.into()
    }

    async fn fail(&self, operation: &'static str, err: ClientError) -> PanelError {
        let failure = RequestFailure::new(operation, err);
        warn!(error = %failure, "Operation failed");
        self.notify(NoticeLevel::Error, failure.to_string()).await;
        failure.into()
    }

    async fn valid_id(&self, id: CredentialId) -> Result<CredentialId, PanelError> {
        match check_id(id) {
            Ok(id) => Ok(id),
            Err(e) => Err(self.reject(e).await),
        }
    }

    async fn valid_rate(&self, rate: i64) -> Result<u32, PanelError> {
        match check_rate(rate) {
            Ok(rate) => Ok(rate),
            Err(e) => Err(self.reject(e).await),
        }
    }

    /// Reload after a mutation; a failed reload has already been notified.
    async fn refresh(&self) {
        if let Err(e) = self.load_credentials().await {
            debug!(error = %e, "Registry reload after mutation failed");
        }
    }

    /// Load settings and credentials concurrently.
    pub async fn init(&self) -> Result<(), PanelError> {
        let (settings, credentials) = tokio::join!(self.load_settings(), self.load_credentials());
        settings.and(credentials)
    }

    pub async fn load_settings(&self) -> Result<(), PanelError> {
        let _busy = BusyGuard::flag(&self.state, BusyFlags::LOADING);
        match self.store.get_settings().await {
            Ok(settings) => {
                debug!(?settings, "API settings loaded");
                self.state.send_modify(|s| {
                    s.settings = settings;
                    s.settings_loaded = true;
                });
                Ok(())
            }
            Err(e) => Err(self.fail("load settings", e).await),
        }
    }

    /// Save `next`, then reload. Local settings only change through the reload.
    pub async fn save_settings(&self, next: ApiSettings) -> Result<(), PanelError> {
        {
            let _busy = BusyGuard::flag(&self.state, BusyFlags::SAVING);
            if let Err(e) = self.store.save_settings(next).await {
                return Err(self.fail("save settings", e).await);
            }
        }
        info!(?next, "API settings saved");
        self.notify(NoticeLevel::Success, "API settings saved").await;
        self.load_settings().await
    }

    pub async fn load_credentials(&self) -> Result<(), PanelError> {
        let _busy = BusyGuard::flag(&self.state, BusyFlags::LOADING);
        match self.store.list().await {
            Ok(credentials) => {
                debug!(count = credentials.len(), "API users loaded");
                self.state.send_modify(|s| s.credentials = credentials);
                Ok(())
            }
            Err(e) => Err(self.fail("load API users", e).await),
        }
    }

    /// Create a credential from the pending form.
    pub async fn create(&self) -> Result<Option<Credential>, PanelError> {
        let (name, rate) = {
            let state = self.state.borrow();
            (state.form.name.clone(), state.form.rate)
        };
        self.submit_create(&name, rate, true).await
    }

    /// Create a credential from explicit values, leaving the form untouched.
    /// The token, if the response carries one, is revealed.
    pub async fn create_with(&self, name: &str, rate: i64) -> Result<Option<Credential>, PanelError> {
        self.submit_create(name, rate, false).await
    }

    async fn submit_create(
        &self,
        name: &str,
        rate: i64,
        reset_form: bool,
    ) -> Result<Option<Credential>, PanelError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(self.reject(ValidationError::EmptyName).await);
        }
        let rate = self.valid_rate(rate).await?;

        let _busy = BusyGuard::flag(&self.state, BusyFlags::CREATING);
        info!(name, rate, "Creating API user");

        let params = CreateCredentialParams {
            name: name.to_string(),
            rate,
        };
        let CreatedCredential { user, token } = match self.store.create(params).await {
            Ok(created) => created,
            Err(e) => return Err(self.fail("create", e).await),
        };

        let credential_id = user.as_ref().map(Credential::key);
        self.state.send_modify(|s| {
            if reset_form {
                s.form = PendingForm::default();
            }
            if let Some(token) = token {
                s.secret = Some(RevealedSecret::new(token, credential_id));
            }
        });

        self.notify(NoticeLevel::Success, format!("API user '{name}' created"))
            .await;
        self.refresh().await;
        Ok(user)
    }

    /// Issue a new token and reveal it, replacing any secret on display.
    pub async fn rotate(&self, id: CredentialId) -> Result<(), PanelError> {
        let id = self.valid_id(id).await?;
        let _pending = BusyGuard::id(&self.state, id);
        info!(id, "Rotating API user token");

        let rotated = match self.store.rotate(id).await {
            Ok(rotated) => rotated,
            Err(e) => return Err(self.fail("rotate", e).await),
        };
        let Some(token) = rotated.token else {
            // The server rotated anyway, so a token shown for this id is dead.
            self.forget_secret_for(id);
            let err = ClientError::InvalidResponse("success response carried no token".to_string());
            return Err(self.fail("rotate", err).await);
        };

        self.state
            .send_modify(|s| s.secret = Some(RevealedSecret::new(token, Some(id))));
        self.notify(NoticeLevel::Success, format!("API user {id} token rotated"))
            .await;
        self.refresh().await;
        Ok(())
    }

    /// Enable or disable a credential. The registry only changes through the reload.
    pub async fn toggle(&self, id: CredentialId, enabled: bool) -> Result<(), PanelError> {
        let id = self.valid_id(id).await?;
        let _pending = BusyGuard::id(&self.state, id);
        info!(id, enabled, "Toggling API user");

        if let Err(e) = self.store.set_enabled(id, enabled).await {
            let operation = if enabled { "enable" } else { "disable" };
            return Err(self.fail(operation, e).await);
        }

        let verb = if enabled { "enabled" } else { "disabled" };
        self.notify(NoticeLevel::Success, format!("API user {id} {verb}"))
            .await;
        self.refresh().await;
        Ok(())
    }

    /// Delete a credential once the confirmation gate agrees.
    pub async fn delete(&self, id: CredentialId) -> Result<DeleteOutcome, PanelError> {
        let id = self.valid_id(id).await?;

        let label = self
            .state
            .borrow()
            .credential(id)
            .map(|c| format!("'{}' (id {id})", c.name))
            .unwrap_or_else(|| format!("id {id}"));
        let prompt = ConfirmPrompt::new(
            "Delete API user",
            format!("Delete API user {label}? Clients using its token will stop working."),
        );
        if !self.gate.confirm(&prompt).await {
            debug!(id, "Delete declined");
            return Ok(DeleteOutcome::Declined);
        }

        let _pending = BusyGuard::id(&self.state, id);
        info!(id, "Deleting API user");
        if let Err(e) = self.store.delete(id).await {
            return Err(self.fail("delete", e).await);
        }

        self.forget_secret_for(id);
        self.notify(NoticeLevel::Success, format!("API user {id} deleted"))
            .await;
        self.refresh().await;
        Ok(DeleteOutcome::Deleted)
    }

    /// Set a credential's own rate limit (0 = use the default).
    pub async fn update_rate(&self, id: CredentialId, rate: i64) -> Result<(), PanelError> {
        let id = self.valid_id(id).await?;
        let rate = self.valid_rate(rate).await?;
        let _pending = BusyGuard::id(&self.state, id);
        info!(id, rate, "Updating API user rate limit");

        if let Err(e) = self.store.update_rate(id, rate).await {
            return Err(self.fail("update rate", e).await);
        }

        self.notify(
            NoticeLevel::Success,
            format!("API user {id} rate limit set to {rate} requests/minute"),
        )
        .await;
        self.refresh().await;
        Ok(())
    }

    /// Copy the visible secret to the clipboard. Returns `false` when nothing
    /// is on display or the copy failed.
    pub async fn reveal_copy(&self) -> bool {
        let copied = {
            let state = self.state.borrow();
            state
                .visible_secret()
                .map(|secret| self.clipboard.copy_text(secret.expose()))
        };

        match copied {
            None => false,
            Some(Ok(())) => {
                self.notify(NoticeLevel::Success, "Token copied to clipboard")
                    .await;
                true
            }
            Some(Err(msg)) => {
                self.notify(NoticeLevel::Error, format!("Failed to copy token: {msg}"))
                    .await;
                false
            }
        }
    }

    /// Drop the revealed secret.
    pub fn dismiss_secret(&self) {
        self.state.send_modify(|s| s.secret = None);
    }

    fn forget_secret_for(&self, id: CredentialId) {
        self.state.send_if_modified(|s| {
            let stale = s.secret.as_ref().is_some_and(|secret| secret.credential == Some(id));
            if stale {
                s.secret = None;
            }
            stale
        });
    }

    /// Apply the API access policy and create the first credential when none exist.
    pub async fn bootstrap(&self, request: BootstrapRequest) -> Result<BootstrapOutcome, PanelError> {
        let default_rate = self.valid_rate(request.default_rate).await?;
        self.valid_rate(request.rate).await?;

        self.load_settings().await?;
        let current = self.state.borrow().settings;
        let next = ApiSettings {
            token_only: request.token_only || current.token_only,
            default_rate_limit_per_minute: default_rate,
        };
        self.save_settings(next).await?;

        self.load_credentials().await?;
        let count = self.state.borrow().credentials.len();
        if count > 0 {
            info!(count, "API users already present, bootstrap user not created");
            self.notify(
                NoticeLevel::Info,
                format!("API users already present ({count}); bootstrap user not created"),
            )
            .await;
            return Ok(BootstrapOutcome::AlreadyProvisioned(count));
        }

        let user = self.create_with(&request.name, request.rate).await?;
        Ok(BootstrapOutcome::Created(user))
    }
}
