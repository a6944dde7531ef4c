//! Shared doubles for controller tests.
//!
//! `FakeStore` keeps an in-memory registry, records every call in order and
//! can be told to reject specific operations or hold loads until released.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use keygate_client::{
    ApiSettings, ClientError, CreateCredentialParams, CreatedCredential, Credential, CredentialId,
    Result, RotatedToken,
};
use keygate_panel::{
    ChannelNotifier, ConfirmPrompt, ConfirmationGate, CredentialController, CredentialStore, Notice,
    RecordingClipboard,
};
use secrecy::SecretString;
use tokio::sync::{Notify, mpsc};

pub fn credential(id: CredentialId, name: &str, enabled: bool, rate: u32) -> Credential {
    Credential {
        id,
        name: name.to_string(),
        enabled,
        rate_limit_per_minute: rate,
        last_used_at: None,
    }
}

/// Largest rate the fake server stores; larger values are clamped.
pub const SERVER_MAX_RATE: u32 = 10_000;

pub struct FakeStore {
    calls: Mutex<Vec<String>>,
    credentials: Mutex<Vec<Credential>>,
    settings: Mutex<ApiSettings>,
    failing: Mutex<HashSet<&'static str>>,
    issued_token: Mutex<Option<String>>,
    next_id: Mutex<CredentialId>,
    list_gate: Mutex<Option<Arc<Notify>>>,
    settings_gate: Mutex<Option<Arc<Notify>>>,
}

impl FakeStore {
    pub fn new(credentials: Vec<Credential>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            credentials: Mutex::new(credentials),
            settings: Mutex::new(ApiSettings {
                token_only: false,
                default_rate_limit_per_minute: 60,
            }),
            failing: Mutex::new(HashSet::new()),
            issued_token: Mutex::new(Some("abc123".to_string())),
            next_id: Mutex::new(7),
            list_gate: Mutex::new(None),
            settings_gate: Mutex::new(None),
        }
    }

    pub fn seeded() -> Self {
        Self::new(vec![
            credential(3, "svc-bot", true, 60),
            credential(5, "ci-runner", false, 0),
        ])
    }

    /// Make `operation` answer with `success: false`.
    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    pub fn recover(&self, operation: &'static str) {
        self.failing.lock().unwrap().remove(operation);
    }

    /// Token handed out by create and rotate; `None` omits it.
    pub fn issue_token(&self, token: Option<&str>) {
        *self.issued_token.lock().unwrap() = token.map(str::to_string);
    }

    /// Hold the next list call until the returned handle is notified.
    pub fn hold_list(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.list_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn hold_settings(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.settings_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn server_settings(&self) -> ApiSettings {
        *self.settings.lock().unwrap()
    }

    fn record(&self, operation: &'static str, detail: String) -> Result<()> {
        self.calls.lock().unwrap().push(detail);
        if self.failing.lock().unwrap().contains(operation) {
            return Err(ClientError::Rejected {
                endpoint: operation.to_string(),
                message: format!("{operation} refused"),
            });
        }
        Ok(())
    }

    fn token(&self) -> Option<SecretString> {
        self.issued_token
            .lock()
            .unwrap()
            .clone()
            .map(|t| SecretString::new(t.into()))
    }
}

impl CredentialStore for FakeStore {
    fn get_settings(&self) -> BoxFuture<'_, Result<ApiSettings>> {
        Box::pin(async move {
            let gate = self.settings_gate.lock().unwrap().take();
            if let Some(gate) = gate {
                gate.notified().await;
            }
            self.record("get_settings", "get_settings".to_string())?;
            Ok(*self.settings.lock().unwrap())
        })
    }

    fn save_settings(&self, settings: ApiSettings) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            self.record("save_settings", "save_settings".to_string())?;
            *self.settings.lock().unwrap() = settings;
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, Result<Vec<Credential>>> {
        Box::pin(async move {
            let gate = self.list_gate.lock().unwrap().take();
            if let Some(gate) = gate {
                gate.notified().await;
            }
            self.record("list", "list".to_string())?;
            Ok(self.credentials.lock().unwrap().clone())
        })
    }

    fn create(&self, params: CreateCredentialParams) -> BoxFuture<'_, Result<CreatedCredential>> {
        Box::pin(async move {
            self.record("create", format!("create:{}:{}", params.name, params.rate))?;
            let id = {
                let mut next = self.next_id.lock().unwrap();
                let id = *next;
                *next += 1;
                id
            };
            let user = credential(id, &params.name, true, params.rate.min(SERVER_MAX_RATE));
            self.credentials.lock().unwrap().push(user.clone());
            Ok(CreatedCredential {
                user: Some(user),
                token: self.token(),
            })
        })
    }

    fn set_enabled(&self, id: CredentialId, enabled: bool) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            let operation = if enabled { "enable" } else { "disable" };
            self.record(operation, format!("{operation}:{id}"))?;
            for c in self.credentials.lock().unwrap().iter_mut() {
                if c.id == id {
                    c.enabled = enabled;
                }
            }
            Ok(())
        })
    }

    fn rotate(&self, id: CredentialId) -> BoxFuture<'_, Result<RotatedToken>> {
        Box::pin(async move {
            self.record("rotate", format!("rotate:{id}"))?;
            Ok(RotatedToken {
                token: self.token(),
            })
        })
    }

    fn delete(&self, id: CredentialId) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            self.record("delete", format!("delete:{id}"))?;
            self.credentials.lock().unwrap().retain(|c| c.id != id);
            Ok(())
        })
    }

    fn update_rate(&self, id: CredentialId, rate: u32) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            self.record("rate", format!("rate:{id}:{rate}"))?;
            for c in self.credentials.lock().unwrap().iter_mut() {
                if c.id == id {
                    c.rate_limit_per_minute = rate.min(SERVER_MAX_RATE);
                }
            }
            Ok(())
        })
    }
}

/// Gate with a fixed answer that remembers every prompt.
pub struct RecordingGate {
    answer: bool,
    prompts: Mutex<Vec<ConfirmPrompt>>,
}

impl RecordingGate {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<ConfirmPrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

impl ConfirmationGate for RecordingGate {
    fn confirm<'a>(&'a self, prompt: &'a ConfirmPrompt) -> BoxFuture<'a, bool> {
        Box::pin(async move {
            self.prompts.lock().unwrap().push(prompt.clone());
            self.answer
        })
    }
}

pub struct Harness {
    pub controller: CredentialController,
    pub store: Arc<FakeStore>,
    pub gate: Arc<RecordingGate>,
    pub clipboard: Arc<RecordingClipboard>,
    pub notices: mpsc::Receiver<Notice>,
}

impl Harness {
    pub fn new(store: FakeStore, confirm: bool) -> Self {
        Self::with_clipboard(store, confirm, RecordingClipboard::new())
    }

    pub fn with_clipboard(store: FakeStore, confirm: bool, clipboard: RecordingClipboard) -> Self {
        let store = Arc::new(store);
        let gate = Arc::new(RecordingGate::new(confirm));
        let clipboard = Arc::new(clipboard);
        let (tx, notices) = mpsc::channel(64);
        let controller = CredentialController::new(
            store.clone(),
            gate.clone(),
            clipboard.clone(),
            Arc::new(ChannelNotifier::new(tx)),
        );
        Self {
            controller,
            store,
            gate,
            clipboard,
            notices,
        }
    }

    /// Drain every notice sent so far.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        let mut out = Vec::new();
        while let Ok(notice) = self.notices.try_recv() {
            out.push(notice);
        }
        out
    }

    pub fn enabled(&self, id: CredentialId) -> Option<bool> {
        self.controller.state().credential(id).map(|c| c.enabled)
    }
}
