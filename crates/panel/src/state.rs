//! Session context owned by the controller.
//!
//! Responsibilities:
//! - Hold the last loaded settings and credential list, the pending create
//!   form, the busy flags and the one-time secret slot.
//! - Track in-flight operations per class and per credential id.
//!
//! Invariants:
//! - The credential list is only ever replaced wholesale by a load.
//! - A [`RevealedSecret`] is only built from a create or rotate response; it
//!   has no serde impls and its `Debug` output never contains the value.
//! - A busy flag is set exactly while its in-flight counter is non-zero.

use std::collections::BTreeMap;
use std::fmt;

use bitflags::bitflags;
use keygate_client::{ApiSettings, Credential, CredentialId};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::watch;

bitflags! {
    /// Operation classes currently in flight.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct BusyFlags: u8 {
        const LOADING = 1 << 0;
        const SAVING = 1 << 1;
        const CREATING = 1 << 2;
    }
}

impl BusyFlags {
    pub fn loading(self) -> bool {
        self.contains(Self::LOADING)
    }

    pub fn saving(self) -> bool {
        self.contains(Self::SAVING)
    }

    pub fn creating(self) -> bool {
        self.contains(Self::CREATING)
    }
}

/// Raw create-form input as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingForm {
    pub name: String,
    pub rate: i64,
}

/// A freshly issued token, shown once.
pub struct RevealedSecret {
    value: SecretString,
    pub visible: bool,
    /// Credential the token belongs to, when the response named it.
    pub credential: Option<CredentialId>,
}

impl RevealedSecret {
    pub(crate) fn new(value: SecretString, credential: Option<CredentialId>) -> Self {
        Self {
            value,
            visible: true,
            credential,
        }
    }

    /// Plaintext token.
    pub fn expose(&self) -> &str {
        self.value.expose_secret()
    }
}

impl fmt::Debug for RevealedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealedSecret")
            .field("value", &"[REDACTED]")
            .field("visible", &self.visible)
            .field("credential", &self.credential)
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct PanelState {
    pub settings: ApiSettings,
    /// Whether `settings` came from the server rather than local defaults.
    pub settings_loaded: bool,
    pub credentials: Vec<Credential>,
    pub form: PendingForm,
    pub busy: BusyFlags,
    pub secret: Option<RevealedSecret>,
    in_flight: [usize; 3],
    pending: BTreeMap<CredentialId, usize>,
}

impl PanelState {
    pub fn credential(&self, id: CredentialId) -> Option<&Credential> {
        self.credentials.iter().find(|c| c.id == id)
    }

    /// The secret, if one is currently on display.
    pub fn visible_secret(&self) -> Option<&RevealedSecret> {
        self.secret.as_ref().filter(|s| s.visible)
    }

    /// Whether a mutation on `id` is in flight (greys out row controls).
    pub fn is_pending(&self, id: CredentialId) -> bool {
        self.pending.contains_key(&id)
    }

    fn slot(flag: BusyFlags) -> usize {
        if flag == BusyFlags::LOADING {
            0
        } else if flag == BusyFlags::SAVING {
            1
        } else {
            2
        }
    }

    fn begin(&mut self, flag: BusyFlags) {
        self.in_flight[Self::slot(flag)] += 1;
        self.busy.insert(flag);
    }

    fn end(&mut self, flag: BusyFlags) {
        let slot = &mut self.in_flight[Self::slot(flag)];
        *slot = slot.saturating_sub(1);
        if *slot == 0 {
            self.busy.remove(flag);
        }
    }

    fn begin_id(&mut self, id: CredentialId) {
        *self.pending.entry(id).or_default() += 1;
    }

    fn end_id(&mut self, id: CredentialId) {
        if let Some(count) = self.pending.get_mut(&id) {
            *count -= 1;
            if *count == 0 {
                self.pending.remove(&id);
            }
        }
    }
}

/// Holds a busy flag (and optionally a credential id) for its lifetime.
///
/// Dropping the guard clears what it raised on every exit path.
pub(crate) struct BusyGuard<'a> {
    state: &'a watch::Sender<PanelState>,
    flag: Option<BusyFlags>,
    id: Option<CredentialId>,
}

impl<'a> BusyGuard<'a> {
    pub(crate) fn flag(state: &'a watch::Sender<PanelState>, flag: BusyFlags) -> Self {
        state.send_modify(|s| s.begin(flag));
        Self {
            state,
            flag: Some(flag),
            id: None,
        }
    }

    pub(crate) fn id(state: &'a watch::Sender<PanelState>, id: CredentialId) -> Self {
        state.send_modify(|s| s.begin_id(id));
        Self {
            state,
            flag: None,
            id: Some(id),
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        let (flag, id) = (self.flag, self.id);
        self.state.send_modify(|s| {
            if let Some(flag) = flag {
                s.end(flag);
            }
            if let Some(id) = id {
                s.end_id(id);
            }
        });
    }
}
