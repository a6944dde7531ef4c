//! Clipboard integration for revealed secrets.
//!
//! Responsibilities:
//! - Provide the [`Clipboard`] seam used by `reveal_copy`.
//! - Provide [`SystemClipboard`] backed by `arboard`.
//! - Provide [`RecordingClipboard`] so tests do not depend on the host OS clipboard.
//!
//! Invariants / assumptions:
//! - If the OS clipboard is unavailable, this module returns an error instead of panicking.

use std::sync::Mutex;

pub trait Clipboard: Send + Sync {
    /// Copy `text`; returns a human readable error on failure.
    fn copy_text(&self, text: &str) -> Result<(), String>;
}

/// The host OS clipboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy_text(&self, text: &str) -> Result<(), String> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| format!("Clipboard unavailable: {e}"))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| format!("Failed to write to clipboard: {e}"))?;
        Ok(())
    }
}

/// In-memory clipboard that remembers the last copied text, or always fails.
#[derive(Debug, Default)]
pub struct RecordingClipboard {
    last: Mutex<Option<String>>,
    failure: Option<String>,
}

impl RecordingClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose every write fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            last: Mutex::new(None),
            failure: Some(message.into()),
        }
    }

    /// Last copied text, if any.
    pub fn last_copied(&self) -> Option<String> {
        self.last.lock().ok().and_then(|guard| guard.clone())
    }
}

impl Clipboard for RecordingClipboard {
    fn copy_text(&self, text: &str) -> Result<(), String> {
        if let Some(msg) = &self.failure {
            return Err(msg.clone());
        }
        let mut guard = self
            .last
            .lock()
            .map_err(|_| "Clipboard test backend lock poisoned".to_string())?;
        *guard = Some(text.to_string());
        Ok(())
    }
}
