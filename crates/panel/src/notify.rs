//! User-facing notifications.
//!
//! Responsibilities:
//! - Carry success/failure messages out of the controller.
//! - Forward them into an mpsc channel for a front end, or into tracing.
//!
//! Invariants:
//! - Notification delivery never fails an operation; a closed channel is logged and ignored.

use futures::future::BoxFuture;
use tokio::sync::mpsc::Sender;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice) -> BoxFuture<'_, ()>;
}

/// Sends every notice into a channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: Sender<Notice>,
}

impl ChannelNotifier {
    pub fn new(tx: Sender<Notice>) -> Self {
        Self { tx }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: Notice) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            if let Err(e) = self.tx.send(notice).await {
                tracing::warn!(message = %e.0.message, "Notice dropped, receiver closed");
            }
        })
    }
}

/// Logs every notice at a level matching its severity.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            match notice.level {
                NoticeLevel::Info | NoticeLevel::Success => tracing::info!("{}", notice.message),
                NoticeLevel::Warning => tracing::warn!("{}", notice.message),
                NoticeLevel::Error => tracing::error!("{}", notice.message),
            }
        })
    }
}
