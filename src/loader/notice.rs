//! Transient user-facing notices (the dashboard's toasts).
//!
//! Notices are fire-and-forget: a full or closed channel drops the notice
//! and logs it at debug level.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    /// Backend unavailable; sample data is on screen.
    Demo,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, title: title.into(), description: description.into() }
    }

    /// "Demo Mode" notice with a panel-specific description.
    pub fn demo(description: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Demo, title: "Demo Mode".to_owned(), description: description.into() }
    }

    /// "Error" notice, e.g. for a failed backend health check.
    pub fn error(description: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, title: "Error".to_owned(), description: description.into() }
    }
}

/// Sending half of the notice channel. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Notices {
    tx: mpsc::Sender<Notice>,
}

impl Notices {
    /// Create a bounded notice channel.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Notice>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    pub fn push(&self, notice: Notice) {
        match self.tx.try_send(notice) {
            Ok(()) => {}
            Err(TrySendError::Full(notice)) => {
                debug!(title = %notice.title, "notice queue full; dropping notice");
            }
            Err(TrySendError::Closed(notice)) => {
                debug!(title = %notice.title, "notice queue closed; dropping notice");
            }
        }
    }
}
