//! Transient user notices.
//!
//! A [`NotificationCenter`] keeps the visible toasts and schedules each one's
//! auto-dismiss on a [`Scheduler`]. Dismissing a toast by hand cancels its task.

use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::schedule::Scheduler;

pub const DEFAULT_DURATION: Duration = Duration::from_millis(4000);
pub const ERROR_DURATION: Duration = Duration::from_millis(5000);

pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";
pub const NETWORK_ERROR_MESSAGE: &str = "Problem connecting to the server.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Error => write!(f, "error"),
            NotificationKind::Warning => write!(f, "warning"),
            NotificationKind::Info => write!(f, "info"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    /// Zero keeps the notice until it is dismissed.
    #[serde(rename = "durationMs", serialize_with = "as_millis")]
    pub duration: Duration,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            duration: DEFAULT_DURATION,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message)
    }

    /// Shown when a handler fails unexpectedly.
    pub fn generic_error() -> Self {
        Self::error(GENERIC_ERROR_MESSAGE).with_duration(ERROR_DURATION)
    }

    pub fn network_error() -> Self {
        Self::error(NETWORK_ERROR_MESSAGE).with_duration(ERROR_DURATION)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_sticky(&self) -> bool {
        self.duration.is_zero()
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

fn as_millis<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

/// Visible notifications with scheduled auto-dismiss.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    next_id: u64,
    visible: Vec<(u64, Notification)>,
    dismissals: Scheduler<u64, ()>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a notice and return its id.
    pub fn show(&mut self, notification: Notification) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        if !notification.is_sticky() {
            self.dismissals.schedule(id, notification.duration, ());
        }
        self.visible.push((id, notification));
        id
    }

    /// Remove a notice before its timer fires. Returns `false` if it was not shown.
    pub fn dismiss(&mut self, id: u64) -> bool {
        self.dismissals.cancel(&id);
        let before = self.visible.len();
        self.visible.retain(|(shown, _)| *shown != id);
        self.visible.len() != before
    }

    /// Move time forward, dropping notices whose timers fired.
    pub fn advance(&mut self, by: Duration) -> Vec<Notification> {
        let mut expired = Vec::new();
        for (id, ()) in self.dismissals.advance(by) {
            if let Some(index) = self.visible.iter().position(|(shown, _)| *shown == id) {
                expired.push(self.visible.remove(index).1);
            }
        }
        expired
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter().map(|(_, n)| n)
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}
