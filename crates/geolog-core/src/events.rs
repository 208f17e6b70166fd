//! Application event system.
//!
//! State changes the presentation layer renders (busy flag, history, theme,
//! alerts) are published here instead of being coupled to any particular
//! rendering mechanism.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use geolog_types::{LocationRecord, PermissionState};

/// Category of a user-visible alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// The user declined location access.
    PermissionDenied,
    /// No position could be obtained.
    LocationUnavailable,
    /// Any other capture failure.
    CaptureFailed,
}

impl AlertKind {
    /// Message shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            AlertKind::PermissionDenied => "Location permission denied.",
            AlertKind::LocationUnavailable => "Unable to obtain the current location.",
            AlertKind::CaptureFailed => "Failed to capture location.",
        }
    }
}

/// A user-visible alert. At most one per capture invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Alert category.
    pub kind: AlertKind,
    /// Message shown to the user.
    pub message: String,
}

impl Alert {
    /// Create an alert with the standard message for `kind`.
    pub fn new(kind: AlertKind) -> Self {
        Self {
            kind,
            message: kind.message().to_string(),
        }
    }
}

/// Events emitted by the application core.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new event types
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum AppEvent {
    /// The busy flag was set or cleared.
    BusyChanged { busy: bool },
    /// History was loaded from the store.
    HistoryLoaded { count: usize },
    /// A new record was stored and prepended to history.
    LocationCaptured { record: LocationRecord },
    /// Something the user must be told about.
    Alert { alert: Alert },
    /// Permission state changed after a prompt.
    PermissionChanged { state: PermissionState },
    /// The dark-mode preference was toggled.
    ThemeChanged { dark_mode: bool },
    /// Preference persistence failed; the in-memory value is still in effect.
    PreferenceDegraded { reason: String },
}

/// Sender for application events.
pub type EventSender = broadcast::Sender<AppEvent>;

/// Receiver for application events.
pub type EventReceiver = broadcast::Receiver<AppEvent>;

/// Event dispatcher for sending events to multiple receivers.
#[derive(Debug, Clone)]
pub struct EventDispatcher {
    sender: EventSender,
}

impl EventDispatcher {
    /// Create a new event dispatcher.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events.
    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    /// Send an event.
    pub fn send(&self, event: AppEvent) {
        // Ignore error if no receivers
        let _ = self.sender.send(event);
    }

    /// Get the number of active receivers.
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new(100)
    }
}
