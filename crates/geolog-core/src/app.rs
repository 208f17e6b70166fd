//! Application context.
//!
//! [`App`] owns the capture flow and the preference store and exposes the
//! two calls a presentation layer needs: "capture now" and "toggle dark
//! mode", plus a [`ViewState`] snapshot to render.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tracing::{info, warn};

use geolog_store::Store;
use geolog_types::{LocationRecord, PermissionState, ThemeMode};

use crate::capture::{CaptureFlow, CaptureOutcome};
use crate::events::{AppEvent, EventDispatcher, EventReceiver};
use crate::preferences::{PreferenceStatus, PreferenceStore};
use crate::traits::LocationProvider;

/// What happened during [`App::start`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartupReport {
    /// Dark-mode preference in effect after loading.
    pub dark_mode: bool,
    /// Records loaded into history.
    pub history_len: usize,
    /// Permission state after startup (and after the proactive prompt, if any).
    pub permission: PermissionState,
    /// Whether the proactive permission prompt was shown.
    pub prompted: bool,
    /// History load failure, if any. The history stays empty.
    pub history_error: Option<String>,
}

/// How [`App::start_with`] behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartOptions {
    /// Ask for location access when it has never been answered.
    pub prompt_permission: bool,
}

impl Default for StartOptions {
    fn default() -> Self {
        Self {
            prompt_permission: true,
        }
    }
}

/// Snapshot of everything the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    /// Persisted dark-mode flag.
    pub dark_mode: bool,
    /// Theme derived from `dark_mode`.
    pub theme: ThemeMode,
    /// Whether a capture or history load is in flight.
    pub busy: bool,
    /// Captured records, newest first.
    pub history: Vec<LocationRecord>,
}

/// Process-wide application state.
#[derive(Debug)]
pub struct App {
    flow: CaptureFlow,
    preferences: PreferenceStore,
    dark_mode: AtomicBool,
    events: EventDispatcher,
}

impl App {
    /// Wire an app from its collaborators. Call [`start`](Self::start) next.
    pub fn new(
        store: Store,
        provider: Arc<dyn LocationProvider>,
        preferences: PreferenceStore,
    ) -> Self {
        let events = EventDispatcher::default();
        Self {
            flow: CaptureFlow::with_events(store, provider, events.clone()),
            preferences,
            dark_mode: AtomicBool::new(false),
            events,
        }
    }

    /// Load the preference, hydrate history and settle permission.
    ///
    /// The permission prompt is shown here at most once, and only when the
    /// user has never answered it. Failures are logged and reported, never
    /// fatal.
    pub async fn start(&self) -> StartupReport {
        self.start_with(StartOptions::default()).await
    }

    /// Like [`start`](Self::start), with control over the proactive prompt.
    ///
    /// Callers about to capture should pass `prompt_permission: false`; the
    /// capture asks on its own if access is missing.
    pub async fn start_with(&self, options: StartOptions) -> StartupReport {
        let dark_mode = self.preferences.load().await;
        self.dark_mode.store(dark_mode, Ordering::Release);
        self.report_degraded();

        let (history_len, history_error) = match self.flow.hydrate().await {
            Ok(count) => (count, None),
            Err(e) => {
                warn!("Failed to load location history: {}", e);
                (0, Some(e.to_string()))
            }
        };

        let gate = self.flow.gate();
        let mut permission = gate.refresh().await;
        let mut prompted = false;
        if options.prompt_permission && permission.is_undetermined() {
            prompted = true;
            match gate.request_permission().await {
                Ok(state) => permission = state,
                Err(e) => warn!("Permission prompt failed: {}", e),
            }
        }

        info!(
            "Started: {} locations, permission {}, {} theme",
            history_len,
            permission,
            ThemeMode::from_dark_mode(dark_mode)
        );

        StartupReport {
            dark_mode,
            history_len,
            permission,
            prompted,
            history_error,
        }
    }

    /// Capture the current location.
    pub async fn capture(&self) -> CaptureOutcome {
        self.flow.capture().await
    }

    /// Flip the dark-mode preference and persist it. Returns the new value.
    pub async fn toggle_dark_mode(&self) -> bool {
        let value = !self.dark_mode.fetch_xor(true, Ordering::AcqRel);
        self.apply_dark_mode(value).await;
        value
    }

    /// Set the dark-mode preference and persist it.
    pub async fn set_dark_mode(&self, value: bool) {
        self.dark_mode.store(value, Ordering::Release);
        self.apply_dark_mode(value).await;
    }

    async fn apply_dark_mode(&self, value: bool) {
        self.events.send(AppEvent::ThemeChanged { dark_mode: value });
        self.preferences.save(value).await;
        self.report_degraded();
    }

    fn report_degraded(&self) {
        if let PreferenceStatus::Degraded { reason } = self.preferences.status() {
            self.events.send(AppEvent::PreferenceDegraded { reason });
        }
    }

    /// Current dark-mode preference.
    pub fn dark_mode(&self) -> bool {
        self.dark_mode.load(Ordering::Acquire)
    }

    /// Current theme.
    pub fn theme(&self) -> ThemeMode {
        ThemeMode::from_dark_mode(self.dark_mode())
    }

    /// Snapshot of the current theme, busy flag and history.
    pub fn view(&self) -> ViewState {
        let dark_mode = self.dark_mode();
        ViewState {
            dark_mode,
            theme: ThemeMode::from_dark_mode(dark_mode),
            busy: self.flow.is_busy(),
            history: self.flow.history(),
        }
    }

    /// Subscribe to application events.
    pub fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }

    /// The capture flow owned by this app.
    pub fn flow(&self) -> &CaptureFlow {
        &self.flow
    }

    /// The preference store owned by this app.
    pub fn preferences(&self) -> &PreferenceStore {
        &self.preferences
    }

    /// Last-known permission state.
    pub fn permission(&self) -> PermissionState {
        self.flow.gate().current_status()
    }
}
