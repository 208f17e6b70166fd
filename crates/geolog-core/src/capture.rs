//! Location capture flow.
//!
//! One user trigger becomes one durable, displayed record:
//!
//! 1. Acquire the busy flag, or drop the trigger if a capture is in flight.
//! 2. Ensure location permission, prompting once if needed.
//! 3. Read the current position.
//! 4. Append it to the store.
//! 5. Prepend the stored record to the in-memory history.
//!
//! Any failure produces exactly one [`Alert`] and leaves the history as it was.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use geolog_store::Store;
use geolog_types::LocationRecord;

use crate::error::{CaptureError, Result};
use crate::events::{Alert, AppEvent, EventDispatcher};
use crate::guard::BusyGuard;
use crate::permission::PermissionGate;
use crate::traits::LocationProvider;

/// Result of one capture invocation.
#[derive(Debug)]
pub enum CaptureOutcome {
    /// A record was stored and prepended to history.
    Captured(LocationRecord),
    /// Another capture was in flight; this trigger was dropped.
    Skipped,
    /// The capture failed; nothing was written.
    Failed(CaptureError),
}

impl CaptureOutcome {
    /// The stored record, if the capture succeeded.
    pub fn record(&self) -> Option<&LocationRecord> {
        match self {
            Self::Captured(record) => Some(record),
            _ => None,
        }
    }

    /// The alert to show, if the capture failed.
    pub fn alert(&self) -> Option<Alert> {
        match self {
            Self::Failed(err) => Some(err.alert()),
            _ => None,
        }
    }

    /// Returns `true` if a record was stored.
    pub fn is_captured(&self) -> bool {
        matches!(self, Self::Captured(_))
    }
}

/// Orchestrates permission, position read, durable insert and history update.
///
/// The flow owns the store handle and is the only writer of the in-memory
/// history, which mirrors the store newest-first.
pub struct CaptureFlow {
    store: Mutex<Store>,
    provider: Arc<dyn LocationProvider>,
    gate: PermissionGate,
    history: RwLock<Vec<LocationRecord>>,
    busy: AtomicBool,
    events: EventDispatcher,
}

impl std::fmt::Debug for CaptureFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureFlow")
            .field("gate", &self.gate)
            .field("busy", &self.is_busy())
            .field("history_len", &self.history_len())
            .finish()
    }
}

impl CaptureFlow {
    /// Create a flow with its own event dispatcher.
    pub fn new(store: Store, provider: Arc<dyn LocationProvider>) -> Self {
        Self::with_events(store, provider, EventDispatcher::default())
    }

    /// Create a flow publishing to an existing dispatcher.
    pub fn with_events(
        store: Store,
        provider: Arc<dyn LocationProvider>,
        events: EventDispatcher,
    ) -> Self {
        let gate = PermissionGate::new(Arc::clone(&provider), events.clone());
        Self {
            store: Mutex::new(store),
            provider,
            gate,
            history: RwLock::new(Vec::new()),
            busy: AtomicBool::new(false),
            events,
        }
    }

    /// The permission gate used by this flow.
    pub fn gate(&self) -> &PermissionGate {
        &self.gate
    }

    /// The dispatcher this flow publishes to.
    pub fn events(&self) -> &EventDispatcher {
        &self.events
    }

    /// Whether a capture or history load is in progress.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Snapshot of the in-memory history, newest first.
    pub fn history(&self) -> Vec<LocationRecord> {
        self.history
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of records in the in-memory history.
    pub fn history_len(&self) -> usize {
        self.history
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Replace the in-memory history with the store's full contents.
    ///
    /// Holds the busy flag while loading. If a capture is in flight the load
    /// is skipped and the current length returned.
    pub async fn hydrate(&self) -> geolog_store::Result<usize> {
        let Some(_guard) = BusyGuard::try_acquire(&self.busy, &self.events) else {
            debug!("Skipping history load: flow is busy");
            return Ok(self.history_len());
        };

        let records = self.store.lock().await.list_all()?;
        let count = records.len();
        *self.history.write().unwrap_or_else(PoisonError::into_inner) = records;

        info!("Loaded {} locations", count);
        self.events.send(AppEvent::HistoryLoaded { count });
        Ok(count)
    }

    /// Capture the current location.
    ///
    /// A trigger arriving while another capture is in flight is dropped and
    /// reported as [`CaptureOutcome::Skipped`]; it is never queued.
    pub async fn capture(&self) -> CaptureOutcome {
        let Some(_guard) = BusyGuard::try_acquire(&self.busy, &self.events) else {
            debug!("Capture already in progress; ignoring trigger");
            return CaptureOutcome::Skipped;
        };

        match self.run_capture().await {
            Ok(record) => {
                self.history
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(0, record);
                info!(
                    "Captured location {} ({}, {})",
                    record.id, record.latitude, record.longitude
                );
                self.events.send(AppEvent::LocationCaptured { record });
                CaptureOutcome::Captured(record)
            }
            Err(err) => {
                match &err {
                    CaptureError::Provider(_) | CaptureError::StoreWrite(_) => {
                        error!("Failed to capture location: {}", err)
                    }
                    _ => warn!("Capture aborted: {}", err),
                }
                self.events.send(AppEvent::Alert { alert: err.alert() });
                CaptureOutcome::Failed(err)
            }
        }
    }

    async fn run_capture(&self) -> Result<LocationRecord> {
        self.gate.ensure_granted().await?;

        let fix = self
            .provider
            .current_position()
            .await?
            .ok_or(CaptureError::SensorUnavailable)?;
        debug!("Position fix: {}", fix);

        if !fix.is_finite() {
            return Err(CaptureError::InvalidCoordinates {
                latitude: fix.latitude,
                longitude: fix.longitude,
            });
        }

        let store = self.store.lock().await;
        Ok(store.append(fix.latitude, fix.longitude)?)
    }

    /// Read every record straight from the store, newest first.
    pub async fn stored_history(&self) -> geolog_store::Result<Vec<LocationRecord>> {
        self.store.lock().await.list_all()
    }
}
