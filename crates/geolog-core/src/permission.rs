//! Permission gate for location access.
//!
//! Tracks the last-known [`PermissionState`] for the process. The state is
//! read once at startup ([`PermissionGate::refresh`]) and afterwards changes
//! only through an explicit prompt ([`PermissionGate::request_permission`]).

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info};

use geolog_types::PermissionState;

use crate::error::{CaptureError, ProviderError};
use crate::events::{AppEvent, EventDispatcher};
use crate::traits::LocationProvider;

/// Cached location-access authorization.
pub struct PermissionGate {
    provider: Arc<dyn LocationProvider>,
    state: RwLock<PermissionState>,
    events: EventDispatcher,
}

impl std::fmt::Debug for PermissionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionGate")
            .field("state", &self.current_status())
            .finish()
    }
}

impl PermissionGate {
    /// Create a gate. The cached state starts as `Undetermined` until
    /// [`refresh`](Self::refresh) is called.
    pub fn new(provider: Arc<dyn LocationProvider>, events: EventDispatcher) -> Self {
        Self {
            provider,
            state: RwLock::new(PermissionState::Undetermined),
            events,
        }
    }

    /// Read the provider's current status into the cache. Never prompts.
    pub async fn refresh(&self) -> PermissionState {
        let state = self.provider.permission_status().await;
        debug!("Permission status at startup: {}", state);
        self.set(state);
        state
    }

    /// Last-known status, without prompting.
    pub fn current_status(&self) -> PermissionState {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Prompt the user once and cache the answer.
    pub async fn request_permission(&self) -> Result<PermissionState, ProviderError> {
        info!("Requesting location permission");
        let state = self.provider.request_permission().await?;
        info!("Location permission {}", state);
        self.set(state);
        self.events.send(AppEvent::PermissionChanged { state });
        Ok(state)
    }

    /// Succeed if access is granted, prompting once when it is not.
    pub async fn ensure_granted(&self) -> Result<(), CaptureError> {
        if self.current_status().is_granted() {
            return Ok(());
        }

        if self.request_permission().await?.is_granted() {
            Ok(())
        } else {
            Err(CaptureError::PermissionDenied)
        }
    }

    fn set(&self, state: PermissionState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockLocationProvider;

    fn gate_with(mock: &Arc<MockLocationProvider>) -> PermissionGate {
        let provider: Arc<dyn LocationProvider> = mock.clone();
        PermissionGate::new(provider, EventDispatcher::default())
    }

    #[tokio::test]
    async fn test_current_status_does_not_prompt() {
        let mock = Arc::new(MockLocationProvider::new());
        let gate = gate_with(&mock);

        assert_eq!(gate.current_status(), PermissionState::Undetermined);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_refresh_reads_provider_state() {
        let mock = Arc::new(
            MockLocationProvider::builder()
                .permission(PermissionState::Granted)
                .build(),
        );
        let gate = gate_with(&mock);

        assert_eq!(gate.refresh().await, PermissionState::Granted);
        assert_eq!(gate.current_status(), PermissionState::Granted);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_ensure_granted_skips_prompt_when_granted() {
        let mock = Arc::new(
            MockLocationProvider::builder()
                .permission(PermissionState::Granted)
                .build(),
        );
        let gate = gate_with(&mock);
        gate.refresh().await;

        gate.ensure_granted().await.unwrap();
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_ensure_granted_denied_twice() {
        let mock = Arc::new(
            MockLocationProvider::builder()
                .permission(PermissionState::Denied)
                .prompt_answer(PermissionState::Denied)
                .build(),
        );
        let gate = gate_with(&mock);
        gate.refresh().await;

        let err = gate.ensure_granted().await.unwrap_err();
        assert!(matches!(err, CaptureError::PermissionDenied));
        assert_eq!(mock.request_count(), 1);
        assert_eq!(gate.current_status(), PermissionState::Denied);
    }

    #[tokio::test]
    async fn test_request_emits_permission_changed() {
        let mock = Arc::new(MockLocationProvider::new());
        let provider: Arc<dyn LocationProvider> = mock.clone();
        let events = EventDispatcher::default();
        let mut rx = events.subscribe();
        let gate = PermissionGate::new(provider, events);

        assert_eq!(
            gate.request_permission().await.unwrap(),
            PermissionState::Granted
        );
        assert!(matches!(
            rx.try_recv().unwrap(),
            AppEvent::PermissionChanged {
                state: PermissionState::Granted
            }
        ));
    }
}
