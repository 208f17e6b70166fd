//! Mock location provider for testing.
//!
//! [`MockLocationProvider`] implements [`LocationProvider`] without any
//! platform service, so capture logic can be exercised in unit tests.
//!
//! # Features
//!
//! - **Scripted permissions**: initial state and the answer given to prompts
//! - **Scripted positions**: a queue of fixes (or "no fix") consumed in order,
//!   falling back to a fixed position
//! - **Failure injection**: make every call fail with a provider error
//! - **Latency simulation**: add artificial delays to prompts and reads

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use geolog_types::{Coordinates, PermissionState};

use crate::error::ProviderError;
use crate::traits::LocationProvider;

/// A mock location provider for testing.
///
/// # Example
///
/// ```
/// use geolog_core::{LocationProvider, MockLocationProvider};
/// use geolog_types::PermissionState;
///
/// #[tokio::main]
/// async fn main() {
///     let provider = MockLocationProvider::builder()
///         .permission(PermissionState::Granted)
///         .position(37.7749, -122.4194)
///         .build();
///
///     let fix = provider.current_position().await.unwrap().unwrap();
///     assert_eq!(fix.latitude, 37.7749);
/// }
/// ```
pub struct MockLocationProvider {
    permission: RwLock<PermissionState>,
    prompt_answer: RwLock<PermissionState>,
    queued: Mutex<VecDeque<Option<Coordinates>>>,
    position: RwLock<Option<Coordinates>>,
    should_fail: AtomicBool,
    fail_message: RwLock<String>,
    /// Simulated latency in milliseconds (0 = no delay).
    latency_ms: AtomicU64,
    request_count: AtomicU32,
    read_count: AtomicU32,
}

impl std::fmt::Debug for MockLocationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockLocationProvider")
            .field("request_count", &self.request_count())
            .field("read_count", &self.read_count())
            .finish()
    }
}

impl Default for MockLocationProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLocationProvider {
    /// Create a provider that is `Undetermined`, grants when prompted and
    /// has no fix.
    pub fn new() -> Self {
        Self {
            permission: RwLock::new(PermissionState::Undetermined),
            prompt_answer: RwLock::new(PermissionState::Granted),
            queued: Mutex::new(VecDeque::new()),
            position: RwLock::new(None),
            should_fail: AtomicBool::new(false),
            fail_message: RwLock::new("Mock failure".to_string()),
            latency_ms: AtomicU64::new(0),
            request_count: AtomicU32::new(0),
            read_count: AtomicU32::new(0),
        }
    }

    /// Create a builder.
    pub fn builder() -> MockLocationProviderBuilder {
        MockLocationProviderBuilder::new()
    }

    // --- Test control methods ---

    /// Set the current permission state (as if changed in system settings).
    pub async fn set_permission(&self, state: PermissionState) {
        *self.permission.write().await = state;
    }

    /// Set the answer the next prompts will give.
    pub async fn set_prompt_answer(&self, state: PermissionState) {
        *self.prompt_answer.write().await = state;
    }

    /// Set the fallback position returned when the queue is empty.
    pub async fn set_position(&self, position: Option<Coordinates>) {
        *self.position.write().await = position;
    }

    /// Queue a position (or `None` for "no fix") for the next read.
    pub async fn push_position(&self, position: Option<Coordinates>) {
        self.queued.lock().await.push_back(position);
    }

    /// Make every call fail with [`ProviderError::ServiceUnavailable`].
    pub async fn set_should_fail(&self, fail: bool, message: Option<&str>) {
        self.should_fail.store(fail, Ordering::Relaxed);
        if let Some(msg) = message {
            *self.fail_message.write().await = msg.to_string();
        }
    }

    /// Set simulated latency for prompts and reads.
    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms
            .store(latency.as_millis() as u64, Ordering::Relaxed);
    }

    /// Number of permission prompts shown.
    pub fn request_count(&self) -> u32 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Number of position reads performed.
    pub fn read_count(&self) -> u32 {
        self.read_count.load(Ordering::Relaxed)
    }

    async fn simulate(&self) -> Result<(), ProviderError> {
        let latency = self.latency_ms.load(Ordering::Relaxed);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }

        if self.should_fail.load(Ordering::Relaxed) {
            Err(ProviderError::ServiceUnavailable(
                self.fail_message.read().await.clone(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl LocationProvider for MockLocationProvider {
    async fn permission_status(&self) -> PermissionState {
        *self.permission.read().await
    }

    async fn request_permission(&self) -> Result<PermissionState, ProviderError> {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        self.simulate().await?;

        let answer = *self.prompt_answer.read().await;
        *self.permission.write().await = answer;
        Ok(answer)
    }

    async fn current_position(&self) -> Result<Option<Coordinates>, ProviderError> {
        self.read_count.fetch_add(1, Ordering::Relaxed);
        self.simulate().await?;

        if !self.permission.read().await.is_granted() {
            return Err(ProviderError::ServiceUnavailable(
                "location permission not granted".to_string(),
            ));
        }

        if let Some(next) = self.queued.lock().await.pop_front() {
            return Ok(next);
        }
        Ok(*self.position.read().await)
    }
}

/// Builder for [`MockLocationProvider`].
#[derive(Debug, Clone)]
pub struct MockLocationProviderBuilder {
    permission: PermissionState,
    prompt_answer: PermissionState,
    queued: Vec<Option<Coordinates>>,
    position: Option<Coordinates>,
    latency: Duration,
    should_fail: bool,
}

impl Default for MockLocationProviderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLocationProviderBuilder {
    /// Create a builder with the same defaults as [`MockLocationProvider::new`].
    pub fn new() -> Self {
        Self {
            permission: PermissionState::Undetermined,
            prompt_answer: PermissionState::Granted,
            queued: Vec::new(),
            position: None,
            latency: Duration::ZERO,
            should_fail: false,
        }
    }

    /// Initial permission state.
    pub fn permission(mut self, state: PermissionState) -> Self {
        self.permission = state;
        self
    }

    /// Answer given to every prompt.
    pub fn prompt_answer(mut self, state: PermissionState) -> Self {
        self.prompt_answer = state;
        self
    }

    /// Fixed position returned once the queue is empty.
    pub fn position(mut self, latitude: f64, longitude: f64) -> Self {
        self.position = Some(Coordinates::new(latitude, longitude));
        self
    }

    /// Positions returned in order before falling back to the fixed one.
    pub fn positions(mut self, positions: impl IntoIterator<Item = Option<Coordinates>>) -> Self {
        self.queued.extend(positions);
        self
    }

    /// Simulated latency for prompts and reads.
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Fail every call.
    pub fn should_fail(mut self, fail: bool) -> Self {
        self.should_fail = fail;
        self
    }

    /// Build the provider.
    pub fn build(self) -> MockLocationProvider {
        MockLocationProvider {
            permission: RwLock::new(self.permission),
            prompt_answer: RwLock::new(self.prompt_answer),
            queued: Mutex::new(self.queued.into_iter().collect()),
            position: RwLock::new(self.position),
            should_fail: AtomicBool::new(self.should_fail),
            fail_message: RwLock::new("Mock failure".to_string()),
            latency_ms: AtomicU64::new(self.latency.as_millis() as u64),
            request_count: AtomicU32::new(0),
            read_count: AtomicU32::new(0),
        }
    }
}
