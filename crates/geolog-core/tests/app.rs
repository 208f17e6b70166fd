//! Startup, preference and view tests for the application context.

use std::sync::Arc;

use geolog_core::{
    App, AppEvent, CaptureError, CaptureOutcome, LocationProvider, MockLocationProvider,
    PreferenceStatus, PreferenceStore, StartOptions,
};
use geolog_store::Store;
use geolog_types::{PermissionState, ThemeMode};

fn app(mock: &Arc<MockLocationProvider>, store: Store, prefs: PreferenceStore) -> App {
    let provider: Arc<dyn LocationProvider> = mock.clone();
    App::new(store, provider, prefs)
}

#[tokio::test]
async fn test_start_prompts_when_undetermined() {
    let dir = tempfile::tempdir().unwrap();
    let mock = Arc::new(MockLocationProvider::new());
    let app = app(
        &mock,
        Store::open_in_memory().unwrap(),
        PreferenceStore::new(dir.path().join("preferences.json")),
    );

    let report = app.start().await;

    assert!(report.prompted);
    assert_eq!(report.permission, PermissionState::Granted);
    assert_eq!(app.permission(), PermissionState::Granted);
    assert_eq!(mock.request_count(), 1);
    assert!(!report.dark_mode);
    assert_eq!(report.history_len, 0);
    assert!(report.history_error.is_none());
}

#[tokio::test]
async fn test_capture_startup_prompts_only_once() {
    let dir = tempfile::tempdir().unwrap();
    let mock = Arc::new(
        MockLocationProvider::builder()
            .prompt_answer(PermissionState::Denied)
            .position(1.0, 2.0)
            .build(),
    );
    let app = app(
        &mock,
        Store::open_in_memory().unwrap(),
        PreferenceStore::new(dir.path().join("preferences.json")),
    );

    let report = app
        .start_with(StartOptions {
            prompt_permission: false,
        })
        .await;
    assert!(!report.prompted);
    assert_eq!(report.permission, PermissionState::Undetermined);
    assert_eq!(mock.request_count(), 0);

    let outcome = app.capture().await;
    assert!(matches!(
        outcome,
        CaptureOutcome::Failed(CaptureError::PermissionDenied)
    ));
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn test_start_does_not_prompt_after_an_answer() {
    let dir = tempfile::tempdir().unwrap();
    for state in [PermissionState::Granted, PermissionState::Denied] {
        let mock = Arc::new(MockLocationProvider::builder().permission(state).build());
        let app = app(
            &mock,
            Store::open_in_memory().unwrap(),
            PreferenceStore::new(dir.path().join("preferences.json")),
        );

        let report = app.start().await;
        assert!(!report.prompted);
        assert_eq!(report.permission, state);
        assert_eq!(mock.request_count(), 0);
    }
}

#[tokio::test]
async fn test_start_hydrates_existing_history() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("locations.sqlite");
    {
        let store = Store::open(&db).unwrap();
        store.append(37.7749, -122.4194).unwrap();
        store.append(40.7128, -74.0060).unwrap();
    }

    let mock = Arc::new(
        MockLocationProvider::builder()
            .permission(PermissionState::Granted)
            .build(),
    );
    let app = app(
        &mock,
        Store::open(&db).unwrap(),
        PreferenceStore::new(dir.path().join("preferences.json")),
    );

    let report = app.start().await;
    assert_eq!(report.history_len, 2);

    let view = app.view();
    assert_eq!(view.history.len(), 2);
    assert_eq!(view.history[0].id, 2);
    assert_eq!(view.history[1].id, 1);
}

#[tokio::test]
async fn test_dark_mode_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = dir.path().join("preferences.json");
    let mock = Arc::new(MockLocationProvider::new());

    let first = app(
        &mock,
        Store::open_in_memory().unwrap(),
        PreferenceStore::new(&prefs),
    );
    assert!(!first.start().await.dark_mode);
    assert!(first.toggle_dark_mode().await);
    drop(first);

    let second = app(
        &mock,
        Store::open_in_memory().unwrap(),
        PreferenceStore::new(&prefs),
    );
    let report = second.start().await;
    assert!(report.dark_mode);
    assert_eq!(second.view().theme, ThemeMode::Dark);
}

#[tokio::test]
async fn test_toggle_back_to_light_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = dir.path().join("preferences.json");
    let mock = Arc::new(MockLocationProvider::new());

    let first = app(
        &mock,
        Store::open_in_memory().unwrap(),
        PreferenceStore::new(&prefs),
    );
    first.start().await;
    first.set_dark_mode(true).await;
    assert!(!first.toggle_dark_mode().await);
    drop(first);

    let second = app(
        &mock,
        Store::open_in_memory().unwrap(),
        PreferenceStore::new(&prefs),
    );
    assert!(!second.start().await.dark_mode);
}

#[tokio::test]
async fn test_unwritable_preference_is_observable() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let mock = Arc::new(MockLocationProvider::new());
    let app = app(
        &mock,
        Store::open_in_memory().unwrap(),
        PreferenceStore::new(blocker.join("preferences.json")),
    );
    app.start().await;
    let mut rx = app.subscribe();

    // The toggle still takes effect for this session
    assert!(app.toggle_dark_mode().await);
    assert!(app.view().dark_mode);
    assert!(app.preferences().status().is_degraded());

    let mut saw_degraded = false;
    while let Ok(event) = rx.try_recv() {
        if matches!(event, AppEvent::PreferenceDegraded { .. }) {
            saw_degraded = true;
        }
    }
    assert!(saw_degraded);
}

#[tokio::test]
async fn test_corrupt_preference_starts_light() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = dir.path().join("preferences.json");
    std::fs::write(&prefs, "{{{").unwrap();

    let mock = Arc::new(MockLocationProvider::new());
    let app = app(
        &mock,
        Store::open_in_memory().unwrap(),
        PreferenceStore::new(&prefs),
    );

    assert!(!app.start().await.dark_mode);
    assert!(matches!(
        app.preferences().status(),
        PreferenceStatus::Degraded { .. }
    ));
}
