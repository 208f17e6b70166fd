//! Terminal-backed location provider.
//!
//! A terminal has no positioning hardware, so the fix comes from the command
//! line or the config file. The permission prompt is a yes/no question on
//! stdin, and the answer is remembered in the config file.

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use dialoguer::Confirm;
use dialoguer::theme::ColorfulTheme;
use rand::Rng;
use tracing::{debug, warn};

use geolog_core::{LocationProvider, ProviderError};
use geolog_types::{Coordinates, PermissionState};

use crate::config::{self, Config};

/// How the permission prompt is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    /// Ask on the terminal.
    Interactive,
    /// Grant without asking (`--yes`).
    AssumeYes,
    /// No terminal to ask on; the request is denied.
    Unattended,
}

impl PromptMode {
    /// Pick the mode for this process.
    pub fn detect(assume_yes: bool) -> Self {
        if assume_yes {
            Self::AssumeYes
        } else if io::stdin().is_terminal() && io::stderr().is_terminal() {
            Self::Interactive
        } else {
            Self::Unattended
        }
    }
}

#[derive(Debug)]
pub struct TerminalLocationProvider {
    config_path: PathBuf,
    permission: Mutex<PermissionState>,
    fix: Option<Coordinates>,
    jitter: f64,
    prompt: PromptMode,
}

impl TerminalLocationProvider {
    pub fn new(
        config_path: PathBuf,
        config: &Config,
        fix: Option<Coordinates>,
        prompt: PromptMode,
    ) -> Self {
        Self {
            config_path,
            permission: Mutex::new(config.permission.unwrap_or_default()),
            fix: fix.or_else(|| config.location.fix()),
            jitter: config.location.jitter.abs(),
            prompt,
        }
    }

    fn apply_jitter(&self, fix: Coordinates) -> Coordinates {
        if !self.jitter.is_finite() || self.jitter <= 0.0 {
            return fix;
        }
        let mut rng = rand::rng();
        Coordinates::new(
            fix.latitude + rng.random_range(-self.jitter..=self.jitter),
            fix.longitude + rng.random_range(-self.jitter..=self.jitter),
        )
    }
}

fn confirm_access() -> Result<PermissionState, ProviderError> {
    let granted = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Allow geolog to access your location?")
        .default(false)
        .interact()
        .map_err(|e| ProviderError::PromptFailed(e.to_string()))?;

    Ok(if granted {
        PermissionState::Granted
    } else {
        PermissionState::Denied
    })
}

#[async_trait]
impl LocationProvider for TerminalLocationProvider {
    async fn permission_status(&self) -> PermissionState {
        *self.permission.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn request_permission(&self) -> Result<PermissionState, ProviderError> {
        let state = match self.prompt {
            PromptMode::AssumeYes => PermissionState::Granted,
            PromptMode::Unattended => {
                warn!("No terminal to ask for location permission; pass --yes to grant it");
                PermissionState::Denied
            }
            PromptMode::Interactive => tokio::task::spawn_blocking(confirm_access)
                .await
                .map_err(|e| ProviderError::PromptFailed(e.to_string()))??,
        };

        *self.permission.lock().unwrap_or_else(PoisonError::into_inner) = state;
        if let Err(e) = config::update_permission(&self.config_path, state) {
            warn!("Failed to remember permission answer: {:#}", e);
        }
        Ok(state)
    }

    async fn current_position(&self) -> Result<Option<Coordinates>, ProviderError> {
        if !self.permission_status().await.is_granted() {
            return Err(ProviderError::ServiceUnavailable(
                "location permission not granted".to_string(),
            ));
        }
        let fix = self.fix.map(|fix| self.apply_jitter(fix));
        debug!("Terminal fix: {:?}", fix);
        Ok(fix)
    }
}
