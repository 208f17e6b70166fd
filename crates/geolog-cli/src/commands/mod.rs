//! Command implementations for the CLI.

mod capture;
mod list;
mod status;
mod theme;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use serde::Serialize;

use geolog_core::PreferenceStore;
use geolog_store::Store;
use geolog_types::ThemeMode;

use crate::config::Config;
use crate::style::Palette;

pub use capture::cmd_capture;
pub use list::cmd_list;
pub use status::cmd_status;
pub use theme::cmd_theme;

/// Resolved settings shared by every command.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub config_path: PathBuf,
    pub database: PathBuf,
    pub preferences: PathBuf,
    pub json: bool,
    pub no_color: bool,
    pub quiet: bool,
}

impl Context {
    pub fn open_store(&self) -> Result<Store> {
        Store::open(&self.database)
            .with_context(|| format!("Failed to open database: {}", self.database.display()))
    }

    pub fn preference_store(&self) -> PreferenceStore {
        PreferenceStore::new(&self.preferences)
    }

    /// Palette for the persisted theme.
    pub async fn palette(&self) -> Palette {
        let dark_mode = self.preference_store().load().await;
        self.palette_for(ThemeMode::from_dark_mode(dark_mode))
    }

    pub fn palette_for(&self, theme: ThemeMode) -> Palette {
        Palette::new(theme, self.no_color)
    }
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", content)?;
    stdout.flush()?;
    Ok(())
}
