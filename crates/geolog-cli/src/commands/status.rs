//! Status command implementation.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use serde::Serialize;

use geolog_core::PreferenceStatus;
use geolog_types::{PermissionState, ThemeMode};

use super::{Context, print_json};

#[derive(Debug, Serialize)]
struct StatusReport {
    database: PathBuf,
    locations: u64,
    preferences: PathBuf,
    preference_status: PreferenceStatus,
    theme: ThemeMode,
    permission: PermissionState,
    config: PathBuf,
}

pub async fn cmd_status(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let locations = store.count().context("Failed to count locations")?;

    let prefs = ctx.preference_store();
    let dark_mode = prefs.load().await;

    let report = StatusReport {
        database: ctx.database.clone(),
        locations,
        preferences: ctx.preferences.clone(),
        preference_status: prefs.status(),
        theme: ThemeMode::from_dark_mode(dark_mode),
        permission: ctx.config.permission.unwrap_or_default(),
        config: ctx.config_path.clone(),
    };

    if ctx.json {
        return print_json(&report);
    }

    let palette = ctx.palette_for(report.theme);
    let preference_line = match &report.preference_status {
        PreferenceStatus::Healthy => palette.success("ok"),
        PreferenceStatus::Degraded { reason } => palette.error(&format!("degraded ({})", reason)),
    };

    println!("{}", palette.title("geolog status"));
    println!("  Database:    {}", report.database.display());
    println!("  Locations:   {}", report.locations);
    println!("  Preferences: {} [{}]", report.preferences.display(), preference_line);
    println!("  Theme:       {}", report.theme);
    println!("  Permission:  {}", report.permission);
    println!("  Config:      {}", report.config.display());
    Ok(())
}
