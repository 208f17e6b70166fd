//! Theme command implementation.

use anyhow::Result;
use serde::Serialize;
use tracing::warn;

use geolog_core::PreferenceStatus;
use geolog_types::ThemeMode;

use super::{Context, print_json};
use crate::cli::ThemeAction;

#[derive(Debug, Serialize)]
struct ThemeReport {
    theme: ThemeMode,
    dark_mode: bool,
    persisted: bool,
}

pub async fn cmd_theme(ctx: &Context, action: ThemeAction) -> Result<()> {
    let prefs = ctx.preference_store();
    let current = prefs.load().await;

    let dark_mode = match action {
        ThemeAction::Show => current,
        ThemeAction::Toggle => !current,
        ThemeAction::Dark => true,
        ThemeAction::Light => false,
    };

    if action != ThemeAction::Show {
        prefs.save(dark_mode).await;
    }

    let status = prefs.status();
    if let PreferenceStatus::Degraded { reason } = &status {
        warn!("Dark mode preference is degraded: {}", reason);
    }
    let persisted = !status.is_degraded();

    let theme = ThemeMode::from_dark_mode(dark_mode);
    if ctx.json {
        return print_json(&ThemeReport {
            theme,
            dark_mode,
            persisted,
        });
    }

    let palette = ctx.palette_for(theme);
    println!("{}", palette.title(&theme.to_string()));
    Ok(())
}
