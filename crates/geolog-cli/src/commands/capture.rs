//! Capture command implementation.

use std::sync::Arc;

use anyhow::{Result, bail};
use tracing::debug;

use geolog_core::{App, CaptureOutcome, LocationProvider, StartOptions};
use geolog_types::Coordinates;

use super::{Context, print_json};
use crate::provider::{PromptMode, TerminalLocationProvider};

pub async fn cmd_capture(
    ctx: &Context,
    fix: Option<Coordinates>,
    assume_yes: bool,
) -> Result<()> {
    let provider: Arc<dyn LocationProvider> = Arc::new(TerminalLocationProvider::new(
        ctx.config_path.clone(),
        &ctx.config,
        fix,
        PromptMode::detect(assume_yes),
    ));

    let app = App::new(ctx.open_store()?, provider, ctx.preference_store());
    // The capture itself asks for access when needed
    let report = app
        .start_with(StartOptions {
            prompt_permission: false,
        })
        .await;
    debug!("Startup: {:?}", report);

    let record = match app.capture().await {
        CaptureOutcome::Captured(record) => record,
        CaptureOutcome::Failed(err) => {
            debug!("Capture failed: {}", err);
            bail!("{}", err.alert().message);
        }
        CaptureOutcome::Skipped => bail!("A capture is already in progress"),
    };

    if ctx.json {
        return print_json(&record);
    }

    let palette = ctx.palette_for(app.theme());
    if !ctx.quiet {
        eprintln!("{}", palette.success("Location saved."));
    }
    println!("{}", palette.record(&record));
    Ok(())
}
