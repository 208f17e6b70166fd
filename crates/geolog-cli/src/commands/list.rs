//! List command implementation.

use anyhow::{Context as _, Result};

use super::{Context, print_json};

pub async fn cmd_list(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;

    if ctx.json {
        let stored = store.list_stored().context("Failed to read locations")?;
        return print_json(&stored);
    }

    let records = store.list_all().context("Failed to read locations")?;

    if records.is_empty() {
        if !ctx.quiet {
            println!("No locations captured yet.");
        }
        return Ok(());
    }

    let palette = ctx.palette().await;
    let entries: Vec<String> = records.iter().map(|r| palette.record(r)).collect();
    println!("{}", entries.join("\n\n"));
    Ok(())
}
