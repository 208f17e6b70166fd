mod cli;
mod commands;
mod config;
mod provider;
mod style;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use geolog_types::Coordinates;

use cli::{Cli, Commands, ThemeAction};
use commands::Context;
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let (config, config_problem) = Config::load_checked(&config_path);
    let no_color = cli.no_color || config.no_color;

    // When quiet mode is enabled, suppress info-level logging
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .init();

    if let Some(problem) = config_problem {
        tracing::warn!("{}", problem);
    }

    let ctx = Context {
        database: config.database_path(cli.database.as_deref()),
        preferences: config.preferences_path(),
        no_color,
        json: cli.json,
        quiet: cli.quiet,
        config_path,
        config,
    };
    tracing::debug!("Resolved context: {:?}", ctx);

    match cli.command {
        Commands::Capture { lat, lon, yes } => {
            let fix = lat.zip(lon).map(|(lat, lon)| Coordinates::new(lat, lon));
            commands::cmd_capture(&ctx, fix, yes).await
        }
        Commands::List => commands::cmd_list(&ctx).await,
        Commands::Theme { action } => {
            commands::cmd_theme(&ctx, action.unwrap_or(ThemeAction::Show)).await
        }
        Commands::Status => commands::cmd_status(&ctx).await,
    }
}
