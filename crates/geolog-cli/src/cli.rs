//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "geolog")]
#[command(author, version, about = "Capture and list device locations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Path to the config file
    #[arg(long, global = true, env = "GEOLOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the location database (overrides config)
    #[arg(long, global = true, env = "GEOLOG_DATABASE")]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Capture the current location and store it
    Capture {
        /// Latitude of the fix (overrides the configured location)
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude of the fix (overrides the configured location)
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Grant location permission without prompting
        #[arg(short, long)]
        yes: bool,
    },

    /// List captured locations, newest first
    List,

    /// Show or change the dark-mode preference
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Show storage, preference and permission status
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
    /// Use the dark theme
    Dark,
    /// Use the light theme
    Light,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_capture_with_negative_longitude() {
        let cli =
            Cli::try_parse_from(["geolog", "capture", "--lat", "37.7749", "--lon", "-122.4194"])
                .unwrap();
        match cli.command {
            Commands::Capture { lat, lon, yes } => {
                assert_eq!(lat, Some(37.7749));
                assert_eq!(lon, Some(-122.4194));
                assert!(!yes);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_capture_lat_requires_lon() {
        assert!(Cli::try_parse_from(["geolog", "capture", "--lat", "1.0"]).is_err());
    }

    #[test]
    fn test_theme_action_is_optional() {
        let cli = Cli::try_parse_from(["geolog", "theme"]).unwrap();
        assert!(matches!(cli.command, Commands::Theme { action: None }));

        let cli = Cli::try_parse_from(["geolog", "theme", "toggle"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Theme {
                action: Some(ThemeAction::Toggle)
            }
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["geolog", "list", "--json", "--no-color"]).unwrap();
        assert!(cli.json);
        assert!(cli.no_color);
    }
}
