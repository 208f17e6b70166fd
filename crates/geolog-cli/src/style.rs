//! Visual styling for CLI output.
//!
//! Colors follow the persisted dark-mode preference: the light palette uses
//! dark ink, the dark palette uses light ink.

use owo_colors::{OwoColorize, Style};

use geolog_types::{LocationRecord, ThemeMode};

/// Text styles for one theme.
#[derive(Debug, Clone)]
pub struct Palette {
    no_color: bool,
    title: Style,
    detail: Style,
    success: Style,
    error: Style,
}

impl Palette {
    pub fn new(theme: ThemeMode, no_color: bool) -> Self {
        match theme {
            ThemeMode::Light => Self {
                no_color,
                title: Style::new().bold().black(),
                detail: Style::new().blue(),
                success: Style::new().green(),
                error: Style::new().bold().red(),
            },
            ThemeMode::Dark => Self {
                no_color,
                title: Style::new().bold().white(),
                detail: Style::new().bright_cyan(),
                success: Style::new().bright_green(),
                error: Style::new().bold().bright_red(),
            },
        }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.no_color {
            text.to_string()
        } else {
            text.style(style).to_string()
        }
    }

    pub fn title(&self, text: &str) -> String {
        self.paint(text, self.title)
    }

    pub fn detail(&self, text: &str) -> String {
        self.paint(text, self.detail)
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(text, self.success)
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(text, self.error)
    }

    /// Two-line list entry: `Location {id}` over the coordinates.
    pub fn record(&self, record: &LocationRecord) -> String {
        format!(
            "{}\n{}",
            self.title(&record.title()),
            self.detail(&record.coordinates().to_string())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LocationRecord {
        LocationRecord {
            id: 2,
            latitude: 40.7128,
            longitude: -74.006,
        }
    }

    #[test]
    fn test_plain_record_matches_list_layout() {
        let palette = Palette::new(ThemeMode::Light, true);
        assert_eq!(
            palette.record(&sample()),
            "Location 2\nLatitude: 40.7128 | Longitude: -74.006"
        );
    }

    #[test]
    fn test_colored_output_contains_escape_codes() {
        let palette = Palette::new(ThemeMode::Dark, false);
        let title = palette.title("Location 2");
        assert!(title.contains("\u{1b}["));
        assert!(title.contains("Location 2"));
    }

    #[test]
    fn test_themes_differ() {
        let light = Palette::new(ThemeMode::Light, false);
        let dark = Palette::new(ThemeMode::Dark, false);
        assert_ne!(light.title("x"), dark.title("x"));
    }
}
