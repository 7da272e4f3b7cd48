// Configuration file handling

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings recognized by the reporting core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Multi-line banners per test case; disabled forces one-line output.
    #[serde(default = "default_true")]
    pub detailed_output: bool,

    /// Stream output as it happens even when running in parallel mode.
    #[serde(default)]
    pub live_output: bool,

    /// The surrounding runner is distributing test files across workers.
    #[serde(default)]
    pub parallel_mode: bool,

    /// Assertions are not wrapped in the browser protocol.
    #[serde(default)]
    pub unit_tests_mode: bool,

    /// Suppress informational console output.
    #[serde(default)]
    pub silent: bool,

    /// Whether a live browser session was started for this run.
    #[serde(default = "default_true")]
    pub start_session: bool,

    #[serde(default)]
    pub screenshots: ScreenshotSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            detailed_output: default_true(),
            live_output: false,
            parallel_mode: false,
            unit_tests_mode: false,
            silent: false,
            start_session: default_true(),
            screenshots: ScreenshotSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenshotSettings {
    /// Capture a screenshot when a command or assertion fails.
    #[serde(default)]
    pub on_error: bool,

    /// Directory screenshots are written under.
    #[serde(default = "default_screenshot_path")]
    pub path: String,
}

impl Default for ScreenshotSettings {
    fn default() -> Self {
        Self {
            on_error: false,
            path: default_screenshot_path(),
        }
    }
}

fn default_true() -> bool {
    true
}

pub fn default_screenshot_path() -> String {
    String::from("screens")
}

impl Settings {
    /// Load settings from default locations
    pub fn load() -> Option<Self> {
        // Check locations in order:
        // 1. .webtestifyrc (current directory)
        // 2. ~/.webtestifyrc (home directory)
        // 3. .webtestifyrc.toml (current directory)
        // 4. ~/.webtestifyrc.toml (home directory)

        let cwd = std::env::current_dir().ok()?;
        let home = dirs::home_dir()?;

        let paths = [
            cwd.join(".webtestifyrc"),
            home.join(".webtestifyrc"),
            cwd.join(".webtestifyrc.toml"),
            home.join(".webtestifyrc.toml"),
        ];

        for path in &paths {
            if path.exists() {
                return Self::load_from_file(path);
            }
        }

        None
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        Self::parse(&content)
    }

    /// Parse settings from TOML string
    pub fn parse(content: &str) -> Option<Self> {
        toml::from_str(content).ok()
    }

    /// Generate current settings as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_settings() {
        let toml = r#"
detailed_output = false
live_output = true
parallel_mode = true
silent = true

[screenshots]
on_error = true
path = "artifacts/screens"
"#;

        let settings = Settings::parse(toml).expect("Failed to parse settings");
        assert!(!settings.detailed_output);
        assert!(settings.live_output);
        assert!(settings.parallel_mode);
        assert!(settings.silent);
        assert!(settings.screenshots.on_error);
        assert_eq!(settings.screenshots.path, "artifacts/screens");
        // untouched fields keep their defaults
        assert!(!settings.unit_tests_mode);
        assert!(settings.start_session);
    }

    #[test]
    fn test_empty_toml_yields_defaults() {
        let settings = Settings::parse("").expect("Failed to parse empty settings");
        assert!(settings.detailed_output);
        assert!(!settings.screenshots.on_error);
        assert_eq!(settings.screenshots.path, "screens");
    }

    #[test]
    fn test_to_toml_round_trips() {
        let mut settings = Settings::default();
        settings.parallel_mode = true;

        let reparsed = Settings::parse(&settings.to_toml()).unwrap();
        assert!(reparsed.parallel_mode);
        assert_eq!(reparsed.screenshots.path, settings.screenshots.path);
    }
}
