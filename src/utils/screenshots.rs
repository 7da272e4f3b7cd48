// Screenshot persistence

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Persists failure evidence under the configured screenshots directory.
pub struct Screenshots;

impl Screenshots {
    /// Derives a timestamped file name for a screenshot.
    ///
    /// Failure captures carry an `_ERROR` marker so they can be told apart
    /// from on-demand captures in the same directory.
    pub fn file_name_for(prefix: &str, is_error: bool, base_path: &Path) -> PathBuf {
        let timestamp = Local::now().format("%b%d_%H-%M-%S-%3f");
        let marker = if is_error { "_ERROR" } else { "" };

        base_path.join(format!("{}_{}{}.png", prefix, timestamp, marker))
    }

    /// Writes screenshot bytes, creating parent directories as needed.
    pub fn write_screenshot(file_name: &Path, content: &[u8]) -> Result<()> {
        if let Some(parent) = file_name.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!(
                    "Failed to create screenshot directory: {}",
                    parent.display()
                )
            })?;
        }

        fs::write(file_name, content)
            .with_context(|| format!("Failed to write screenshot: {}", file_name.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_carries_error_marker() {
        let name = Screenshots::file_name_for("login/signIn", true, Path::new("screens"));
        let name = name.to_string_lossy();

        assert!(name.starts_with("screens/login/signIn_"));
        assert!(name.ends_with("_ERROR.png"));
    }

    #[test]
    fn test_file_name_without_error_marker() {
        let name = Screenshots::file_name_for("login/signIn", false, Path::new("screens"));
        let name = name.to_string_lossy();

        assert!(!name.contains("_ERROR"));
        assert!(name.ends_with(".png"));
    }

    #[test]
    fn test_write_screenshot_creates_directories() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let file_name =
            Screenshots::file_name_for("mod/case", true, &temp_dir.path().join("deep"));

        Screenshots::write_screenshot(&file_name, b"\x89PNG").expect("write failed");

        assert_eq!(fs::read(&file_name).unwrap(), b"\x89PNG");
    }
}
