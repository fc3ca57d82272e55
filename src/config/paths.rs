//! Cross-platform application paths using the `dirs` crate.
//!
//! Layout (config dir holds both the settings file and the draft):
//!
//!   Windows: %APPDATA%\steady-edit\
//!   macOS:   ~/Library/Application Support/steady-edit/
//!   Linux:   ~/.config/steady-edit/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml` and `draft.txt`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Full path to `draft.txt` — the single persisted draft blob.
    pub draft_file: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "steady-edit";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path (should be extremely rare in practice).
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let settings_file = config_dir.join("settings.toml");
        let draft_file = config_dir.join("draft.txt");

        Self {
            config_dir,
            settings_file,
            draft_file,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
