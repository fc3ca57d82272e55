//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// ColorScheme
// ---------------------------------------------------------------------------

/// Preferred color scheme for whatever UI layer renders the editor.
///
/// The core never interprets this; it is carried for the UI and persisted
/// alongside the rest of the settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColorScheme {
    Light,
    Dark,
    /// Follow the platform appearance.
    System,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::System
    }
}

// ---------------------------------------------------------------------------
// EditorSettings
// ---------------------------------------------------------------------------

/// User-facing accessibility settings, read by the coordinator and never
/// mutated by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Font size for the text editor in points (20–40 is the intended range).
    pub font_size: f32,
    /// Preferred color scheme (light/dark/system).
    pub color_scheme: ColorScheme,
    /// Voice identifier passed to the speech gateway — `None` means the
    /// gateway's default voice.
    pub selected_voice_id: Option<String>,
    /// Speech rate multiplier.  The default 0.9 is deliberately slower than
    /// neutral pace, chosen for comprehensibility.
    pub speech_rate: f32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            font_size: 20.0,
            color_scheme: ColorScheme::default(),
            selected_voice_id: None,
            speech_rate: 0.9,
        }
    }
}

// ---------------------------------------------------------------------------
// EngineConfig
// ---------------------------------------------------------------------------

/// Settings for the primary (generative) correction backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Base URL of the API endpoint.
    ///
    /// - Ollama default: `http://localhost:11434`
    /// - OpenAI: `https://api.openai.com`
    pub base_url: String,
    /// API key — `None` for local providers that need no authentication.
    pub api_key: Option<String>,
    /// Model identifier sent to the API (e.g. `"qwen2.5:3b"`, `"gpt-4o-mini"`).
    pub model: String,
    /// Sampling temperature (0.0 – 1.0).  Lower = more deterministic.
    pub temperature: f32,
    /// Maximum seconds to wait for a backend response.  Expiry is treated
    /// like any other backend error: the rule-based fallback takes over.
    pub timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".into(),
            api_key: None,
            model: "qwen2.5:3b".into(),
            temperature: 0.3,
            timeout_secs: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// AutosaveConfig
// ---------------------------------------------------------------------------

/// Debounced draft autosave settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutosaveConfig {
    /// Seconds of typing inactivity before the draft is written to disk.
    /// Every text mutation restarts the countdown.
    pub debounce_secs: u64,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self { debounce_secs: 10 }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use steady_edit::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Accessibility settings read by the coordinator.
    pub editor: EditorSettings,
    /// Primary correction backend settings.
    pub engine: EngineConfig,
    /// Draft autosave settings.
    pub autosave: AutosaveConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Verify that a default `AppConfig` can be serialised to TOML and
    /// deserialised back without any data loss.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.editor, loaded.editor);
        assert_eq!(original.engine.base_url, loaded.engine.base_url);
        assert_eq!(original.engine.api_key, loaded.engine.api_key);
        assert_eq!(original.engine.model, loaded.engine.model);
        assert_eq!(original.engine.timeout_secs, loaded.engine.timeout_secs);
        assert_eq!(original.autosave, loaded.autosave);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.editor, default.editor);
        assert_eq!(config.engine.model, default.engine.model);
        assert_eq!(config.autosave, default.autosave);
    }

    /// Verify the accessibility defaults.
    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert!((cfg.editor.font_size - 20.0).abs() < f32::EPSILON);
        assert_eq!(cfg.editor.color_scheme, ColorScheme::System);
        assert!(cfg.editor.selected_voice_id.is_none());
        // Deliberately slower than neutral pace.
        assert!((cfg.editor.speech_rate - 0.9).abs() < f32::EPSILON);

        assert_eq!(cfg.engine.base_url, "http://localhost:11434");
        assert_eq!(cfg.engine.timeout_secs, 10);
        assert!(cfg.engine.api_key.is_none());

        assert_eq!(cfg.autosave.debounce_secs, 10);
    }

    /// Verify that modified non-default values survive a round trip.
    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.editor.font_size = 32.0;
        cfg.editor.color_scheme = ColorScheme::Dark;
        cfg.editor.selected_voice_id = Some("en-gb".into());
        cfg.editor.speech_rate = 1.2;
        cfg.engine.base_url = "https://api.openai.com".into();
        cfg.engine.api_key = Some("sk-test".into());
        cfg.engine.model = "gpt-4o-mini".into();
        cfg.engine.timeout_secs = 30;
        cfg.autosave.debounce_secs = 5;

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert!((loaded.editor.font_size - 32.0).abs() < f32::EPSILON);
        assert_eq!(loaded.editor.color_scheme, ColorScheme::Dark);
        assert_eq!(loaded.editor.selected_voice_id, Some("en-gb".into()));
        assert_eq!(loaded.engine.base_url, "https://api.openai.com");
        assert_eq!(loaded.engine.api_key, Some("sk-test".into()));
        assert_eq!(loaded.engine.model, "gpt-4o-mini");
        assert_eq!(loaded.engine.timeout_secs, 30);
        assert_eq!(loaded.autosave.debounce_secs, 5);
    }
}
