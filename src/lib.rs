//! steady-edit — accessible editor core for users with motor tremors.
//!
//! The crate captures raw, possibly garbled typed text, produces a small set
//! of disambiguated candidate corrections (generative backend with a
//! deterministic rule-based fallback), reads the draft aloud, and persists it
//! with a debounced autosave.  Everything UI-facing is exposed as observable
//! state; no rendering lives here.
//!
//! # Architecture
//!
//! ```text
//! text edits ──▶ EditorCoordinator ──▶ CorrectionEngine (ApiEngine → RuleEngine)
//!                      │       │
//!                      │       └────▶ DraftStore   (debounced autosave)
//!                      │
//!                      ├──────▶ SpeechGateway (speak / stop, at most one utterance)
//!                      │
//!                      └──────▶ watch::Receiver<EditorSnapshot>  ← read by any UI
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use steady_edit::config::AppConfig;
//! use steady_edit::correction::{ApiEngine, FallbackEngine};
//! use steady_edit::editor::EditorCoordinator;
//! use steady_edit::speech::EspeakSpeech;
//! use steady_edit::storage::FileDraftStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::load().unwrap_or_default();
//!
//!     let engine = Arc::new(FallbackEngine::new(ApiEngine::from_config(&config.engine)));
//!     let store = Arc::new(FileDraftStore::from_default_paths());
//!     let speech = Arc::new(EspeakSpeech::new());
//!
//!     let coordinator = EditorCoordinator::new(
//!         engine,
//!         store,
//!         speech,
//!         config.editor.clone(),
//!         config.autosave.clone(),
//!     )
//!     .await;
//!
//!     coordinator.set_text("I woudl like some wster");
//!     coordinator.request_correction();
//! }
//! ```

pub mod config;
pub mod correction;
pub mod editor;
pub mod speech;
pub mod storage;
