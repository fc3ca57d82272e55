//! Correction engine module for steady-edit.
//!
//! This module provides:
//! * [`CorrectionEngine`] — async trait implemented by all correction backends.
//! * [`ApiEngine`] — OpenAI-compatible REST API backend (primary path).
//! * [`RuleEngine`] — deterministic rule-based generator (fallback path).
//! * [`FallbackEngine`] — wraps a primary engine; absorbs every primary error
//!   and switches to the rules transparently.
//! * [`PromptBuilder`] — builds the tremor-correction chat prompt.
//! * [`CorrectionCandidate`] — one proposed corrected rendering.
//! * [`CorrectionError`] / [`ApiError`] — error taxonomies.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use steady_edit::config::EngineConfig;
//! use steady_edit::correction::{ApiEngine, CorrectionEngine, FallbackEngine};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = EngineConfig::default();
//!
//!     // Build an engine that keeps working when the backend is down.
//!     let engine = FallbackEngine::new(ApiEngine::from_config(&config));
//!
//!     let candidates = engine
//!         .generate_candidates("I woudl like some wster")
//!         .await
//!         .unwrap();
//!
//!     // Exactly three, ordered: literal, refined, alternative.
//!     for candidate in candidates {
//!         println!("{}", candidate.text);
//!     }
//! }
//! ```

pub mod api;
pub mod candidate;
pub mod engine;
pub mod fallback;
pub mod prompt;
pub mod rules;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use api::{ApiEngine, ApiError};
pub use candidate::CorrectionCandidate;
pub use engine::{CorrectionEngine, CorrectionError};
pub use fallback::FallbackEngine;
pub use prompt::PromptBuilder;
pub use rules::RuleEngine;
