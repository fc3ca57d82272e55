//! Editor coordinator module for steady-edit.
//!
//! This module owns the state machine at the heart of the crate and exposes
//! the observable state any UI layer renders from.
//!
//! # Architecture
//!
//! ```text
//! set_text / request_correction / toggle_speech / …   (UI calls)
//!        │
//!        ▼
//! EditorCoordinator ── spawns ──▶ correction task   (generation-checked)
//!        │                    ──▶ autosave task     (debounced, generation-checked)
//!        │                    ──▶ speech-done task  (clears the speaking flag)
//!        │
//!        └─▶ watch::Sender<EditorSnapshot> ── subscribe() ──▶ any UI layer
//! ```

pub mod coordinator;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use coordinator::EditorCoordinator;
pub use state::{CorrectionPhase, EditorSnapshot};
