//! Correction lifecycle states and the published editor snapshot.
//!
//! [`CorrectionPhase`] drives the coordinator's request state machine.
//! [`EditorSnapshot`] is the single source of truth for everything a UI
//! needs: current text, correction phase and candidates, modal/confirmation
//! visibility, speaking flag, settings, and any error message.  The
//! coordinator publishes it through a `tokio::sync::watch` channel so any
//! UI layer can render without the core depending on a UI framework.

use crate::config::EditorSettings;
use crate::correction::CorrectionCandidate;

// ---------------------------------------------------------------------------
// CorrectionPhase
// ---------------------------------------------------------------------------

/// States of a correction request.
///
/// The state machine transitions are:
///
/// ```text
/// Idle ──request_correction──▶ Pending
/// Pending ──engine ok──▶ Resolved     (candidates set, modal shown)
/// Pending ──engine err─▶ Failed       (message set, modal stays closed)
/// Resolved ──select_candidate──▶ Idle
/// Failed ──retry──▶ Pending
/// ```
///
/// At most one request is live at a time; a newer request supersedes any
/// unresolved older one, whose eventual result is discarded silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrectionPhase {
    /// No request in flight and no unconsumed result.
    Idle,

    /// One request is running on a background task.
    Pending,

    /// The engine returned candidates; the selection modal is shown.
    Resolved,

    /// The engine failed with a user-facing, retryable message.
    Failed,
}

impl CorrectionPhase {
    /// Returns `true` while a request is in flight.
    ///
    /// The UI uses this to disable the "check text" button while busy.
    ///
    /// ```
    /// use steady_edit::editor::CorrectionPhase;
    ///
    /// assert!(!CorrectionPhase::Idle.is_busy());
    /// assert!(CorrectionPhase::Pending.is_busy());
    /// assert!(!CorrectionPhase::Resolved.is_busy());
    /// assert!(!CorrectionPhase::Failed.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(self, CorrectionPhase::Pending)
    }

    /// A short human-readable label suitable for display in a status bar.
    pub fn label(&self) -> &'static str {
        match self {
            CorrectionPhase::Idle => "Idle",
            CorrectionPhase::Pending => "Checking",
            CorrectionPhase::Resolved => "Suggestions ready",
            CorrectionPhase::Failed => "Check failed",
        }
    }
}

impl Default for CorrectionPhase {
    fn default() -> Self {
        CorrectionPhase::Idle
    }
}

// ---------------------------------------------------------------------------
// EditorSnapshot
// ---------------------------------------------------------------------------

/// Immutable view of the coordinator's state, published on every change.
#[derive(Debug, Clone)]
pub struct EditorSnapshot {
    /// The draft text being edited.
    pub text: String,

    /// Current phase of the correction request lifecycle.
    pub phase: CorrectionPhase,

    /// Candidates from the most recent resolved request.  Empty outside
    /// `Resolved`.
    pub candidates: Vec<CorrectionCandidate>,

    /// Whether the candidate-selection modal should be shown.
    pub modal_visible: bool,

    /// Whether the destructive-clear confirmation should be shown.
    pub confirming_clear: bool,

    /// User-facing message when `phase == Failed`.  Always retryable.
    pub last_error: Option<String>,

    /// Whether speech playback is active.
    pub speaking: bool,

    /// Current accessibility settings, carried for the UI.
    pub settings: EditorSettings,
}

impl EditorSnapshot {
    pub(crate) fn new(text: String, settings: EditorSettings) -> Self {
        Self {
            text,
            phase: CorrectionPhase::Idle,
            candidates: Vec::new(),
            modal_visible: false,
            confirming_clear: false,
            last_error: None,
            speaking: false,
            settings,
        }
    }

    /// Whether the draft is empty after trimming whitespace — the guard used
    /// by `request_correction` and `toggle_speech`.
    pub fn is_text_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
