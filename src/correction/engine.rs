//! Core `CorrectionEngine` trait and its error taxonomy.

use async_trait::async_trait;
use thiserror::Error;

use crate::correction::candidate::CorrectionCandidate;

// ---------------------------------------------------------------------------
// CorrectionError
// ---------------------------------------------------------------------------

/// User-visible correction failures.
///
/// Both variants are retryable — the user can always keep typing and ask
/// again.  The display strings are complete sentences because they are shown
/// verbatim in the editor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorrectionError {
    /// No correction capability at all — the fallback generator produced
    /// zero candidates.
    #[error("Text checking is unavailable right now. Please try again later.")]
    EngineUnavailable,

    /// Degenerate input (empty after trimming) or the fallback logic
    /// produced no usable candidates.
    #[error("Couldn't check your text. Please try again.")]
    ProcessingFailed,
}

// ---------------------------------------------------------------------------
// CorrectionEngine trait
// ---------------------------------------------------------------------------

/// Async trait for candidate-correction backends.
///
/// Implementors must be `Send + Sync` so they can be shared across tasks
/// (e.g. wrapped in `Arc<dyn CorrectionEngine>`).
///
/// # Contract
///
/// On success the returned vector holds **exactly three** candidates in
/// display order: literal correction, grammar refinement, alternative
/// interpretation (see [`CorrectionCandidate`]).
#[async_trait]
pub trait CorrectionEngine: Send + Sync {
    async fn generate_candidates(
        &self,
        text: &str,
    ) -> Result<Vec<CorrectionCandidate>, CorrectionError>;
}

// Compile-time assertion: Box<dyn CorrectionEngine> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn CorrectionEngine>) {}
};
