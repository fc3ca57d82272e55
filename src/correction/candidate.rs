//! Candidate correction value type.

use uuid::Uuid;

/// One proposed corrected rendering of the user's raw text.
///
/// Candidates are immutable and always produced in ordered sets of exactly
/// three:
///
/// | Index | Meaning                                          |
/// |-------|--------------------------------------------------|
/// | 0     | Literal correction — closest to the raw input    |
/// | 1     | Grammar / punctuation refinement                 |
/// | 2     | Alternative interpretation for ambiguous input   |
///
/// The ordering is significant for display only; no candidate is guaranteed
/// distinct from another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionCandidate {
    /// Opaque unique token identifying this candidate within its set.
    pub id: Uuid,
    /// The full corrected text.
    pub text: String,
}

impl CorrectionCandidate {
    /// Create a candidate with a fresh random id.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
        }
    }
}
