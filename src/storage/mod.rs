//! Draft persistence gateway for steady-edit.
//!
//! The draft is a single opaque text blob.  Persistence is strictly
//! best-effort: load never fails the caller, and save/clear failures are
//! logged by the coordinator rather than surfaced to the user — losing a
//! draft degrades gracefully, interrupting the typist does not.

use async_trait::async_trait;
use thiserror::Error;

pub mod draft;

pub use draft::FileDraftStore;

// ---------------------------------------------------------------------------
// StorageError
// ---------------------------------------------------------------------------

/// Non-fatal persistence failure.  Logged, never shown to the user.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("draft I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// DraftStore trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for draft persistence.
///
/// # Contract
///
/// - `load` returns an empty string when no draft exists or the stored one
///   is unreadable — it never fails the caller.
/// - `save` and `clear` are best-effort; errors are for the caller's log.
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// Load the saved draft, or an empty string if absent/corrupt.
    async fn load(&self) -> String;

    /// Persist `text` as the current draft.
    async fn save(&self, text: &str) -> Result<(), StorageError>;

    /// Remove the stored draft.
    async fn clear(&self) -> Result<(), StorageError>;
}

// Compile-time assertion: Box<dyn DraftStore> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn DraftStore>) {}
};
