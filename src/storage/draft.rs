//! File-backed draft store.
//!
//! The draft is a single UTF-8 blob at `AppPaths::draft_file`.  Saves write
//! a temporary file in the same directory and rename it into place so a
//! crash mid-write never leaves a truncated draft.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::config::AppPaths;
use crate::storage::{DraftStore, StorageError};

// ---------------------------------------------------------------------------
// FileDraftStore
// ---------------------------------------------------------------------------

/// Persists the draft to a plain text file.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    path: PathBuf,
}

impl FileDraftStore {
    /// Store the draft at an explicit path (useful for tests).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store the draft at the platform-appropriate location.
    pub fn from_default_paths() -> Self {
        Self::new(AppPaths::new().draft_file)
    }

    /// The file the draft lives in.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "draft.txt".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl DraftStore for FileDraftStore {
    /// Load the saved draft, or an empty string when the file is missing or
    /// unreadable.  Never fails the caller — a lost draft degrades to a
    /// blank editor.
    async fn load(&self) -> String {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => {
                log::warn!("draft unreadable at {}: {e}", self.path.display());
                String::new()
            }
        }
    }

    /// Write `text` atomically: temp file in the same directory, then rename.
    async fn save(&self, text: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, text).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Remove the stored draft.  A missing file counts as success.
    async fn clear(&self) -> Result<(), StorageError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn load_missing_returns_empty() {
        let dir = tempdir().expect("temp dir");
        let store = FileDraftStore::new(dir.path().join("draft.txt"));
        assert_eq!(store.load().await, "");
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempdir().expect("temp dir");
        let store = FileDraftStore::new(dir.path().join("draft.txt"));

        store.save("I would like some water.").await.expect("save");
        assert_eq!(store.load().await, "I would like some water.");
    }

    #[tokio::test]
    async fn save_overwrites_previous_draft() {
        let dir = tempdir().expect("temp dir");
        let store = FileDraftStore::new(dir.path().join("draft.txt"));

        store.save("first").await.expect("save");
        store.save("second").await.expect("save");
        assert_eq!(store.load().await, "second");
    }

    #[tokio::test]
    async fn save_creates_parent_directories() {
        let dir = tempdir().expect("temp dir");
        let store = FileDraftStore::new(dir.path().join("nested/deeper/draft.txt"));

        store.save("text").await.expect("save");
        assert_eq!(store.load().await, "text");
    }

    #[tokio::test]
    async fn clear_removes_draft() {
        let dir = tempdir().expect("temp dir");
        let store = FileDraftStore::new(dir.path().join("draft.txt"));

        store.save("doomed").await.expect("save");
        store.clear().await.expect("clear");
        assert_eq!(store.load().await, "");
    }

    #[tokio::test]
    async fn clear_on_missing_draft_is_ok() {
        let dir = tempdir().expect("temp dir");
        let store = FileDraftStore::new(dir.path().join("draft.txt"));
        store.clear().await.expect("clear of nothing");
    }

    #[tokio::test]
    async fn no_temp_file_left_behind() {
        let dir = tempdir().expect("temp dir");
        let store = FileDraftStore::new(dir.path().join("draft.txt"));

        store.save("text").await.expect("save");
        assert!(!store.temp_path().exists());
    }
}
