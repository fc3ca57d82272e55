//! Editor coordinator — owns the draft text and orchestrates correction
//! requests, debounced autosave, and speech toggling.
//!
//! # Concurrency model
//!
//! All state mutations serialize through one `std::sync::Mutex` that is
//! never held across an await point.  Background work runs on tokio tasks:
//!
//! * **Correction requests** carry a generation number taken at spawn time.
//!   A newer request supersedes an older in-flight one; a completed stale
//!   request finds its generation outdated and is discarded silently.
//! * **Autosave** is debounced: every text mutation bumps the autosave
//!   generation and arms a fresh delay task.  A task whose generation went
//!   stale during the delay performs no I/O; a task that reached the write
//!   completes it.  Draft writes and clears serialize through one async
//!   mutex so a clear can never interleave with a save.
//! * **Speech** is independent of correction; neither blocks the other.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use uuid::Uuid;

use crate::config::{AutosaveConfig, EditorSettings};
use crate::correction::{CorrectionCandidate, CorrectionEngine};
use crate::editor::state::{CorrectionPhase, EditorSnapshot};
use crate::speech::SpeechGateway;
use crate::storage::DraftStore;

// ---------------------------------------------------------------------------
// Inner state
// ---------------------------------------------------------------------------

struct Inner {
    text: String,
    phase: CorrectionPhase,
    candidates: Vec<CorrectionCandidate>,
    modal_visible: bool,
    confirming_clear: bool,
    last_error: Option<String>,
    speaking: bool,
    settings: EditorSettings,
    /// Bumped on every `request_correction`; results from older generations
    /// are dropped.
    correction_gen: u64,
    /// Bumped on every text mutation and on clear; autosave tasks from older
    /// generations perform no I/O.
    autosave_gen: u64,
}

impl Inner {
    fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            text: self.text.clone(),
            phase: self.phase,
            candidates: self.candidates.clone(),
            modal_visible: self.modal_visible,
            confirming_clear: self.confirming_clear,
            last_error: self.last_error.clone(),
            speaking: self.speaking,
            settings: self.settings.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// EditorCoordinator
// ---------------------------------------------------------------------------

/// Cheap-to-clone handle driving the correction-and-editing state machine.
///
/// Create with [`EditorCoordinator::new`] inside a tokio runtime; every
/// method may spawn background tasks.  UI layers observe state through
/// [`subscribe`](Self::subscribe) and never mutate it directly.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use steady_edit::config::AppConfig;
/// use steady_edit::correction::{ApiEngine, FallbackEngine};
/// use steady_edit::editor::EditorCoordinator;
/// use steady_edit::speech::EspeakSpeech;
/// use steady_edit::storage::FileDraftStore;
///
/// # async fn example() {
/// let config = AppConfig::load().unwrap_or_default();
/// let coordinator = EditorCoordinator::new(
///     Arc::new(FallbackEngine::new(ApiEngine::from_config(&config.engine))),
///     Arc::new(FileDraftStore::from_default_paths()),
///     Arc::new(EspeakSpeech::new()),
///     config.editor.clone(),
///     config.autosave.clone(),
/// )
/// .await;
///
/// let mut updates = coordinator.subscribe();
/// coordinator.set_text("I woudl like some wster");
/// coordinator.request_correction();
/// updates.changed().await.unwrap();
/// # }
/// ```
#[derive(Clone)]
pub struct EditorCoordinator {
    inner: Arc<Mutex<Inner>>,
    snapshot_tx: Arc<watch::Sender<EditorSnapshot>>,
    engine: Arc<dyn CorrectionEngine>,
    store: Arc<dyn DraftStore>,
    speech: Arc<dyn SpeechGateway>,
    /// Serialises draft writes and clears so they never interleave.
    storage_lock: Arc<tokio::sync::Mutex<()>>,
    debounce: Duration,
}

impl EditorCoordinator {
    /// Build a coordinator and seed the draft text from the store.
    pub async fn new(
        engine: Arc<dyn CorrectionEngine>,
        store: Arc<dyn DraftStore>,
        speech: Arc<dyn SpeechGateway>,
        settings: EditorSettings,
        autosave: AutosaveConfig,
    ) -> Self {
        let text = store.load().await;
        let (snapshot_tx, _) = watch::channel(EditorSnapshot::new(text.clone(), settings.clone()));

        let inner = Inner {
            text,
            phase: CorrectionPhase::Idle,
            candidates: Vec::new(),
            modal_visible: false,
            confirming_clear: false,
            last_error: None,
            speaking: false,
            settings,
            correction_gen: 0,
            autosave_gen: 0,
        };

        Self {
            inner: Arc::new(Mutex::new(inner)),
            snapshot_tx: Arc::new(snapshot_tx),
            engine,
            store,
            speech,
            storage_lock: Arc::new(tokio::sync::Mutex::new(())),
            debounce: Duration::from_secs(autosave.debounce_secs),
        }
    }

    // -----------------------------------------------------------------------
    // Observation
    // -----------------------------------------------------------------------

    /// Subscribe to state changes.  The receiver always starts with the
    /// current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<EditorSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// The current published state.
    pub fn snapshot(&self) -> EditorSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    fn publish(&self) {
        let snap = self.inner.lock().unwrap().snapshot();
        self.snapshot_tx.send_replace(snap);
    }

    // -----------------------------------------------------------------------
    // Text editing
    // -----------------------------------------------------------------------

    /// Replace the draft text unconditionally.  Any string is accepted,
    /// including empty; every call re-arms the debounced autosave.
    pub fn set_text(&self, new_text: impl Into<String>) {
        let (generation, text) = {
            let mut inner = self.inner.lock().unwrap();
            inner.text = new_text.into();
            inner.autosave_gen += 1;
            (inner.autosave_gen, inner.text.clone())
        };
        self.publish();
        self.arm_autosave(generation, text);
    }

    /// Arm the debounce task for one text mutation.  Only the task whose
    /// generation survives to expiry performs the write.
    fn arm_autosave(&self, generation: u64, text: String) {
        let inner = Arc::clone(&self.inner);
        let store = Arc::clone(&self.store);
        let storage_lock = Arc::clone(&self.storage_lock);
        let debounce = self.debounce;

        tokio::spawn(async move {
            tokio::time::sleep(debounce).await;

            let _guard = storage_lock.lock().await;
            if inner.lock().unwrap().autosave_gen != generation {
                log::debug!("autosave superseded before write — skipping");
                return;
            }
            if let Err(e) = store.save(&text).await {
                // Best-effort: the user keeps typing, the draft stays in memory.
                log::warn!("draft autosave failed: {e}");
            } else {
                log::debug!("draft autosaved ({} bytes)", text.len());
            }
        });
    }

    // -----------------------------------------------------------------------
    // Correction lifecycle
    // -----------------------------------------------------------------------

    /// Start a correction request for the current text.
    ///
    /// No-op when the text is empty or whitespace-only.  When a request is
    /// already in flight, the new one supersedes it: the older result will
    /// be discarded on arrival, never applied.
    pub fn request_correction(&self) {
        let (generation, text) = {
            let mut inner = self.inner.lock().unwrap();
            if inner.text.trim().is_empty() {
                return;
            }
            inner.phase = CorrectionPhase::Pending;
            inner.last_error = None;
            // A re-request from `Resolved` must not leave the previous
            // suggestions on screen while the new ones are in flight.
            inner.candidates.clear();
            inner.modal_visible = false;
            inner.correction_gen += 1;
            (inner.correction_gen, inner.text.clone())
        };
        self.publish();

        let coordinator = self.clone();
        let engine = Arc::clone(&self.engine);
        tokio::spawn(async move {
            let result = engine.generate_candidates(&text).await;

            {
                let mut inner = coordinator.inner.lock().unwrap();
                if inner.correction_gen != generation {
                    // Superseded while in flight; drop silently.
                    log::debug!("stale correction result dropped");
                    return;
                }
                match result {
                    Ok(candidates) => {
                        inner.phase = CorrectionPhase::Resolved;
                        inner.candidates = candidates;
                        inner.modal_visible = true;
                    }
                    Err(e) => {
                        log::warn!("correction failed: {e}");
                        inner.phase = CorrectionPhase::Failed;
                        inner.last_error = Some(e.to_string());
                        // Modal stays closed; the UI decides how to show this.
                    }
                }
            }
            coordinator.publish();
        });
    }

    /// Accept one candidate from the most recent resolved request.
    ///
    /// Selections whose id is not in the current candidate set (stale
    /// selections from a superseded request) are ignored.
    pub fn select_candidate(&self, id: Uuid) {
        let (generation, text) = {
            let mut inner = self.inner.lock().unwrap();
            if inner.phase != CorrectionPhase::Resolved {
                return;
            }
            let Some(candidate) = inner.candidates.iter().find(|c| c.id == id).cloned() else {
                log::debug!("candidate selection ignored: not in the current set");
                return;
            };
            inner.text = candidate.text;
            inner.modal_visible = false;
            inner.candidates.clear();
            inner.phase = CorrectionPhase::Idle;
            inner.autosave_gen += 1;
            (inner.autosave_gen, inner.text.clone())
        };
        self.publish();
        self.arm_autosave(generation, text);
    }

    /// Re-run the correction request, re-entering `Pending` even from
    /// `Failed`.
    pub fn retry(&self) {
        self.request_correction();
    }

    // -----------------------------------------------------------------------
    // Destructive clear (two-step)
    // -----------------------------------------------------------------------

    /// First step of the destructive clear: only raises the confirmation
    /// flag, nothing else changes.
    pub fn request_clear(&self) {
        self.inner.lock().unwrap().confirming_clear = true;
        self.publish();
    }

    /// Dismiss the clear confirmation without clearing.
    pub fn cancel_clear(&self) {
        self.inner.lock().unwrap().confirming_clear = false;
        self.publish();
    }

    /// Second step: empty the text and remove the stored draft.
    ///
    /// Any armed autosave is invalidated *before* the stored state is
    /// removed, so no pending save can resurrect the cleared draft.
    pub fn confirm_clear(&self) {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.text.clear();
            inner.confirming_clear = false;
            inner.autosave_gen += 1;
        }
        self.publish();

        let store = Arc::clone(&self.store);
        let storage_lock = Arc::clone(&self.storage_lock);
        tokio::spawn(async move {
            let _guard = storage_lock.lock().await;
            if let Err(e) = store.clear().await {
                log::warn!("draft clear failed: {e}");
            }
        });
    }

    // -----------------------------------------------------------------------
    // Speech
    // -----------------------------------------------------------------------

    /// Toggle speech playback: stop when speaking, otherwise speak the
    /// current text with the current voice and rate.  No-op on empty text.
    ///
    /// Speech is independent of correction requests; neither blocks the
    /// other.
    pub fn toggle_speech(&self) {
        if self.speech.is_speaking() {
            self.speech.stop();
            self.inner.lock().unwrap().speaking = false;
            self.publish();
            return;
        }

        let (text, voice, rate) = {
            let inner = self.inner.lock().unwrap();
            if inner.text.trim().is_empty() {
                return;
            }
            (
                inner.text.clone(),
                inner.settings.selected_voice_id.clone(),
                inner.settings.speech_rate,
            )
        };

        let done = self.speech.speak(&text, voice.as_deref(), rate);
        self.inner.lock().unwrap().speaking = true;
        self.publish();

        let coordinator = self.clone();
        tokio::spawn(async move {
            let _ = done.await;
            // A newer utterance may already be active; trust the gateway.
            let speaking = coordinator.speech.is_speaking();
            coordinator.inner.lock().unwrap().speaking = speaking;
            coordinator.publish();
        });
    }

    // -----------------------------------------------------------------------
    // Settings
    // -----------------------------------------------------------------------

    /// Push updated settings into the coordinator.  The settings are
    /// otherwise read-only here; the next `toggle_speech` uses the new voice
    /// and rate.
    pub fn update_settings(&self, settings: EditorSettings) {
        self.inner.lock().unwrap().settings = settings;
        self.publish();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
