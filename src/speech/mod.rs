//! Speech gateway for steady-edit.
//!
//! The coordinator reads text aloud through [`SpeechGateway`].  At most one
//! utterance is active at a time: speaking while already speaking first stops
//! the active utterance.  Playback is strictly best-effort — a missing TTS
//! binary must never break editing.

use tokio::sync::oneshot;

pub mod espeak;

pub use espeak::EspeakSpeech;

// ---------------------------------------------------------------------------
// SpeechGateway trait
// ---------------------------------------------------------------------------

/// Completion signal for one utterance.  Resolves when playback finishes or
/// is stopped; the coordinator consumes it to clear its "speaking" flag.
pub type SpeechDone = oneshot::Receiver<()>;

/// Object-safe, thread-safe interface for text-to-speech playback.
///
/// # Contract
///
/// - `speak` returns once playback has been started (or refused), not once
///   it finishes; the returned [`SpeechDone`] resolves at the end.
/// - Speaking a new utterance while one is active first stops the active one.
/// - `stop` returns once playback has been signalled to stop, not
///   necessarily once the hardware goes quiet.
pub trait SpeechGateway: Send + Sync {
    /// Start speaking `text` with the given voice and rate multiplier
    /// (1.0 = neutral pace).
    fn speak(&self, text: &str, voice_id: Option<&str>, rate: f32) -> SpeechDone;

    /// Stop the active utterance, if any.
    fn stop(&self);

    /// Whether an utterance is currently active.
    fn is_speaking(&self) -> bool;
}

// Compile-time assertion: Box<dyn SpeechGateway> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn SpeechGateway>) {}
};

/// A [`SpeechDone`] that has already resolved — returned when playback could
/// not be started at all.
pub(crate) fn already_done() -> SpeechDone {
    let (tx, rx) = oneshot::channel();
    let _ = tx.send(());
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn already_done_resolves_immediately() {
        already_done().await.expect("resolved");
    }
}
