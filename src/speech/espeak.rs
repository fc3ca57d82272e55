//! espeak-ng subprocess speech gateway.
//!
//! Each utterance spawns one `espeak-ng` process.  A blocking task polls the
//! child until it exits, then flips the speaking flag and resolves the
//! completion receiver.  `stop()` kills the child synchronously.

use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::oneshot;

use crate::speech::{already_done, SpeechDone, SpeechGateway};

/// espeak-ng speaks at 175 words per minute by default; the settings rate is
/// a multiplier on that.
const BASE_WPM: f32 = 175.0;

/// espeak-ng rejects speeds outside this range.
const MIN_WPM: u32 = 80;
const MAX_WPM: u32 = 450;

/// How often the waiter polls the child for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

fn rate_to_wpm(rate: f32) -> u32 {
    let wpm = (rate * BASE_WPM).round() as i64;
    wpm.clamp(MIN_WPM as i64, MAX_WPM as i64) as u32
}

// ---------------------------------------------------------------------------
// EspeakSpeech
// ---------------------------------------------------------------------------

/// One active utterance.  The generation ties the waiter to the utterance it
/// started for, so a superseded waiter never reaps a newer child.
struct Utterance {
    child: Child,
    generation: u64,
}

/// Speech gateway backed by the `espeak-ng` command-line synthesiser.
pub struct EspeakSpeech {
    program: String,
    current: Arc<Mutex<Option<Utterance>>>,
    speaking: Arc<AtomicBool>,
    generation: Arc<AtomicU64>,
}

impl EspeakSpeech {
    /// Use the `espeak-ng` binary from `PATH`.
    pub fn new() -> Self {
        Self::with_program("espeak-ng")
    }

    /// Use an explicit synthesiser binary (useful for tests and for systems
    /// that ship plain `espeak`).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            current: Arc::new(Mutex::new(None)),
            speaking: Arc::new(AtomicBool::new(false)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl Default for EspeakSpeech {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechGateway for EspeakSpeech {
    fn speak(&self, text: &str, voice_id: Option<&str>, rate: f32) -> SpeechDone {
        // At most one concurrent utterance.
        self.stop();

        if text.is_empty() {
            return already_done();
        }

        let mut cmd = Command::new(&self.program);
        cmd.arg("-s")
            .arg(rate_to_wpm(rate).to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        if let Some(voice) = voice_id {
            cmd.arg("-v").arg(voice);
        }
        cmd.arg(text);

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                log::error!("failed to start {}: {e}", self.program);
                return already_done();
            }
        };

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut current = self.current.lock().unwrap();
            *current = Some(Utterance { child, generation });
        }
        self.speaking.store(true, Ordering::SeqCst);

        let (done_tx, done_rx) = oneshot::channel();
        let current = Arc::clone(&self.current);
        let speaking = Arc::clone(&self.speaking);
        let gen_counter = Arc::clone(&self.generation);

        tokio::task::spawn_blocking(move || {
            loop {
                {
                    let mut slot = current.lock().unwrap();
                    match slot.as_mut() {
                        // Stopped, or replaced by a newer utterance.
                        None => break,
                        Some(utt) if utt.generation != generation => break,
                        Some(utt) => match utt.child.try_wait() {
                            Ok(Some(_status)) => {
                                *slot = None;
                                break;
                            }
                            Ok(None) => {}
                            Err(e) => {
                                log::warn!("speech child wait failed: {e}");
                                *slot = None;
                                break;
                            }
                        },
                    }
                }
                std::thread::sleep(POLL_INTERVAL);
            }

            // Only the waiter for the newest utterance may clear the flag.
            if gen_counter.load(Ordering::SeqCst) == generation {
                speaking.store(false, Ordering::SeqCst);
            }
            let _ = done_tx.send(());
        });

        done_rx
    }

    /// Kill the active utterance's process.  Returns once the kill signal is
    /// sent; the waiter task observes the empty slot and resolves the
    /// utterance's [`SpeechDone`].
    fn stop(&self) {
        let taken = self.current.lock().unwrap().take();
        self.speaking.store(false, Ordering::SeqCst);

        if let Some(mut utt) = taken {
            if let Err(e) = utt.child.kill() {
                log::warn!("failed to stop speech child: {e}");
            }
            // Reap off the runtime thread so a zombie is not left behind and
            // the synchronous caller never blocks on it.
            tokio::task::spawn_blocking(move || {
                let _ = utt.child.wait();
            });
        }
    }

    fn is_speaking(&self) -> bool {
        self.speaking.load(Ordering::SeqCst)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
