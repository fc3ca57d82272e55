//! Application entry point — steady-edit terminal front-end.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Build the correction engine (API primary with rule fallback), the
//!    file-backed draft store, and the espeak-ng speech gateway.
//! 4. Construct the [`EditorCoordinator`] (seeds the text from the saved
//!    draft).
//! 5. Spawn a subscriber task that prints state transitions.
//! 6. Read commands from stdin until `:quit` / EOF.
//!
//! The terminal loop is deliberately thin glue: all behaviour lives in the
//! library so richer UI layers can drive the same coordinator.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use steady_edit::config::AppConfig;
use steady_edit::correction::{ApiEngine, FallbackEngine};
use steady_edit::editor::{CorrectionPhase, EditorCoordinator, EditorSnapshot};
use steady_edit::speech::EspeakSpeech;
use steady_edit::storage::FileDraftStore;

const HELP: &str = "\
Type text to replace the draft, or a command:
  :check        ask for correction suggestions
  :pick N       accept suggestion N (1-3)
  :retry        retry a failed check
  :speak        read the draft aloud / stop reading
  :clear        clear the draft (asks for confirmation)
  :confirm      confirm the pending clear
  :cancel       cancel the pending clear
  :help         show this help
  :quit         exit";

/// Print the parts of a state transition a terminal user cares about.
fn report_transition(prev: &EditorSnapshot, next: &EditorSnapshot) {
    if next.phase != prev.phase {
        match next.phase {
            CorrectionPhase::Pending => println!("checking…"),
            CorrectionPhase::Failed => {
                if let Some(msg) = &next.last_error {
                    println!("{msg} (:retry to try again)");
                }
            }
            _ => {}
        }
    }

    if next.modal_visible && !prev.modal_visible {
        println!("suggestions:");
        for (i, candidate) in next.candidates.iter().enumerate() {
            println!("  {}. {}", i + 1, candidate.text);
        }
        println!("(:pick N to accept, :retry for new ones)");
    }

    if next.confirming_clear && !prev.confirming_clear {
        println!("clear the whole draft? (:confirm / :cancel)");
    }

    if next.text != prev.text {
        println!("draft: {}", next.text);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("steady-edit starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Services
    let engine = Arc::new(FallbackEngine::new(ApiEngine::from_config(&config.engine)));
    let store = Arc::new(FileDraftStore::from_default_paths());
    let speech = Arc::new(EspeakSpeech::new());

    // 4. Coordinator (loads the saved draft)
    let coordinator = EditorCoordinator::new(
        engine,
        store,
        speech,
        config.editor.clone(),
        config.autosave.clone(),
    )
    .await;

    // 5. State transition printer
    let mut updates = coordinator.subscribe();
    tokio::spawn(async move {
        let mut prev = updates.borrow().clone();
        while updates.changed().await.is_ok() {
            let next = updates.borrow().clone();
            report_transition(&prev, &next);
            prev = next;
        }
    });

    let initial = coordinator.snapshot();
    if !initial.text.is_empty() {
        println!("restored draft: {}", initial.text);
    }
    println!("{HELP}");

    // 6. Command loop
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end();
        match line {
            ":quit" => break,
            ":help" => println!("{HELP}"),
            ":check" => coordinator.request_correction(),
            ":retry" => coordinator.retry(),
            ":speak" => coordinator.toggle_speech(),
            ":clear" => coordinator.request_clear(),
            ":confirm" => coordinator.confirm_clear(),
            ":cancel" => coordinator.cancel_clear(),
            _ if line.starts_with(":pick") => {
                let snap = coordinator.snapshot();
                let choice = line
                    .strip_prefix(":pick")
                    .and_then(|n| n.trim().parse::<usize>().ok())
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| snap.candidates.get(i));
                match choice {
                    Some(candidate) => coordinator.select_candidate(candidate.id),
                    None => println!("usage: :pick N (with suggestions shown)"),
                }
            }
            _ if line.starts_with(':') => println!("unknown command ({line}); :help for help"),
            _ => coordinator.set_text(line),
        }
    }

    log::info!("steady-edit shutting down");
    Ok(())
}
