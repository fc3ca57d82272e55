//! Prompt builder for tremor-typo correction.
//!
//! [`PromptBuilder::build_chat`] produces a `(system_msg, user_msg)` pair for
//! any OpenAI-compatible `/v1/chat/completions` endpoint.  The system message
//! fixes the instruction profile; the user message carries the raw text and
//! the JSON shape the backend must fill in.

// ---------------------------------------------------------------------------
// System instruction
// ---------------------------------------------------------------------------

/// Instruction profile optimised for tremor-induced typos: three variations,
/// each a complete sentence, meaningfully distinct.
const SYSTEM_INSTRUCTION: &str = "\
You are a text correction assistant for someone with hand tremors that cause typos.
When given input text, generate exactly 3 different corrected interpretations.

Requirements:
- direct_correction: Direct correction of typos and errors (stay closest to original)
- refined_phrasing: Refined phrasing with better grammar/punctuation
- alternative_interpretation: Alternative interpretation if meaning is ambiguous

Each variation should be a complete, well-formed sentence.
Variations must be meaningfully different, not just punctuation changes.
Reply with ONLY a JSON object — no explanation.";

/// The exact JSON shape requested from the backend, echoed in the user
/// message so smaller models stay on format.
const RESPONSE_SHAPE: &str = r#"{"direct_correction": "...", "refined_phrasing": "...", "alternative_interpretation": "..."}"#;

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds correction prompts in chat-message format.
///
/// # Example
/// ```rust
/// use steady_edit::correction::PromptBuilder;
///
/// let builder = PromptBuilder::new();
/// let (system, user) = builder.build_chat("I woudl like some wster");
/// assert!(system.contains("hand tremors"));
/// assert!(user.contains("wster"));
/// ```
#[derive(Debug, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build a **(system_msg, user_msg)** pair for OpenAI-compatible APIs.
    pub fn build_chat(&self, raw: &str) -> (String, String) {
        let system_msg = SYSTEM_INSTRUCTION.to_string();

        let user_msg = format!(
            "Correct this text typed with tremoring hands: \"{raw}\"\n\nRespond with JSON of the form:\n{RESPONSE_SHAPE}"
        );

        (system_msg, user_msg)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
