//! `RuleEngine` — deterministic rule-based fallback generator.
//!
//! When the generative backend is unreachable the editor still has to offer
//! corrections, so this engine applies a fixed substitution table of common
//! tremor-typo patterns and a small set of phrasing rewrites.  It sleeps for
//! ~1.5 s before returning so the UX timing stays consistent with the
//! primary path.

use std::time::Duration;

use async_trait::async_trait;

use crate::correction::candidate::CorrectionCandidate;
use crate::correction::engine::{CorrectionEngine, CorrectionError};

/// Simulated processing latency, matching the primary path's typical
/// round-trip so switching paths is not jarring.
const PROCESSING_DELAY: Duration = Duration::from_millis(1500);

/// Common tremor-typo → corrected-word pairs.  Matched against whole tokens,
/// case-insensitively.
const TYPO_TABLE: &[(&str, &str)] = &[
    ("woudl", "would"),
    ("teh", "the"),
    ("adn", "and"),
    ("taht", "that"),
    ("recieve", "receive"),
    ("occured", "occurred"),
    ("seperate", "separate"),
    ("glasss", "glass"),
    ("wster", "water"),
    ("plese", "please"),
    ("cna", "can"),
    ("yuo", "you"),
    ("hte", "the"),
    ("dont", "don't"),
    ("cant", "can't"),
    ("wont", "won't"),
    ("didnt", "didn't"),
    ("doesnt", "doesn't"),
    ("havnt", "haven't"),
    ("hasnt", "hasn't"),
];

// ---------------------------------------------------------------------------
// Text helpers
// ---------------------------------------------------------------------------

/// Replace every whole token found in [`TYPO_TABLE`] (case-insensitive),
/// then capitalise the first character and ensure terminal punctuation.
///
/// A token is a maximal run of alphabetic characters and apostrophes, so
/// `"wster."` still matches `wster` and `"don't"` survives untouched.
fn correct_typos(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 1);
    let mut token = String::new();

    let flush = |token: &mut String, out: &mut String| {
        if token.is_empty() {
            return;
        }
        let lower = token.to_lowercase();
        match TYPO_TABLE.iter().find(|(typo, _)| *typo == lower) {
            Some((_, fixed)) => out.push_str(fixed),
            None => out.push_str(token),
        }
        token.clear();
    };

    for ch in text.chars() {
        if ch.is_alphabetic() || ch == '\'' {
            token.push(ch);
        } else {
            flush(&mut token, &mut out);
            out.push(ch);
        }
    }
    flush(&mut token, &mut out);

    capitalize_first(&ensure_terminal_punctuation(&out))
}

/// Append a `.` when the text does not already end with `.`, `!` or `?`.
fn ensure_terminal_punctuation(text: &str) -> String {
    match text.chars().last() {
        Some('.') | Some('!') | Some('?') | None => text.to_string(),
        Some(_) => format!("{text}."),
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Case-insensitive replacement of every occurrence of `needle`.
///
/// Lowercasing can change a string's byte length (e.g. 'İ' lowercases to two
/// characters), so every splice offset is taken from `haystack` itself rather
/// than from a lowercased copy.
fn replace_ci(haystack: &str, needle: &str, replacement: &str) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }

    let lower_needle = needle.to_lowercase();

    let mut out = String::with_capacity(haystack.len());
    let mut skip_until = 0;
    for (i, ch) in haystack.char_indices() {
        if i < skip_until {
            continue;
        }
        match match_len_ci(&haystack[i..], &lower_needle) {
            Some(len) => {
                out.push_str(replacement);
                skip_until = i + len;
            }
            None => out.push(ch),
        }
    }
    out
}

/// Byte length of a case-insensitive match of `lower_needle` at the start of
/// `text`, if there is one.  The length always refers to `text`'s own bytes.
fn match_len_ci(text: &str, lower_needle: &str) -> Option<usize> {
    let mut needle = lower_needle.chars();
    let mut expected = needle.next();
    for (offset, ch) in text.char_indices() {
        for folded in ch.to_lowercase() {
            match expected {
                Some(want) if want == folded => expected = needle.next(),
                _ => return None,
            }
        }
        if expected.is_none() {
            return Some(offset + ch.len_utf8());
        }
    }
    None
}

/// Candidate 2: phrasing refinement starting from the literal correction.
fn refine_phrase(text: &str) -> String {
    let refined = replace_ci(text, "would like", "would like to have");
    ensure_terminal_punctuation(&refined)
}

/// Candidate 3: a more casual alternative, with the trailing period dropped
/// (and deliberately not re-inserted).
fn alternative_interpretation(text: &str) -> String {
    let alternative = replace_ci(text, "would like", "want");
    match alternative.strip_suffix('.') {
        Some(stripped) => stripped.to_string(),
        None => alternative,
    }
}

// ---------------------------------------------------------------------------
// RuleEngine
// ---------------------------------------------------------------------------

/// Deterministic fallback correction engine.
///
/// Known limitation: candidates 2 and 3 can equal candidate 1 verbatim when
/// the input contains none of the rewrite trigger phrases.
#[derive(Debug, Default)]
pub struct RuleEngine;

impl RuleEngine {
    pub fn new() -> Self {
        Self
    }

    /// The pure generation step, without the simulated latency.
    fn build_candidates(text: &str) -> Vec<CorrectionCandidate> {
        let literal = correct_typos(text);
        let refined = refine_phrase(&literal);
        let alternative = alternative_interpretation(&literal);

        vec![
            CorrectionCandidate::new(literal),
            CorrectionCandidate::new(refined),
            CorrectionCandidate::new(alternative),
        ]
    }
}

#[async_trait]
impl CorrectionEngine for RuleEngine {
    async fn generate_candidates(
        &self,
        text: &str,
    ) -> Result<Vec<CorrectionCandidate>, CorrectionError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CorrectionError::ProcessingFailed);
        }

        // Keep UX timing consistent with the primary path.
        tokio::time::sleep(PROCESSING_DELAY).await;

        let candidates = Self::build_candidates(trimmed);
        if candidates.is_empty() {
            return Err(CorrectionError::EngineUnavailable);
        }

        Ok(candidates)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
