//! Fallback wrapper — primary engine with transparent rule-based rescue.
//!
//! [`FallbackEngine`] tries the wrapped primary engine first.  When the
//! primary fails for *any* reason (backend down, timeout, malformed output)
//! it silently switches to [`RuleEngine`] — the primary error never reaches
//! the caller.  Only a failure of the fallback itself propagates.

use async_trait::async_trait;

use crate::correction::candidate::CorrectionCandidate;
use crate::correction::engine::{CorrectionEngine, CorrectionError};
use crate::correction::rules::RuleEngine;

// ---------------------------------------------------------------------------
// FallbackEngine
// ---------------------------------------------------------------------------

/// Wraps a primary [`CorrectionEngine`] with the deterministic rule-based
/// fallback, so correction keeps working when the backend is unavailable.
///
/// # Example
/// ```rust
/// use steady_edit::config::EngineConfig;
/// use steady_edit::correction::{ApiEngine, FallbackEngine};
///
/// let primary = ApiEngine::from_config(&EngineConfig::default());
/// let engine = FallbackEngine::new(primary);
/// // `engine` now implements CorrectionEngine and keeps producing
/// // candidates even when the backend is unreachable.
/// ```
pub struct FallbackEngine<P: CorrectionEngine> {
    primary: P,
    rules: RuleEngine,
}

impl<P: CorrectionEngine> FallbackEngine<P> {
    /// Wrap `primary` with fallback behaviour.
    pub fn new(primary: P) -> Self {
        Self {
            primary,
            rules: RuleEngine::new(),
        }
    }

    /// Return a reference to the wrapped primary engine.
    pub fn primary(&self) -> &P {
        &self.primary
    }
}

#[async_trait]
impl<P: CorrectionEngine> CorrectionEngine for FallbackEngine<P> {
    /// Attempt the primary engine; on any error run the rule-based fallback.
    async fn generate_candidates(
        &self,
        text: &str,
    ) -> Result<Vec<CorrectionCandidate>, CorrectionError> {
        match self.primary.generate_candidates(text).await {
            Ok(candidates) => Ok(candidates),
            Err(e) => {
                log::warn!("primary correction engine failed ({e}) — using rule fallback");
                self.rules.generate_candidates(text).await
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Always succeeds with three fixed candidates.
    struct AlwaysOk;

    #[async_trait]
    impl CorrectionEngine for AlwaysOk {
        async fn generate_candidates(
            &self,
            _text: &str,
        ) -> Result<Vec<CorrectionCandidate>, CorrectionError> {
            Ok(vec![
                CorrectionCandidate::new("one"),
                CorrectionCandidate::new("two"),
                CorrectionCandidate::new("three"),
            ])
        }
    }

    /// Always returns the given error.
    struct AlwaysFails(CorrectionError);

    #[async_trait]
    impl CorrectionEngine for AlwaysFails {
        async fn generate_candidates(
            &self,
            _text: &str,
        ) -> Result<Vec<CorrectionCandidate>, CorrectionError> {
            Err(self.0.clone())
        }
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn passes_through_primary_success() {
        let engine = FallbackEngine::new(AlwaysOk);
        let candidates = engine.generate_candidates("teh text").await.unwrap();
        assert_eq!(candidates[0].text, "one");
    }

    #[tokio::test(start_paused = true)]
    async fn unavailable_primary_falls_back_to_rules() {
        let engine = FallbackEngine::new(AlwaysFails(CorrectionError::EngineUnavailable));
        let candidates = engine.generate_candidates("teh cat").await.unwrap();
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].text, "The cat.");
    }

    #[tokio::test(start_paused = true)]
    async fn failed_primary_falls_back_to_rules() {
        let engine = FallbackEngine::new(AlwaysFails(CorrectionError::ProcessingFailed));
        let candidates = engine.generate_candidates("hte glasss").await.unwrap();
        assert_eq!(candidates[0].text, "The glass.");
    }

    /// Only the fallback's own failure reaches the caller.
    #[tokio::test(start_paused = true)]
    async fn empty_input_surfaces_fallback_failure() {
        let engine = FallbackEngine::new(AlwaysFails(CorrectionError::EngineUnavailable));
        let err = engine.generate_candidates("   ").await.unwrap_err();
        assert_eq!(err, CorrectionError::ProcessingFailed);
    }

    /// FallbackEngine<P> must itself be a valid CorrectionEngine (object-safe).
    #[test]
    fn fallback_is_object_safe() {
        let _: Box<dyn CorrectionEngine> = Box::new(FallbackEngine::new(AlwaysOk));
    }
}
