//! `ApiEngine` — primary correction backend over an OpenAI-compatible API.
//!
//! Calls any `/v1/chat/completions` endpoint — Ollama (OpenAI mode), OpenAI,
//! Groq, LM Studio, vLLM, etc.  All connection details come from
//! [`EngineConfig`]; nothing is hardcoded.
//!
//! Errors here are rich ([`ApiError`]) but callers are expected to wrap this
//! engine in [`FallbackEngine`](crate::correction::FallbackEngine), which
//! absorbs every variant and switches to the rule-based generator.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::config::EngineConfig;
use crate::correction::candidate::CorrectionCandidate;
use crate::correction::engine::{CorrectionEngine, CorrectionError};
use crate::correction::prompt::PromptBuilder;

// ---------------------------------------------------------------------------
// ApiError
// ---------------------------------------------------------------------------

/// Errors that can occur while talking to the generative backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("backend request timed out")]
    Timeout,

    /// The HTTP response could not be parsed as the expected JSON.
    #[error("failed to parse backend response: {0}")]
    Parse(String),

    /// The backend returned a response with no usable content.
    #[error("backend returned an empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// The structured result the model is asked to produce.
#[derive(Debug, Deserialize)]
struct CorrectionResponse {
    /// Direct correction of typos, staying closest to the original input.
    direct_correction: String,
    /// Refined phrasing with improved grammar and punctuation.
    refined_phrasing: String,
    /// Alternative interpretation if the meaning is ambiguous.
    alternative_interpretation: String,
}

impl CorrectionResponse {
    fn into_candidates(self) -> Vec<CorrectionCandidate> {
        vec![
            CorrectionCandidate::new(self.direct_correction),
            CorrectionCandidate::new(self.refined_phrasing),
            CorrectionCandidate::new(self.alternative_interpretation),
        ]
    }

    fn is_degenerate(&self) -> bool {
        self.direct_correction.trim().is_empty()
            || self.refined_phrasing.trim().is_empty()
            || self.alternative_interpretation.trim().is_empty()
    }
}

// ---------------------------------------------------------------------------
// ApiEngine
// ---------------------------------------------------------------------------

/// Primary correction engine backed by an OpenAI-compatible chat endpoint.
///
/// # No hardcoded URLs
/// All connection details (`base_url`, `api_key`, `model`) come exclusively
/// from the [`EngineConfig`] passed to [`ApiEngine::from_config`].
pub struct ApiEngine {
    client: reqwest::Client,
    config: EngineConfig,
    prompt_builder: PromptBuilder,
}

impl ApiEngine {
    /// Build an `ApiEngine` from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`, so a stalled network surfaces as
    /// [`ApiError::Timeout`] rather than hanging the coordinator.
    pub fn from_config(config: &EngineConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
            prompt_builder: PromptBuilder::new(),
        }
    }

    /// Raw backend call, kept separate so the trait impl can map the rich
    /// [`ApiError`] down to the user-facing taxonomy in one place.
    pub async fn request_candidates(
        &self,
        raw: &str,
    ) -> Result<Vec<CorrectionCandidate>, ApiError> {
        let (system_msg, user_msg) = self.prompt_builder.build_chat(raw);

        let url = format!("{}/v1/chat/completions", self.config.base_url);

        let body = serde_json::json!({
            "model":       self.config.model,
            "messages": [
                { "role": "system", "content": system_msg },
                { "role": "user",   "content": user_msg   }
            ],
            "stream":          false,
            "temperature":     self.config.temperature,
            "response_format": { "type": "json_object" },
            "max_tokens":      256
        });

        let mut req = self.client.post(&url).json(&body);

        // Attach Authorization header only when api_key is a non-empty string
        // — safe for Ollama and other local providers without authentication.
        let key = self.config.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(ApiError::EmptyResponse)?
            .trim()
            .to_string();

        if content.is_empty() {
            return Err(ApiError::EmptyResponse);
        }

        let parsed: CorrectionResponse =
            serde_json::from_str(&content).map_err(|e| ApiError::Parse(e.to_string()))?;

        if parsed.is_degenerate() {
            return Err(ApiError::EmptyResponse);
        }

        Ok(parsed.into_candidates())
    }
}

#[async_trait]
impl CorrectionEngine for ApiEngine {
    /// Send `text` to the configured backend for correction.
    ///
    /// Any backend failure is reported as [`CorrectionError::EngineUnavailable`]
    /// with the underlying detail logged; the fallback wrapper treats every
    /// error the same way, so no detail is lost where it matters.
    async fn generate_candidates(
        &self,
        text: &str,
    ) -> Result<Vec<CorrectionCandidate>, CorrectionError> {
        match self.request_candidates(text).await {
            Ok(candidates) => Ok(candidates),
            Err(e) => {
                log::debug!("api engine failed: {e}");
                Err(CorrectionError::EngineUnavailable)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
