//! Analysis provider interface.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::candle::AnalysisRequest;
use crate::models::signal::RawSignal;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("analysis provider is not configured: {0}")]
    NotConfigured(String),
    #[error("analysis provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("analysis provider returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("analysis provider returned no candidate text")]
    EmptyResponse,
    #[error("analysis provider returned malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),
    /// Failure reported by a provider other than Gemini; the message is
    /// surfaced to the caller unchanged.
    #[error("{0}")]
    Other(String),
}

/// Produces a raw, untrusted signal from candle data.
///
/// Implementations make no promise about the shape of the returned value;
/// callers normalize it.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<RawSignal, ProviderError>;
}
