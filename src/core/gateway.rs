//! Analysis gateway: validate, delegate to the provider, normalize.

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::models::signal::TradingSignal;
use crate::services::analysis::{AnalysisProvider, ProviderError};
use crate::signals::{normalize_signal, validate_analysis_request, ValidationError};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl AnalysisError {
    pub fn outcome(&self) -> &'static str {
        match self {
            AnalysisError::Validation(_) => "invalid_request",
            AnalysisError::Provider(_) => "provider_error",
        }
    }
}

#[derive(Clone)]
pub struct AnalysisGateway {
    provider: Arc<dyn AnalysisProvider>,
}

impl AnalysisGateway {
    pub fn new(provider: Arc<dyn AnalysisProvider>) -> Self {
        Self { provider }
    }

    /// Handle one analysis request body. The provider is not called when
    /// validation fails, and provider failures are never retried.
    pub async fn handle(&self, body: &Value) -> Result<TradingSignal, AnalysisError> {
        let request = validate_analysis_request(body)?;
        let raw = self.provider.analyze(&request).await?;
        let signal = normalize_signal(&raw);

        debug!(
            symbol = %request.symbol,
            action = signal.action.as_str(),
            confidence = signal.confidence,
            "Analysis complete"
        );
        Ok(signal)
    }
}
