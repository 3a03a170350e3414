//! Request validation and signal normalization.

pub mod normalizer;
pub mod validation;

pub use normalizer::normalize_signal;
pub use validation::{validate_analysis_request, validate_candle, ValidationError};
