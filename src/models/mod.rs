//! Shared data models spanning the gateway layers.

pub mod candle;
pub mod signal;

pub use candle::{AnalysisRequest, Candle, CandleTime};
pub use signal::{RawSignal, SignalAction, TradingSignal, DEFAULT_CONFIDENCE};
