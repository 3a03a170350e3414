use serde::{Deserialize, Serialize};

/// Bar open time as sent by the agent: epoch seconds or a timestamp string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CandleTime {
    Epoch(f64),
    Timestamp(String),
}

/// One OHLC(V) price bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: CandleTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl Candle {
    pub fn new(time: CandleTime, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            tick_volume: None,
            volume: None,
        }
    }

    pub fn with_tick_volume(mut self, tick_volume: f64) -> Self {
        self.tick_volume = Some(tick_volume);
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }
}

/// Validated body of an analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub symbol: String,
    pub timeframe: String,
    #[serde(default)]
    pub candles: Vec<Candle>,
}
