use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Untrusted provider output. No shape is guaranteed.
pub type RawSignal = Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalAction {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl SignalAction {
    /// Case-sensitive match against the three wire literals.
    pub fn from_literal(value: &str) -> Option<Self> {
        match value {
            "buy" => Some(SignalAction::Buy),
            "sell" => Some(SignalAction::Sell),
            "hold" => Some(SignalAction::Hold),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalAction::Buy => "buy",
            SignalAction::Sell => "sell",
            SignalAction::Hold => "hold",
        }
    }
}

pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Largest magnitude at which every integer is exactly representable in an f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Whole numbers go out as JSON integers (`150`, not `150.0`), matching how
/// agents and the provider write them.
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

fn serialize_price<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serialize_number(v, serializer),
        None => serializer.serialize_none(),
    }
}

/// Fixed-shape trading signal returned to agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingSignal {
    pub action: SignalAction,
    #[serde(serialize_with = "serialize_price")]
    pub entry: Option<f64>,
    #[serde(serialize_with = "serialize_price")]
    pub stop_loss: Option<f64>,
    #[serde(serialize_with = "serialize_price")]
    pub take_profit: Option<f64>,
    #[serde(serialize_with = "serialize_number")]
    pub confidence: f64,
    pub rationale: String,
}

impl Default for TradingSignal {
    fn default() -> Self {
        Self {
            action: SignalAction::Hold,
            entry: None,
            stop_loss: None,
            take_profit: None,
            confidence: DEFAULT_CONFIDENCE,
            rationale: String::new(),
        }
    }
}
