//! Coerces untrusted provider output into a [`TradingSignal`].
//!
//! Total over any JSON input: malformed fields fall back to defaults and
//! never cause a rejection.

use serde_json::{Map, Value};

use crate::models::signal::{RawSignal, SignalAction, TradingSignal, DEFAULT_CONFIDENCE};

fn number(fields: &Map<String, Value>, key: &str) -> Option<f64> {
    match fields.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    }
}

pub fn normalize_signal(raw: &RawSignal) -> TradingSignal {
    let empty = Map::new();
    let fields = raw.as_object().unwrap_or(&empty);

    let action = fields
        .get("action")
        .and_then(Value::as_str)
        .and_then(SignalAction::from_literal)
        .unwrap_or_default();

    let rationale = match fields.get("rationale") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => String::new(),
    };

    TradingSignal {
        action,
        entry: number(fields, "entry"),
        stop_loss: number(fields, "stopLoss"),
        take_profit: number(fields, "takeProfit"),
        confidence: number(fields, "confidence").unwrap_or(DEFAULT_CONFIDENCE),
        rationale,
    }
}
