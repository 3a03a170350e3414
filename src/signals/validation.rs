//! Structural validation of analysis request bodies.
//!
//! Works on raw JSON so the first offending path can be reported before any
//! typed deserialization happens.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::candle::{AnalysisRequest, Candle, CandleTime};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{path}: expected {expected}, received {received}")]
    InvalidType {
        path: String,
        expected: &'static str,
        received: &'static str,
    },
}

impl ValidationError {
    fn invalid_type(path: impl Into<String>, expected: &'static str, found: Option<&Value>) -> Self {
        ValidationError::InvalidType {
            path: path.into(),
            expected,
            received: kind_of(found),
        }
    }

    /// Path of the offending field, e.g. `candles[3].close`.
    pub fn path(&self) -> &str {
        match self {
            ValidationError::InvalidType { path, .. } => path,
        }
    }
}

/// JSON kind name used in error messages. A missing key reads as `undefined`.
fn kind_of(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

fn join(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", parent, field)
    }
}

fn require_string(obj: &Map<String, Value>, parent: &str, field: &str) -> Result<String, ValidationError> {
    match obj.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        other => Err(ValidationError::invalid_type(join(parent, field), "string", other)),
    }
}

fn require_number(obj: &Map<String, Value>, parent: &str, field: &str) -> Result<f64, ValidationError> {
    match obj.get(field).and_then(Value::as_f64) {
        Some(n) => Ok(n),
        None => Err(ValidationError::invalid_type(
            join(parent, field),
            "number",
            obj.get(field),
        )),
    }
}

fn optional_number(
    obj: &Map<String, Value>,
    parent: &str,
    field: &str,
) -> Result<Option<f64>, ValidationError> {
    match obj.get(field) {
        None => Ok(None),
        Some(_) => require_number(obj, parent, field).map(Some),
    }
}

/// Validate a single candle located at `path`.
pub fn validate_candle(value: &Value, path: &str) -> Result<Candle, ValidationError> {
    let obj = value
        .as_object()
        .ok_or_else(|| ValidationError::invalid_type(path, "object", Some(value)))?;

    let time = match obj.get("time") {
        Some(Value::String(s)) => CandleTime::Timestamp(s.clone()),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(epoch) => CandleTime::Epoch(epoch),
            None => {
                return Err(ValidationError::invalid_type(
                    join(path, "time"),
                    "number or string",
                    obj.get("time"),
                ))
            }
        },
        other => {
            return Err(ValidationError::invalid_type(
                join(path, "time"),
                "number or string",
                other,
            ))
        }
    };

    Ok(Candle {
        time,
        open: require_number(obj, path, "open")?,
        high: require_number(obj, path, "high")?,
        low: require_number(obj, path, "low")?,
        close: require_number(obj, path, "close")?,
        tick_volume: optional_number(obj, path, "tick_volume")?,
        volume: optional_number(obj, path, "volume")?,
    })
}

/// Validate an analysis request body, defaulting `candles` to an empty sequence.
///
/// Unknown keys are ignored. The returned error names the first violation
/// in field order.
pub fn validate_analysis_request(body: &Value) -> Result<AnalysisRequest, ValidationError> {
    let obj = body
        .as_object()
        .ok_or_else(|| ValidationError::invalid_type("(root)", "object", Some(body)))?;

    let symbol = require_string(obj, "", "symbol")?;
    let timeframe = require_string(obj, "", "timeframe")?;

    let candles = match obj.get("candles") {
        None => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| validate_candle(item, &format!("candles[{}]", i)))
            .collect::<Result<Vec<_>, _>>()?,
        other => return Err(ValidationError::invalid_type("candles", "array", other)),
    };

    Ok(AnalysisRequest {
        symbol,
        timeframe,
        candles,
    })
}
