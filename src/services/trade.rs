//! Trade result intake. Payloads are acknowledged and echoed back unchanged.

use serde_json::Value;

pub fn receive(payload: Value) -> Value {
    payload
}
