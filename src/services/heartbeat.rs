//! Single-slot store for the most recent agent heartbeat.

use chrono::Utc;
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Last-write-wins heartbeat slot. Clones share the same slot.
#[derive(Clone, Default)]
pub struct HeartbeatStore {
    last: Arc<RwLock<Option<Value>>>,
}

impl HeartbeatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the slot with `payload` stamped with the current time in
    /// epoch milliseconds under `at`. Non-object payloads contribute no fields.
    pub async fn record(&self, payload: Value) -> Value {
        let mut fields = match payload {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        fields.insert("at".to_string(), Value::from(Utc::now().timestamp_millis()));
        let stored = Value::Object(fields);

        *self.last.write().await = Some(stored.clone());
        stored
    }

    pub async fn read(&self) -> Option<Value> {
        self.last.read().await.clone()
    }
}
