//! Integration tests for the API Server
//!
//! Tests HTTP endpoints, health checks, metrics, and the analysis flow.


use serde_json::{json, Value};

use test_utils::{StubProvider, TestApiServer};

#[tokio::test]
async fn health_endpoint_reports_ready() {
    let app = TestApiServer::new();
    for path in ["/api/health", "/health"] {
        let response = app.server.get(path).await;
        assert_eq!(response.status_code(), 200);

        let body: Value = response.json();
        assert_eq!(body["ok"], true);
        assert_eq!(body["status"], "healthy");
        assert!(body["uptime_seconds"].as_u64().is_some());
        assert_eq!(body["service"], "fx-signal-gateway");
    }
}

#[tokio::test]
async fn index_serves_demo_page() {
    let app = TestApiServer::new();
    let response = app.server.get("/").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(body.contains("AI Forex Trading Bot"));
    assert!(body.contains("Run Demo Analysis"));
}

#[tokio::test]
async fn analyze_returns_normalized_signal() {
    let app = TestApiServer::with_provider(StubProvider::returning(json!({
        "action": "buy",
        "entry": 1.0842,
        "stopLoss": "1.0820",
        "confidence": 0.81,
        "rationale": "Bullish engulfing",
        "debug": "dropped"
    })));

    let response = app
        .server
        .post("/api/analyze")
        .json(&json!({
            "symbol": "EURUSD",
            "timeframe": "M5",
            "candles": [
                { "time": 1700000000, "open": 1.08, "high": 1.085, "low": 1.079, "close": 1.084, "tick_volume": 311 }
            ]
        }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "action": "buy",
            "entry": 1.0842,
            "stopLoss": null,
            "takeProfit": null,
            "confidence": 0.81,
            "rationale": "Bullish engulfing"
        })
    );

    let requests = app.provider.requests.lock().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].symbol, "EURUSD");
    assert_eq!(requests[0].candles.len(), 1);
}

#[tokio::test]
async fn analyze_echoes_integer_prices_as_integers() {
    let app = TestApiServer::with_provider(StubProvider::returning(json!({
        "action": "sell",
        "entry": 150,
        "stopLoss": 152,
        "takeProfit": 144.5,
        "confidence": 0.6
    })));

    let response = app
        .server
        .post("/api/analyze")
        .json(&json!({ "symbol": "USDJPY", "timeframe": "H1" }))
        .await;

    assert_eq!(response.status_code(), 200);
    let text = response.text();
    assert!(text.contains("\"entry\":150,"), "{}", text);
    assert!(text.contains("\"stopLoss\":152,"), "{}", text);
    assert!(text.contains("\"takeProfit\":144.5,"), "{}", text);
}

#[tokio::test]
async fn analyze_defaults_when_provider_returns_garbage() {
    let app = TestApiServer::with_provider(StubProvider::returning(json!("not an object")));

    let response = app
        .server
        .post("/api/analyze")
        .json(&json!({ "symbol": "EURUSD", "timeframe": "M5" }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["action"], "hold");
    assert_eq!(body["confidence"], 0.5);
    assert_eq!(body["rationale"], "");
    assert!(body["entry"].is_null());
}

#[tokio::test]
async fn analyze_rejects_invalid_candles() {
    let app = TestApiServer::new();

    let response = app
        .server
        .post("/api/analyze")
        .json(&json!({
            "symbol": "EURUSD",
            "timeframe": "M5",
            "candles": [{ "time": 1, "open": 1.0, "high": 1.0, "low": 1.0 }]
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({ "error": "candles[0].close: expected number, received undefined" })
    );
    assert!(app.provider.requests.lock().await.is_empty());
}

#[tokio::test]
async fn analyze_surfaces_provider_failure_as_client_error() {
    let app = TestApiServer::with_provider(StubProvider::failing("upstream quota exhausted"));

    let response = app
        .server
        .post("/api/analyze")
        .json(&json!({ "symbol": "EURUSD", "timeframe": "M5" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "upstream quota exhausted");
}

#[tokio::test]
async fn analyze_rejects_malformed_json() {
    let app = TestApiServer::new();

    let response = app.server.post("/api/analyze").text("{not json").await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn analyze_accepts_bodies_above_axum_default_limit() {
    let app = TestApiServer::new();
    let candles: Vec<Value> = (0..25_000)
        .map(|i| {
            json!({
                "time": 1_700_000_000 + i * 300,
                "open": 1.0801, "high": 1.0812, "low": 1.0795, "close": 1.0807,
                "tick_volume": 311, "volume": 0
            })
        })
        .collect();
    let body = json!({ "symbol": "EURUSD", "timeframe": "M5", "candles": candles });
    assert!(serde_json::to_vec(&body).unwrap().len() > 2 * 1024 * 1024);

    let response = app.server.post("/api/analyze").json(&body).await;

    assert_eq!(response.status_code(), 200);
    let requests = app.provider.requests.lock().await;
    assert_eq!(requests[0].candles.len(), 25_000);
}

#[tokio::test]
async fn oversized_bodies_get_uniform_error_shape() {
    let app = TestApiServer::with_body_limit(1024);
    let padding = "x".repeat(4096);

    for path in ["/api/analyze", "/api/agent/heartbeat", "/api/trade"] {
        let response = app
            .server
            .post(path)
            .json(&json!({ "symbol": "EURUSD", "timeframe": "M5", "note": padding }))
            .await;

        assert_eq!(response.status_code(), 400, "{}", path);
        let body: Value = response.json();
        let error = body["error"].as_str().expect("error message");
        assert!(error.contains("length limit"), "{}: {}", path, error);
    }
    assert!(app.provider.requests.lock().await.is_empty());
}

#[tokio::test]
async fn analyze_info_endpoint() {
    let app = TestApiServer::new();
    let body: Value = app.server.get("/api/analyze").await.json();
    assert_eq!(body, json!({ "ok": true, "endpoint": "/api/analyze" }));
}

#[tokio::test]
async fn heartbeat_is_null_until_recorded() {
    let app = TestApiServer::new();
    let body: Value = app.server.get("/api/agent/heartbeat").await.json();
    assert_eq!(body, json!({ "ok": true, "lastHeartbeat": null }));
}

#[tokio::test]
async fn heartbeat_keeps_only_latest() {
    let app = TestApiServer::new();

    let first: Value = app
        .server
        .post("/api/agent/heartbeat")
        .json(&json!({ "id": "a", "secret": "s1" }))
        .await
        .json();
    assert_eq!(first["ok"], true);
    assert_eq!(first["lastHeartbeat"]["id"], "a");

    let response = app
        .server
        .post("/api/agent/heartbeat")
        .json(&json!({ "id": "b" }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = app.server.get("/api/agent/heartbeat").await.json();
    let last = &body["lastHeartbeat"];
    assert_eq!(last["id"], "b");
    assert!(last.get("secret").is_none());
    assert!(last["at"].as_i64().unwrap() >= first["lastHeartbeat"]["at"].as_i64().unwrap());
}

#[tokio::test]
async fn heartbeat_rejects_malformed_json() {
    let app = TestApiServer::new();
    let response = app.server.post("/api/agent/heartbeat").text("nope").await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn trade_echoes_payload() {
    let app = TestApiServer::new();
    let trade = json!({ "ticket": 8812, "symbol": "EURUSD", "action": "buy", "volume": 0.1, "profit": -3.2 });

    let response = app.server.post("/api/trade").json(&trade).await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body, json!({ "received": true, "body": trade }));
}

#[tokio::test]
async fn trade_rejects_malformed_json_and_reports_endpoint() {
    let app = TestApiServer::new();
    let response = app.server.post("/api/trade").text("{").await;
    assert_eq!(response.status_code(), 400);

    let body: Value = app.server.get("/api/trade").await.json();
    assert_eq!(body, json!({ "ok": true, "endpoint": "/api/trade" }));
}

#[tokio::test]
async fn metrics_endpoint_tracks_requests_and_outcomes() {
    let app = TestApiServer::new();

    let _ = app
        .server
        .post("/api/analyze")
        .json(&json!({ "symbol": "EURUSD", "timeframe": "M5" }))
        .await;
    let _ = app.server.post("/api/analyze").json(&json!({ "symbol": 1 })).await;
    let _ = app.server.post("/api/agent/heartbeat").json(&json!({ "id": "a" })).await;

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(body.contains("http_requests_total"));
    assert!(body.contains("http_request_duration_seconds"));
    assert!(body.contains("http_requests_in_flight"));
    assert!(body.contains("analysis_requests_total{outcome=\"ok\"} 1"));
    assert!(body.contains("analysis_requests_total{outcome=\"invalid_request\"} 1"));
    assert!(body.contains("heartbeats_total 1"));
}
