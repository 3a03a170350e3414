//! HTTP endpoint server using Axum

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, Json, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::config::{ServerConfig, DEFAULT_MAX_BODY_BYTES};
use crate::core::gateway::AnalysisGateway;
use crate::error::ApiError;
use crate::metrics::Metrics;
use crate::models::signal::TradingSignal;
use crate::services::analysis::AnalysisProvider;
use crate::services::heartbeat::HeartbeatStore;
use crate::services::trade;

pub const SERVICE_NAME: &str = "fx-signal-gateway";

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Clone)]
pub struct AppState {
    pub gateway: AnalysisGateway,
    pub heartbeats: HeartbeatStore,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(provider: Arc<dyn AnalysisProvider>, metrics: Arc<Metrics>) -> Self {
        Self {
            gateway: AnalysisGateway::new(provider),
            heartbeats: HeartbeatStore::new(),
            metrics,
            start_time: Arc::new(Instant::now()),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

/// Parse a request body as JSON regardless of its declared content type.
/// Buffering failures (e.g. over the body limit) surface as `ApiError` too.
fn parse_json(body: Result<Bytes, BytesRejection>) -> Result<Value, ApiError> {
    let body = body.map_err(|rejection| ApiError::Body(rejection.body_text()))?;
    Ok(serde_json::from_slice(&body)?)
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Json(json!({
        "ok": true,
        "status": "healthy",
        "uptime_seconds": uptime_seconds,
        "service": SERVICE_NAME
    }))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    state.metrics.http_requests_in_flight.dec();

    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn analyze(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<TradingSignal>, ApiError> {
    let result = match parse_json(body) {
        Ok(value) => state.gateway.handle(&value).await.map_err(ApiError::from),
        Err(e) => Err(e),
    };

    let outcome = match &result {
        Ok(_) => "ok",
        Err(ApiError::Analysis(e)) => e.outcome(),
        Err(ApiError::InvalidJson(_)) | Err(ApiError::Body(_)) => "invalid_request",
    };
    state.metrics.record_analysis(outcome);

    result.map(Json)
}

async fn analyze_info() -> Json<Value> {
    Json(json!({ "ok": true, "endpoint": "/api/analyze" }))
}

async fn record_heartbeat(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, ApiError> {
    let payload = parse_json(body)?;
    let stored = state.heartbeats.record(payload).await;
    state.metrics.heartbeats_total.inc();
    Ok(Json(json!({ "ok": true, "lastHeartbeat": stored })))
}

async fn read_heartbeat(State(state): State<AppState>) -> Json<Value> {
    let last = state.heartbeats.read().await;
    Json(json!({ "ok": true, "lastHeartbeat": last }))
}

async fn receive_trade(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, ApiError> {
    let payload = parse_json(body)?;
    state.metrics.trades_received_total.inc();
    Ok(Json(json!({ "received": true, "body": trade::receive(payload) })))
}

async fn trade_info() -> Json<Value> {
    Json(json!({ "ok": true, "endpoint": "/api/trade" }))
}

pub fn create_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_body_bytes);
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/api/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/analyze", get(analyze_info).post(analyze))
        .route(
            "/api/agent/heartbeat",
            get(read_heartbeat).post(record_heartbeat),
        )
        .route("/api/trade", get(trade_info).post(receive_trade))
        .layer(body_limit)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(
    config: ServerConfig,
    provider: Arc<dyn AnalysisProvider>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let port = config.port;
    let metrics = Arc::new(Metrics::new()?);
    let state = AppState::new(provider, metrics).with_max_body_bytes(config.max_body_bytes);
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
