//! Prometheus metrics for the HTTP surface and analysis outcomes.

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
    pub analysis_requests_total: IntCounterVec,
    pub heartbeats_total: IntCounter,
    pub trades_received_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total number of HTTP requests")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_in_flight = IntGauge::new(
            "http_requests_in_flight",
            "Number of HTTP requests currently being served",
        )?;
        let analysis_requests_total = IntCounterVec::new(
            Opts::new(
                "analysis_requests_total",
                "Analysis requests by outcome",
            ),
            &["outcome"],
        )?;
        let heartbeats_total =
            IntCounter::new("heartbeats_total", "Agent heartbeats received")?;
        let trades_received_total =
            IntCounter::new("trades_received_total", "Trade results received")?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(analysis_requests_total.clone()))?;
        registry.register(Box::new(heartbeats_total.clone()))?;
        registry.register(Box::new(trades_received_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            analysis_requests_total,
            heartbeats_total,
            trades_received_total,
        })
    }

    pub fn record_analysis(&self, outcome: &str) {
        self.analysis_requests_total
            .with_label_values(&[outcome])
            .inc();
    }

    /// Render all registered metrics in the Prometheus text format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
