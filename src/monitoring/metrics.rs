//! Prometheus collectors for the prediction endpoint

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

/// Brand label for requests whose brand has no model column of its own
pub const OTHER_BRAND: &str = "other";

/// Collectors for prediction traffic, registered on a private registry
#[derive(Clone)]
pub struct PredictionMetrics {
    registry: Registry,

    /// Successful and failed prediction requests
    pub requests_total: IntCounter,

    /// Prediction requests per brand. Labels are limited to brands with a
    /// model column plus [`OTHER_BRAND`], so clients cannot grow the series set.
    pub brand_requests_total: IntCounterVec,

    /// Distribution of predicted prices
    pub predicted_price: Histogram,

    /// Requests that failed after reaching the handler
    pub errors_total: IntCounter,

    /// Handler latency in seconds
    pub latency_seconds: Histogram,
}

impl PredictionMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests_total = IntCounter::with_opts(Opts::new(
            "prediction_requests_total",
            "Total number of prediction requests",
        ))?;
        registry.register(Box::new(requests_total.clone()))?;

        let brand_requests_total = IntCounterVec::new(
            Opts::new(
                "brand_prediction_requests_total",
                "Number of prediction requests per brand",
            ),
            &["brand"],
        )?;
        registry.register(Box::new(brand_requests_total.clone()))?;

        let predicted_price = Histogram::with_opts(
            HistogramOpts::new("price_counter", "Distribution of predicted prices").buckets(
                vec![
                    5_000.0, 10_000.0, 20_000.0, 30_000.0, 40_000.0, 50_000.0, 75_000.0,
                    100_000.0, 150_000.0, 250_000.0,
                ],
            ),
        )?;
        registry.register(Box::new(predicted_price.clone()))?;

        let errors_total = IntCounter::with_opts(Opts::new(
            "prediction_errors_total",
            "Prediction requests that failed",
        ))?;
        registry.register(Box::new(errors_total.clone()))?;

        let latency_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "prediction_latency_seconds",
                "Prediction handler latency in seconds",
            )
            .buckets(vec![0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25]),
        )?;
        registry.register(Box::new(latency_seconds.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            brand_requests_total,
            predicted_price,
            errors_total,
            latency_seconds,
        })
    }

    /// Render all registered metrics in Prometheus text exposition format.
    pub fn gather_text(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Count an incoming request for `brand`; callers pass [`OTHER_BRAND`]
    /// for brands outside the canonical columns.
    pub fn record_request(&self, brand: &str) {
        self.requests_total.inc();
        self.brand_requests_total.with_label_values(&[brand]).inc();
    }

    /// Record a served prediction
    pub fn record_prediction(&self, price: f64, duration_secs: f64) {
        self.predicted_price.observe(price);
        self.latency_seconds.observe(duration_secs);
    }

    pub fn record_error(&self) {
        self.errors_total.inc();
    }
}
