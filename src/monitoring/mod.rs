//! Monitoring
//!
//! Prometheus collectors exposed by the server at `/metrics`.

mod metrics;

pub use metrics::{PredictionMetrics, OTHER_BRAND};
