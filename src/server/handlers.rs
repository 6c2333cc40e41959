//! HTTP request handlers

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::monitoring::OTHER_BRAND;
use crate::preprocessing::{CarFeatures, CategoricalField};

use super::error::{Result, ServerError};
use super::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predicted_price: f64,
}

// ============================================================================
// Inference
// ============================================================================

pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(car): Json<CarFeatures>,
) -> Result<Json<PredictionResponse>> {
    let start = Instant::now();
    let brand = if state.aligner.is_known(CategoricalField::Brand, &car.brand) {
        car.brand.as_str()
    } else {
        OTHER_BRAND
    };
    state.metrics.record_request(brand);

    match predict_price(&state, &car) {
        Ok(price) => {
            let elapsed = start.elapsed().as_secs_f64();
            state.metrics.record_prediction(price, elapsed);
            debug!(brand = %car.brand, price, elapsed_secs = elapsed, "Prediction served");
            Ok(Json(PredictionResponse {
                predicted_price: price,
            }))
        }
        Err(e) => {
            state.metrics.record_error();
            Err(e)
        }
    }
}

fn predict_price(state: &AppState, car: &CarFeatures) -> Result<f64> {
    let row = state.aligner.align(car);
    let x = row.to_matrix()?;
    let prediction = state.model.predict(&x)?;

    let price = prediction
        .get(0)
        .copied()
        .ok_or_else(|| ServerError::Internal("model returned no prediction".to_string()))?;
    if !price.is_finite() {
        return Err(ServerError::Internal(format!("non-finite prediction {}", price)));
    }
    Ok(price)
}

// ============================================================================
// Monitoring
// ============================================================================

pub async fn metrics(State(state): State<Arc<AppState>>) -> Result<Response> {
    let body = state.metrics.gather_text()?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response())
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let uptime = chrono::Utc::now().signed_duration_since(state.started_at);
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": uptime.num_seconds(),
    }))
}

pub async fn model_info(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let columns = state.columns();
    Json(serde_json::json!({
        "n_columns": columns.len(),
        "columns": columns.names(),
        "artifacts": state.artifacts,
    }))
}
