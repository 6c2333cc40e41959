//! Error types for the server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::error::CarPriceError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Model error: {0}")]
    Model(#[from] CarPriceError),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::Internal(msg) => {
                tracing::error!(detail = %msg, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "An internal error occurred".to_string())
            }
            ServerError::Model(e) => {
                tracing::error!(detail = %e, "Prediction error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Prediction failed. Check server logs for details.".to_string())
            }
            ServerError::Metrics(e) => {
                tracing::error!(detail = %e, "Metrics error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Metrics are unavailable".to_string())
            }
        };

        let body = Json(json!({
            "error": true,
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_details_are_hidden() {
        let response = ServerError::Model(CarPriceError::ModelNotFitted).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_internal_message_is_generic() {
        let response = ServerError::Internal("non-finite prediction NaN".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], "An internal error occurred");
    }
}
