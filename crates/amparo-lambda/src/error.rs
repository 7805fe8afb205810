use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use amparo_flows::FlowError;
use amparo_instruments::scoring::ValidationError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Forbidden(String),
    BadRequest(String),
    Invalid(ValidationError),
    Conflict(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<ValidationError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Invalid(e) => (StatusCode::BAD_REQUEST, e.message.clone(), Some(e)),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    None,
                )
            }
        };

        (status, Json(ErrorBody { error: message, details })).into_response()
    }
}

impl From<FlowError> for ApiError {
    fn from(e: FlowError) -> Self {
        match e {
            FlowError::Validation(v) => ApiError::Invalid(v),
            FlowError::NotFound(what) => ApiError::NotFound(format!("{what} not found")),
            e @ FlowError::WrongStage { .. } => ApiError::Conflict(e.to_string()),
            FlowError::Conflict(key) => {
                ApiError::Conflict(format!("concurrent update to {key}, retry"))
            }
            e @ (FlowError::InvalidPolicy(_) | FlowError::Storage(_)) => {
                ApiError::Internal(e.to_string())
            }
        }
    }
}
