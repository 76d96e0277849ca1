//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to appropriate HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nutrition_planner_shared::types::{ErrorDetail, ErrorResponse};
use nutrition_planner_shared::TargetsError;
use thiserror::Error;
use tracing::debug;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Targets(#[from] TargetsError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::Targets(err) => {
                let status = match err {
                    TargetsError::Validation { .. } => StatusCode::BAD_REQUEST,
                    TargetsError::InvalidInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                };
                (status, ErrorDetail::from(err))
            }
            ApiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: msg.clone(),
                    field: None,
                },
            ),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "BAD_REQUEST".to_string(),
                    message: msg.clone(),
                    field: None,
                },
            ),
        };

        debug!(status = %status, code = %detail.code, "Request rejected");

        (status, Json(ErrorResponse { error: detail })).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
