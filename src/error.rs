use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::domain::models::booking::BookingStatus;
use crate::domain::models::interval::TimeInterval;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Time slot is not available")]
    BookingConflict(Vec<TimeInterval>),
    #[error("Start time is outside the booking window: {0}")]
    OutOfBookingWindow(String),
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Database(e) => {
                error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response()
            }
            AppError::BookingConflict(conflicts) => (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "Time slot is not available",
                    "conflicts": conflicts,
                })),
            )
                .into_response(),
            AppError::OutOfBookingWindow(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": format!("Start time is outside the booking window: {}", msg) })),
            )
                .into_response(),
            AppError::InvalidTransition { from, to } => (
                StatusCode::CONFLICT,
                Json(json!({ "error": format!("Invalid status transition: {} -> {}", from, to) })),
            )
                .into_response(),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal error" })),
            )
                .into_response(),
        }
    }
}
