//! Error handling for the Vehicle Marketplace Platform
//!
//! Every failure surfaces with an identifying code and a human-readable
//! message; store errors are logged and returned as a generic internal error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Uniqueness violations
    #[error("Duplicate state: {0}")]
    DuplicateState(String),

    #[error("Duplicate email: {0}")]
    DuplicateEmail(String),

    // Hierarchy errors
    #[error("State mismatch: {message}")]
    StateMismatch {
        message: String,
        vendor_ids: Vec<Uuid>,
    },

    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    // Inventory errors
    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    #[error("Partial transfer: {0}")]
    PartialTransfer(String),

    // Invoice errors
    #[error("Invoice must contain at least one item")]
    EmptyInvoice,

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_ids: Option<Vec<Uuid>>,
}

impl ErrorDetail {
    fn new(code: &str, message: String) -> Self {
        Self {
            code: code.to_string(),
            message,
            vendor_ids: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::InvalidInput(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new("INVALID_INPUT", msg.clone()),
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail::new("NOT_FOUND", format!("{} not found", resource)),
            ),
            AppError::DuplicateState(state) => (
                StatusCode::CONFLICT,
                ErrorDetail::new(
                    "DUPLICATE_STATE",
                    format!("An active super vendor already exists for state {}", state),
                ),
            ),
            AppError::DuplicateEmail(email) => (
                StatusCode::CONFLICT,
                ErrorDetail::new(
                    "DUPLICATE_EMAIL",
                    format!("A super vendor with email {} already exists", email),
                ),
            ),
            AppError::StateMismatch {
                message,
                vendor_ids,
            } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "STATE_MISMATCH".to_string(),
                    message: message.clone(),
                    vendor_ids: Some(vendor_ids.clone()),
                },
            ),
            AppError::NotAuthorized(msg) => (
                StatusCode::FORBIDDEN,
                ErrorDetail::new("NOT_AUTHORIZED", msg.clone()),
            ),
            AppError::InsufficientStock(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail::new("INSUFFICIENT_STOCK", msg.clone()),
            ),
            AppError::PartialTransfer(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new(
                    "PARTIAL_TRANSFER",
                    format!("Transfer incomplete, manual reconciliation required: {}", msg),
                ),
            ),
            AppError::EmptyInvoice => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new(
                    "EMPTY_INVOICE",
                    "Invoice must contain at least one item".to_string(),
                ),
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("DATABASE_ERROR", "A database error occurred".to_string()),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("INTERNAL_ERROR", msg.clone()),
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new(
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                ),
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: error_detail,
            }),
        )
            .into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
