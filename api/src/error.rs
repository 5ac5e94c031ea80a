//! Unified error types for the subscriptions API
//!
//! This module defines error types for each layer:
//! - `PeriodError`: malformed `MM-YYYY` periods
//! - `DomainError`: Core business logic and persistence errors
//! - `AppError`: Application layer errors (wraps domain errors for HTTP responses)

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Failure to read a `MM-YYYY` period
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    #[error("expected MM-YYYY, got '{0}'")]
    Layout(String),

    #[error("month must be between 01 and 12, got '{0}'")]
    Month(String),

    #[error("year must be between 2000 and 2099, got '{0}'")]
    Year(String),
}

/// A single rejected input field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Every field error collected while validating one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, reason: impl Into<String>) {
        self.0.push(FieldError {
            field,
            reason: reason.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn fields(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Whether any collected error concerns `field`
    #[cfg(test)]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    /// `Ok(())` when nothing was collected
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    #[error("Database error: {0}")]
    Database(String),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// A persistence failure, tagged with the operation that hit it
    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        source: DomainError,
    },

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Invalid request payload: {0}")]
    InvalidPayload(String),

    #[error("Invalid query parameters: {0}")]
    InvalidQuery(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Wrap a repository error with the operation it failed in
    pub fn store(context: &'static str) -> impl FnOnce(DomainError) -> AppError {
        move |source| AppError::Store { context, source }
    }
}

/// Error response body for JSON responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<String>>,
    status_code: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Domain(DomainError::Validation(errors)) => (
                StatusCode::BAD_REQUEST,
                "Validation failed".to_string(),
                Some(errors.messages()),
            ),
            AppError::Domain(DomainError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, msg, None)
            }
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::Store { context, source } => {
                tracing::error!(error = %source, "{}", context);
                let detail = match source {
                    DomainError::Database(msg) | DomainError::NotFound(msg) => msg,
                    DomainError::Validation(errors) => errors.to_string(),
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    context.to_string(),
                    Some(vec![detail]),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::InvalidPayload(detail) => (
                StatusCode::BAD_REQUEST,
                "Invalid request payload".to_string(),
                Some(vec![detail]),
            ),
            AppError::InvalidQuery(detail) => (
                StatusCode::BAD_REQUEST,
                "Invalid query parameters".to_string(),
                Some(vec![detail]),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
        };

        let body = Json(ErrorResponse {
            message,
            errors,
            status_code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
