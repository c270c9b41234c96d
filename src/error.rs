//!
//! # Custom Error Handling
//!
//! Defines the application-wide error type `AppError` and its mapping onto
//! HTTP responses. `AppError` implements `actix_web::error::ResponseError`,
//! so handlers can return `Result<_, AppError>` and have failures rendered
//! as JSON error bodies with the right status code. `From` implementations
//! for `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error`, and `bcrypt::BcryptError` make `?` work
//! across the crate.
//!
//! Authentication and authorization failures share the `Unauthorized`
//! variant: the wire contract deliberately does not distinguish a bad token
//! from a cross-user access attempt.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// All failure classes surfaced by the service.
#[derive(Debug)]
pub enum AppError {
    /// Missing/invalid/expired token, or an authenticated user touching
    /// another owner's path (HTTP 401).
    Unauthorized(String),
    /// Malformed identifier or duplicate email at registration (HTTP 400).
    BadRequest(String),
    /// Resource absent for this owner. Raised only after authorization, and
    /// used identically whether the resource does not exist or belongs to
    /// someone else (HTTP 404).
    NotFound(String),
    /// Unexpected server-side fault (HTTP 500).
    InternalServerError(String),
    /// Storage engine failure (HTTP 500).
    DatabaseError(String),
    /// Request body failed validation (HTTP 422).
    ValidationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": msg
            })),
            AppError::InternalServerError(msg) => HttpResponse::InternalServerError().json(json!({
                "error": msg
            })),
            // Database errors are presented as generic internal server errors.
            AppError::DatabaseError(msg) => HttpResponse::InternalServerError().json(json!({
                "error": msg
            })),
            AppError::ValidationError(msg) => HttpResponse::UnprocessableEntity().json(json!({
                "error": msg
            })),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
