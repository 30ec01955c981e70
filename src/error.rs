//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every failure a request can hit, from a duplicate registration to a broken database
//! connection, is expressed as one of its variants.
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers can return it
//! directly; each variant maps to a fixed HTTP status and a `{"error": "..."}` JSON body.
//! `From` implementations for `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error` and `bcrypt::BcryptError` allow conversion with `?`.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Message returned for every failed login, whatever the cause.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// The requested login name is already taken (HTTP 409).
    DuplicateLogin,
    /// The email address is already registered to another account (HTTP 409).
    DuplicateEmail,
    /// Login failed. Unknown login and wrong password are indistinguishable (HTTP 401).
    InvalidCredentials,
    /// Missing, malformed, expired or otherwise untrusted bearer token (HTTP 401).
    Unauthorized(String),
    /// The resource does not exist or belongs to someone else (HTTP 404).
    NotFound(String),
    /// Missing or invalid request fields, including unparseable JSON bodies (HTTP 400).
    ValidationError(String),
    /// Unexpected server-side failure (HTTP 500).
    InternalServerError(String),
    /// Failure reported by `sqlx` (HTTP 500).
    DatabaseError(String),
    /// Invalid or missing startup configuration.
    Configuration(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::DuplicateLogin => write!(f, "Login already registered"),
            AppError::DuplicateEmail => write!(f, "Email already registered"),
            AppError::InvalidCredentials => write!(f, "{}", INVALID_CREDENTIALS_MESSAGE),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::Configuration(msg) => write!(f, "Configuration Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// The message exposed to API clients.
    ///
    /// Internal failures are reduced to a generic message; their detail only goes to the log.
    fn client_message(&self) -> String {
        match self {
            AppError::DuplicateLogin => "Login already registered".to_string(),
            AppError::DuplicateEmail => "Email already registered".to_string(),
            AppError::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE.to_string(),
            AppError::Unauthorized(msg)
            | AppError::NotFound(msg)
            | AppError::ValidationError(msg) => msg.clone(),
            AppError::InternalServerError(_)
            | AppError::DatabaseError(_)
            | AppError::Configuration(_) => "Internal server error".to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DuplicateLogin | AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InternalServerError(_)
            | AppError::DatabaseError(_)
            | AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        }
        HttpResponse::build(status).json(json!({
            "error": self.client_message()
        }))
    }
}

/// `RowNotFound` becomes `NotFound`, unique-constraint violations become
/// `DuplicateEmail` or `DuplicateLogin` depending on the column, anything else
/// is a `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                // SQLite names the column: "UNIQUE constraint failed: users.email".
                if db_err.message().contains("users.email") {
                    AppError::DuplicateEmail
                } else {
                    AppError::DuplicateLogin
                }
            }
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(error: sqlx::migrate::MigrateError) -> AppError {
        AppError::DatabaseError(format!("Migration failed: {}", error))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Any token failure is an `Unauthorized`; the cause is not echoed back.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        log::debug!("Rejected token: {}", error);
        AppError::Unauthorized("Invalid or expired token".into())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(format!("Password hashing failed: {}", error))
    }
}
