//!
//! # Error Handling
//!
//! Two error types live here. `ValidationError` is the single domain error raised
//! by the representers when an inbound payload breaks a rule; it is always scoped
//! to a field (or to `non_field_errors` for rules spanning several fields).
//!
//! `AppError` is what a web handler returns. It implements
//! `actix_web::error::ResponseError`, so a rejected write turns into a
//! `422 Unprocessable Entity` JSON body without any extra plumbing, and the `From`
//! implementations below let write paths use the `?` operator.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Field name used for errors that are not tied to a single attribute.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// A rejected write, attached to the field that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Wire name of the offending field, e.g. `end` or `sprint`.
    pub field: String,
    /// Human readable message returned to the caller.
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        let error = Self {
            field: field.into(),
            message: message.into(),
        };
        log::debug!("rejected write on `{}`: {}", error.field, error.message);
        error
    }

    /// An error raised by a rule that looks at several attributes at once.
    pub fn non_field(message: impl Into<String>) -> Self {
        Self::new(NON_FIELD_ERRORS, message)
    }

    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, "This field is required.")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Collapses `validator` output into the first failing field.
///
/// Fields are visited in name order so the surfaced error does not depend on
/// hash map iteration order.
impl From<ValidationErrors> for ValidationError {
    fn from(errors: ValidationErrors) -> ValidationError {
        let field_errors = errors.field_errors();
        let mut fields: Vec<_> = field_errors.keys().copied().collect();
        fields.sort_unstable();

        let first = fields.into_iter().find_map(|field| {
            field_errors
                .get(field)
                .and_then(|errs| errs.first())
                .map(|err| (field, err))
        });

        match first {
            Some((field, err)) => {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                ValidationError::new(field, message)
            }
            None => ValidationError::non_field(errors.to_string()),
        }
    }
}

/// Represents all errors a caller of this crate can hand back to an HTTP client.
#[derive(Debug)]
pub enum AppError {
    /// Represents an unexpected server-side error (HTTP 500), including bad configuration.
    InternalServerError(String),
    /// A payload failed a domain rule (HTTP 422 Unprocessable Entity).
    ValidationError { field: String, message: String },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::ValidationError { field, message } => {
                write!(f, "Validation Error: {}: {}", field, message)
            }
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::InternalServerError(msg) => HttpResponse::InternalServerError().json(json!({
                "error": msg
            })),
            AppError::ValidationError { field, message } => {
                HttpResponse::UnprocessableEntity().json(json!({
                    "error": message,
                    "field": field
                }))
            }
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> AppError {
        AppError::ValidationError {
            field: error.field,
            message: error.message,
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> AppError {
        ValidationError::from(errors).into()
    }
}
