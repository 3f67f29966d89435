//! Application error type and its HTTP rendering.
//!
//! Every layer returns [`AppError`]. Handlers let it convert into a JSON
//! response of the form:
//!
//! ```json
//! { "error": { "code": "validation_error", "message": "...", "details": { ... } } }
//! ```
//!
//! Validation failures key their details either to the offending field
//! (`{"course": ["..."]}`) or to the record as a whole
//! (`{"non_field_errors": ["..."]}`).

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value, json};

/// Details key used for errors that concern the whole record rather than one field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Message used when a required write field is missing.
pub const FIELD_REQUIRED: &str = "This field is required.";

/// Message used when a text field is empty or only whitespace.
pub const FIELD_BLANK: &str = "This field may not be blank.";

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    Unauthorized { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    /// Validation error attached to a single field.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut details = Map::new();
        details.insert(field.to_string(), json!([message.clone()]));
        Self::Validation {
            message,
            details: Value::Object(details),
        }
    }

    /// Validation error attached to the record as a whole.
    pub fn non_field(message: impl Into<String>) -> Self {
        Self::field(NON_FIELD_ERRORS, message)
    }

    /// Validation error carrying several field errors collected in one pass.
    pub fn fields(details: Map<String, Value>) -> Self {
        Self::Validation {
            message: "Validation failed".to_string(),
            details: Value::Object(details),
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Returns the validation messages recorded for `key`, if any.
    pub fn messages_for(&self, key: &str) -> Vec<String> {
        match self {
            Self::Validation { details, .. } => details
                .get(key)
                .and_then(Value::as_array)
                .map(|msgs| {
                    msgs.iter()
                        .filter_map(|m| m.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            Self::Validation { message, details } => ("validation_error", message, details),
            Self::Unauthorized { message, details } => ("unauthorized", message, details),
            Self::NotFound { message, details } => ("not_found", message, details),
            Self::Conflict { message, details } => ("conflict", message, details),
            Self::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        if status == StatusCode::UNAUTHORIZED {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], Json(body)).into_response();
        }

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return AppError::conflict(
                    "Unique constraint violation",
                    json!({ "constraint": db.constraint() }),
                );
            }
            if db.is_foreign_key_violation() {
                return AppError::bad_request(
                    "Referenced record does not exist",
                    json!({ "constraint": db.constraint() }),
                );
            }
        }

        if matches!(e, sqlx::Error::RowNotFound) {
            return AppError::not_found("Record not found", json!({}));
        }

        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details = Map::new();

        for (field, field_errors) in errors.field_errors() {
            let messages: Vec<String> = field_errors
                .iter()
                .map(|err| match &err.message {
                    Some(msg) => msg.to_string(),
                    None => err.code.to_string(),
                })
                .collect();
            details.insert(field.to_string(), json!(messages));
        }

        AppError::fields(details)
    }
}
