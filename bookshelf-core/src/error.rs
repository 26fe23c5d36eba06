use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::validation::{FieldError, ValidationErrorResponse};

/// Every error the service sends back has this shape. `details` only
/// appears for validation failures.
#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a [FieldError]>,
}

/// `{"error": message}` with the given status.
pub fn error_response(status: StatusCode, message: impl AsRef<str>) -> Response {
    let body = ErrorBody { error: message.as_ref(), details: None };
    (status, Json(body)).into_response()
}

/// What a handler can fail with. The variant picks the status code.
#[derive(Debug)]
pub enum HttpError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
    Validation(ValidationErrorResponse),
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Validation(report) => ErrorBody {
                error: "Validation failed",
                details: Some(report.errors.as_slice()),
            },
            Self::Internal(message) => {
                tracing::error!(error = %message, "request failed");
                ErrorBody { error: message, details: None }
            }
            Self::NotFound(message) | Self::BadRequest(message) => {
                ErrorBody { error: message, details: None }
            }
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(message) | Self::BadRequest(message) | Self::Internal(message) => {
                write!(f, "{}: {message}", self.status())
            }
            Self::Validation(report) => {
                write!(f, "{}: {} invalid field(s)", self.status(), report.errors.len())
            }
        }
    }
}

impl std::error::Error for HttpError {}
