//! HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Errors a handler can answer with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Username did not resolve. Rendered as `{"message": ...}`.
    #[error("{0}")]
    NotFound(String),

    /// A path parameter failed validation.
    #[error("{message}")]
    Validation { field: &'static str, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<emoteport_core::Error> for ApiError {
    fn from(e: emoteport_core::Error) -> Self {
        match e {
            emoteport_core::Error::UserNotFound(_) => ApiError::NotFound(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct MessageBody {
    message: String,
}

#[derive(Debug, Serialize)]
struct ValidationBody {
    success: bool,
    error: ValidationError,
}

#[derive(Debug, Serialize)]
struct ValidationError {
    name: &'static str,
    issues: Vec<ValidationIssue>,
}

#[derive(Debug, Serialize)]
struct ValidationIssue {
    code: &'static str,
    path: Vec<&'static str>,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(MessageBody { message })).into_response()
            }
            ApiError::Validation { field, message } => {
                let body = ValidationBody {
                    success: false,
                    error: ValidationError {
                        name: "ValidationError",
                        issues: vec![ValidationIssue {
                            code: "too_small",
                            path: vec![field],
                            message,
                        }],
                    },
                };
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(MessageBody {
                        message: "Internal server error".into(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
