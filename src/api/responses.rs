//! HTTP mapping for service errors.

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use crate::error::{IntakeError, ProgressError};

/// `{success: false, error}` with the given status.
pub fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({"success": false, "error": message.into()})),
    )
        .into_response()
}

impl IntakeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for IntakeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Self::Validation {
                message,
                required,
                invalid,
            } => (
                status,
                Json(json!({
                    "success": false,
                    "error": message,
                    "required": required,
                    "invalid": invalid,
                })),
            )
                .into_response(),
            Self::MethodNotAllowed { .. } => (
                status,
                [(header::ALLOW, "POST, OPTIONS")],
                Json(json!({"success": false, "error": "Method not allowed"})),
            )
                .into_response(),
            Self::Internal(message) => {
                error!(error = %message, "Intake failed");
                failure(status, message)
            }
        }
    }
}

impl IntoResponse for ProgressError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation { message, required } => (
                StatusCode::BAD_REQUEST,
                Json(json!({"success": false, "error": message, "required": required})),
            )
                .into_response(),
            e @ Self::DayOutOfRange { .. } => failure(StatusCode::BAD_REQUEST, e.to_string()),
            Self::Internal(message) => {
                error!(error = %message, "Progress request failed");
                failure(StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intake_errors_map_to_status_codes() {
        let validation = IntakeError::Validation {
            message: "Missing required fields: email".into(),
            required: vec!["email"],
            invalid: vec![],
        };
        assert_eq!(validation.into_response().status(), StatusCode::BAD_REQUEST);

        let method = IntakeError::MethodNotAllowed {
            method: "GET".into(),
        };
        let response = method.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "POST, OPTIONS");

        let internal = IntakeError::Internal("boom".into());
        assert_eq!(
            internal.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn progress_errors_map_to_status_codes() {
        let out_of_range = ProgressError::DayOutOfRange { day: 30, max: 21 };
        assert_eq!(out_of_range.into_response().status(), StatusCode::BAD_REQUEST);

        let internal = ProgressError::Internal("boom".into());
        assert_eq!(
            internal.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
