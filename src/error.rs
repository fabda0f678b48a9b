// src/error.rs

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

use crate::store::StoreError;

/// Failures of exam assembly, grading and results retrieval.
///
/// Everything except `InsufficientData` and `BackendUnavailable` is caused by
/// the client. Messages identify the offending key or id but never say which
/// option is correct.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("No answers submitted")]
    EmptySubmission,

    #[error("Too many answers: {count} submitted, at most {max} allowed")]
    TooManyAnswers { count: usize, max: usize },

    #[error("Bad question id key: {key}")]
    MalformedQuestionId { key: String },

    #[error("Question {question_id} answered more than once")]
    DuplicateQuestion { question_id: i64 },

    #[error("Unknown option_id={option_id}")]
    UnknownOption { option_id: i64 },

    #[error("Option {option_id} does not belong to question {question_id}")]
    OptionQuestionMismatch { option_id: i64, question_id: i64 },

    #[error("Not enough questions: required {required}, available {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Attempt store unavailable")]
    BackendUnavailable(#[from] StoreError),
}

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),

    // 400 Bad Request
    BadRequest(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!("Service Unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "No questions available".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };
        let body = Json(ErrorBody {
            error: error_message,
        });

        (status, body).into_response()
    }
}

/// Store faults keep their detail for the log only; the response body stays generic.
impl From<QuizError> for AppError {
    fn from(err: QuizError) -> Self {
        match err {
            QuizError::BackendUnavailable(source) => {
                AppError::InternalServerError(source.to_string())
            }
            short @ QuizError::InsufficientData { .. } => {
                AppError::ServiceUnavailable(short.to_string())
            }
            client_error => AppError::BadRequest(client_error.to_string()),
        }
    }
}

/// Malformed or mistyped request bodies get the same JSON error shape as other 400s.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_errors_are_bad_request() {
        let response = AppError::from(QuizError::UnknownOption { option_id: 999 }).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Unknown option_id=999");
    }

    #[tokio::test]
    async fn test_backend_fault_is_generic() {
        let err = QuizError::BackendUnavailable(StoreError::Unavailable(
            "connection refused at postgres://secret@db".to_string(),
        ));
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Internal Server Error");
        assert!(!body.to_string().contains("secret"));
    }

    #[tokio::test]
    async fn test_insufficient_data_is_unavailable() {
        let err = QuizError::InsufficientData {
            required: 10,
            available: 0,
        };
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
