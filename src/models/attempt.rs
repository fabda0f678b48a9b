// src/models/attempt.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Represents the 'attempts' table in the database.
/// One graded submission; never updated after insert.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Attempt {
    pub id: i64,
    pub name: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub score: i32,

    /// The submission as received, stored as JSONB.
    #[schema(value_type = Object)]
    pub answers_json: Json<StoredSubmission>,
}

/// Payload of `attempts.answers_json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSubmission {
    pub exam_id: String,
    pub answers: BTreeMap<String, i64>,
}

/// Row to insert; `id` and `submitted_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewAttempt {
    pub name: String,
    pub score: i32,
    pub answers_json: StoredSubmission,
}

/// DTO for submitting an exam.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct SubmitRequest {
    #[validate(
        length(min = 1, max = 80, message = "Name length must be between 1 and 80 characters."),
        custom(function = validate_name)
    )]
    pub name: String,

    /// The token received from `GET /exam`.
    #[validate(length(min = 1, max = 40, message = "Exam id length must be between 1 and 40 characters."))]
    pub exam_id: String,

    /// Key: question id (as string). Value: chosen option id.
    pub answers: BTreeMap<String, i64>,
}

fn validate_name(name: &str) -> Result<(), validator::ValidationError> {
    if name.trim().is_empty() {
        return Err(validator::ValidationError::new("name_cannot_be_blank"));
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitResponse {
    pub ok: bool,
    pub score: i32,
}

/// Query parameters for listing results.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResultsParams {
    /// Maximum rows to return, capped at 200.
    pub limit: Option<i64>,
}
