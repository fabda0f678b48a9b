// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use utoipa::ToSchema;

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,

    /// The text shown to the learner.
    pub text: String,
}

/// Represents the 'options' table in the database.
/// Server-side only: carries the correctness flag.
#[derive(Debug, Clone, FromRow)]
pub struct AnswerOption {
    pub id: i64,
    pub question_id: i64,
    pub text: String,
    pub is_correct: bool,
}

/// The grader's view of an option: ownership and correctness, no text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct OptionKey {
    pub id: i64,
    pub question_id: i64,
    pub is_correct: bool,
}

impl From<&AnswerOption> for OptionKey {
    fn from(option: &AnswerOption) -> Self {
        Self {
            id: option.id,
            question_id: option.question_id,
            is_correct: option.is_correct,
        }
    }
}

/// DTO for sending an option to the client.
/// Has no correctness field, so it cannot leak the answer key.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct PublicOption {
    pub id: i64,
    pub text: String,
}

impl From<&AnswerOption> for PublicOption {
    fn from(option: &AnswerOption) -> Self {
        Self {
            id: option.id,
            text: option.text.clone(),
        }
    }
}

/// DTO for sending a question to the client, options already shuffled.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicQuestion {
    pub id: i64,
    pub text: String,
    pub options: Vec<PublicOption>,
}
