// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    config::{EXAM_QUESTION_COUNT, RESULTS_LIMIT},
    error::{AppError, ErrorBody},
    models::{
        attempt::{Attempt, ResultsParams, SubmitRequest, SubmitResponse},
        exam::Exam,
    },
    services::{
        exam::assemble_exam,
        grading::{Submission, grade_and_record},
        results::list_recent_attempts,
    },
    state::SharedStore,
};

/// Generates a random exam.
///
/// Questions and options are shuffled; correctness flags are never included.
#[utoipa::path(
    get,
    path = "/exam",
    tag = "quiz",
    responses(
        (status = 200, description = "A freshly assembled exam", body = Exam),
        (status = 503, description = "Question bank is empty", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn get_exam(State(store): State<SharedStore>) -> Result<impl IntoResponse, AppError> {
    let exam = assemble_exam(store.as_ref(), EXAM_QUESTION_COUNT).await?;
    Ok(Json(exam))
}

/// Grades a submission and stores the attempt.
///
/// Any invalid entry rejects the whole submission and nothing is stored.
/// Bodies that fail to deserialize are answered with 400, not axum's 422.
#[utoipa::path(
    post,
    path = "/submit",
    tag = "quiz",
    request_body = SubmitRequest,
    responses(
        (status = 200, description = "Submission graded", body = SubmitResponse),
        (status = 400, description = "Invalid or malformed submission", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn submit(
    State(store): State<SharedStore>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let submission = Submission {
        name: req.name,
        exam_id: req.exam_id,
        answers: req.answers,
    };
    let score = grade_and_record(store.as_ref(), submission).await?;

    Ok(Json(SubmitResponse { ok: true, score }))
}

/// Lists recent attempts, newest first.
#[utoipa::path(
    get,
    path = "/results",
    tag = "quiz",
    params(ResultsParams),
    responses(
        (status = 200, description = "Recent attempts", body = [Attempt]),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn list_results(
    State(store): State<SharedStore>,
    Query(params): Query<ResultsParams>,
) -> Result<impl IntoResponse, AppError> {
    let limit = params.limit.unwrap_or(RESULTS_LIMIT);
    let attempts = list_recent_attempts(store.as_ref(), limit).await?;
    Ok(Json(attempts))
}
