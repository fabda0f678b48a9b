// src/handlers/docs.rs

use axum::Json;
use utoipa::OpenApi;

use crate::{
    error::ErrorBody,
    handlers::quiz,
    models::{
        attempt::{Attempt, SubmitRequest, SubmitResponse},
        exam::Exam,
        question::{PublicOption, PublicQuestion},
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(quiz::get_exam, quiz::submit, quiz::list_results),
    components(schemas(
        Exam,
        PublicQuestion,
        PublicOption,
        SubmitRequest,
        SubmitResponse,
        Attempt,
        ErrorBody
    )),
    tags((name = "quiz", description = "Exam assembly, grading and results"))
)]
pub struct ApiDoc;

/// Serves the OpenAPI document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
