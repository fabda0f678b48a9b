// src/models/exam.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::question::PublicQuestion;

/// One served exam. Not persisted; the id is an opaque token echoed back on submit.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Exam {
    pub exam_id: String,
    pub questions: Vec<PublicQuestion>,
}
