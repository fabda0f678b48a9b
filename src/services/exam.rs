// src/services/exam.rs

use std::collections::HashSet;

use uuid::Uuid;

use crate::{
    error::QuizError,
    models::{exam::Exam, question::PublicQuestion},
    store::AttemptStore,
};

/// Assembles a fresh exam of up to `count` random questions.
///
/// A bank smaller than `count` yields every question it has; an empty bank
/// is `InsufficientData`. Options come back in the store's random order and
/// carry no correctness flag. Read-only.
pub async fn assemble_exam<S>(store: &S, count: usize) -> Result<Exam, QuizError>
where
    S: AttemptStore + ?Sized,
{
    let exam_id = Uuid::new_v4().simple().to_string();

    let sampled = store.sample_questions(count).await?;
    if sampled.is_empty() {
        return Err(QuizError::InsufficientData {
            required: count,
            available: 0,
        });
    }

    let mut seen = HashSet::new();
    let mut questions = Vec::with_capacity(sampled.len().min(count));
    for question in sampled {
        if questions.len() == count || !seen.insert(question.id) {
            continue;
        }
        let options = store.options_for_question(question.id).await?;
        questions.push(PublicQuestion {
            id: question.id,
            text: question.text,
            options,
        });
    }

    if questions.len() < count {
        tracing::warn!(
            "Question bank short: serving {} of {} questions",
            questions.len(),
            count
        );
    }
    tracing::info!(exam_id = %exam_id, questions = questions.len(), "Exam assembled");

    Ok(Exam { exam_id, questions })
}
