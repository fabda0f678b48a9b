// src/services/grading.rs

use std::collections::{BTreeMap, HashSet};

use crate::{
    config::MAX_ANSWERS,
    error::QuizError,
    models::attempt::{NewAttempt, StoredSubmission},
    store::AttemptStore,
};

/// A learner's answers as received from the client.
#[derive(Debug, Clone)]
pub struct Submission {
    pub name: String,
    pub exam_id: String,
    /// Key: question id as sent (a string). Value: chosen option id.
    pub answers: BTreeMap<String, i64>,
}

/// Grades a submission against the answer key and records one attempt.
///
/// Validation is fail-fast and covers every entry before the insert, so a
/// rejected submission leaves no row behind. One point per correct option.
pub async fn grade_and_record<S>(store: &S, submission: Submission) -> Result<i32, QuizError>
where
    S: AttemptStore + ?Sized,
{
    let score = grade(store, &submission.answers).await.inspect_err(|e| {
        tracing::debug!(exam_id = %submission.exam_id, "Submission rejected: {}", e);
    })?;

    let attempt = NewAttempt {
        name: submission.name.trim().to_string(),
        score,
        answers_json: StoredSubmission {
            exam_id: submission.exam_id,
            answers: submission.answers,
        },
    };
    let attempt_id = store.insert_attempt(attempt).await?;

    tracing::info!(attempt_id, score, "Attempt recorded");
    Ok(score)
}

/// Scores the answers without writing anything.
///
/// Keys are checked first, then every option is resolved in one store call.
async fn grade<S>(store: &S, answers: &BTreeMap<String, i64>) -> Result<i32, QuizError>
where
    S: AttemptStore + ?Sized,
{
    if answers.is_empty() {
        return Err(QuizError::EmptySubmission);
    }
    if answers.len() > MAX_ANSWERS {
        return Err(QuizError::TooManyAnswers {
            count: answers.len(),
            max: MAX_ANSWERS,
        });
    }

    let mut answered = HashSet::with_capacity(answers.len());
    let mut entries = Vec::with_capacity(answers.len());
    for (key, &option_id) in answers {
        let question_id = parse_question_id(key)?;
        if !answered.insert(question_id) {
            return Err(QuizError::DuplicateQuestion { question_id });
        }
        entries.push((question_id, option_id));
    }

    let option_ids: Vec<i64> = entries.iter().map(|&(_, option_id)| option_id).collect();
    let resolved = store.find_options(&option_ids).await?;

    let mut score = 0;
    for (question_id, option_id) in entries {
        let option = resolved
            .get(&option_id)
            .ok_or(QuizError::UnknownOption { option_id })?;

        if option.question_id != question_id {
            return Err(QuizError::OptionQuestionMismatch {
                option_id,
                question_id,
            });
        }

        if option.is_correct {
            score += 1;
        }
    }

    Ok(score)
}

fn parse_question_id(key: &str) -> Result<i64, QuizError> {
    key.parse::<i64>()
        .map_err(|_| QuizError::MalformedQuestionId {
            key: key.to_string(),
        })
}
