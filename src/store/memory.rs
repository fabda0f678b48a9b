// src/store/memory.rs

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use rand::seq::SliceRandom;
use sqlx::types::Json;
use tokio::sync::Mutex;

use crate::{
    models::{
        attempt::{Attempt, NewAttempt},
        question::{AnswerOption, OptionKey, PublicOption, Question},
    },
    store::{AttemptStore, StoreError},
};

#[derive(Default)]
struct Tables {
    questions: Vec<Question>,
    options: Vec<AnswerOption>,
    attempts: Vec<Attempt>,
    next_question_id: i64,
    next_option_id: i64,
    next_attempt_id: i64,
}

/// In-process `AttemptStore`.
///
/// Ids are assigned the way a `BIGSERIAL` column would assign them, unless a
/// caller inserts rows with explicit ids. `set_available(false)` makes every
/// operation fail, standing in for a lost database connection.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    /// Adds a question with the next free id.
    pub async fn add_question(&self, text: &str) -> i64 {
        let mut tables = self.tables.lock().await;
        let id = tables.next_question_id.max(max_id(tables.questions.iter().map(|q| q.id))) + 1;
        tables.next_question_id = id;
        tables.questions.push(Question {
            id,
            text: text.to_string(),
        });
        id
    }

    /// Adds an option with the next free id.
    pub async fn add_option(&self, question_id: i64, text: &str, is_correct: bool) -> i64 {
        let mut tables = self.tables.lock().await;
        let id = tables.next_option_id.max(max_id(tables.options.iter().map(|o| o.id))) + 1;
        tables.next_option_id = id;
        tables.options.push(AnswerOption {
            id,
            question_id,
            text: text.to_string(),
            is_correct,
        });
        id
    }

    /// Adds a question under a caller-chosen id.
    pub async fn insert_question(&self, question: Question) {
        self.tables.lock().await.questions.push(question);
    }

    /// Adds an option under a caller-chosen id.
    pub async fn insert_option(&self, option: AnswerOption) {
        self.tables.lock().await.options.push(option);
    }

    pub async fn attempt_count(&self) -> usize {
        self.tables.lock().await.attempts.len()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "memory store switched off".to_string(),
            ));
        }
        Ok(())
    }
}

fn max_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0)
}

#[async_trait]
impl AttemptStore for MemoryStore {
    async fn sample_questions(&self, count: usize) -> Result<Vec<Question>, StoreError> {
        self.check_available()?;
        let tables = self.tables.lock().await;
        let sample = tables
            .questions
            .choose_multiple(&mut rand::thread_rng(), count)
            .cloned()
            .collect();
        Ok(sample)
    }

    async fn options_for_question(
        &self,
        question_id: i64,
    ) -> Result<Vec<PublicOption>, StoreError> {
        self.check_available()?;
        let tables = self.tables.lock().await;
        let mut options: Vec<PublicOption> = tables
            .options
            .iter()
            .filter(|o| o.question_id == question_id)
            .map(PublicOption::from)
            .collect();
        options.shuffle(&mut rand::thread_rng());
        Ok(options)
    }

    async fn find_option(&self, option_id: i64) -> Result<Option<OptionKey>, StoreError> {
        self.check_available()?;
        let tables = self.tables.lock().await;
        Ok(tables
            .options
            .iter()
            .find(|o| o.id == option_id)
            .map(OptionKey::from))
    }

    async fn find_options(
        &self,
        option_ids: &[i64],
    ) -> Result<HashMap<i64, OptionKey>, StoreError> {
        self.check_available()?;
        let tables = self.tables.lock().await;
        Ok(tables
            .options
            .iter()
            .filter(|o| option_ids.contains(&o.id))
            .map(|o| (o.id, OptionKey::from(o)))
            .collect())
    }

    async fn insert_attempt(&self, attempt: NewAttempt) -> Result<i64, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.lock().await;
        tables.next_attempt_id += 1;
        let id = tables.next_attempt_id;
        tables.attempts.push(Attempt {
            id,
            name: attempt.name,
            submitted_at: chrono::Utc::now(),
            score: attempt.score,
            answers_json: Json(attempt.answers_json),
        });
        Ok(id)
    }

    async fn recent_attempts(&self, limit: i64) -> Result<Vec<Attempt>, StoreError> {
        self.check_available()?;
        let tables = self.tables.lock().await;
        let take = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        let mut attempts = tables.attempts.clone();
        attempts.sort_by(|a, b| b.id.cmp(&a.id));
        attempts.truncate(take);
        Ok(attempts)
    }
}
