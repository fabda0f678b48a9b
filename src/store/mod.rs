// src/store/mod.rs

//! Persistence seam for the question bank and attempt log.
//!
//! The core only talks to an [`AttemptStore`]; `PgStore` backs the running
//! service and `MemoryStore` backs the tests.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    attempt::{Attempt, NewAttempt},
    question::{OptionKey, PublicOption, Question},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait AttemptStore: Send + Sync {
    /// Up to `count` distinct questions, chosen uniformly at random.
    async fn sample_questions(&self, count: usize) -> Result<Vec<Question>, StoreError>;

    /// All options of a question in random order, without correctness flags.
    async fn options_for_question(
        &self,
        question_id: i64,
    ) -> Result<Vec<PublicOption>, StoreError>;

    async fn find_option(&self, option_id: i64) -> Result<Option<OptionKey>, StoreError>;

    /// Resolves many options in one round trip, keyed by option id.
    /// Ids with no matching row are absent from the map.
    async fn find_options(
        &self,
        option_ids: &[i64],
    ) -> Result<HashMap<i64, OptionKey>, StoreError>;

    /// Inserts one attempt and returns its assigned id.
    async fn insert_attempt(&self, attempt: NewAttempt) -> Result<i64, StoreError>;

    /// The newest `limit` attempts, highest id first.
    async fn recent_attempts(&self, limit: i64) -> Result<Vec<Attempt>, StoreError>;
}
