// src/store/postgres.rs

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, types::Json};

use crate::{
    models::{
        attempt::{Attempt, NewAttempt},
        question::{OptionKey, PublicOption, Question},
    },
    store::{AttemptStore, StoreError},
};

/// `AttemptStore` over the `questions`, `options` and `attempts` tables.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl AttemptStore for PgStore {
    async fn sample_questions(&self, count: usize) -> Result<Vec<Question>, StoreError> {
        let limit = i64::try_from(count).unwrap_or(i64::MAX);

        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, text
            FROM questions
            ORDER BY RANDOM()
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to sample questions: {:?}", e);
            StoreError::from(e)
        })?;

        Ok(questions)
    }

    async fn options_for_question(
        &self,
        question_id: i64,
    ) -> Result<Vec<PublicOption>, StoreError> {
        let options = sqlx::query_as::<_, PublicOption>(
            r#"
            SELECT id, text
            FROM options
            WHERE question_id = $1
            ORDER BY RANDOM()
            "#,
        )
        .bind(question_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch options for question {}: {:?}", question_id, e);
            StoreError::from(e)
        })?;

        Ok(options)
    }

    async fn find_option(&self, option_id: i64) -> Result<Option<OptionKey>, StoreError> {
        let key = sqlx::query_as::<_, OptionKey>(
            "SELECT id, question_id, is_correct FROM options WHERE id = $1",
        )
        .bind(option_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up option {}: {:?}", option_id, e);
            StoreError::from(e)
        })?;

        Ok(key)
    }

    async fn find_options(
        &self,
        option_ids: &[i64],
    ) -> Result<HashMap<i64, OptionKey>, StoreError> {
        if option_ids.is_empty() {
            return Ok(HashMap::new());
        }

        // Dynamic IN clause to resolve every answer at once
        let mut query_builder = QueryBuilder::<Postgres>::new(
            "SELECT id, question_id, is_correct FROM options WHERE id IN (",
        );

        let mut separated = query_builder.separated(",");
        for id in option_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let keys: Vec<OptionKey> = query_builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to look up {} options: {:?}", option_ids.len(), e);
                StoreError::from(e)
            })?;

        Ok(keys.into_iter().map(|k| (k.id, k)).collect())
    }

    async fn insert_attempt(&self, attempt: NewAttempt) -> Result<i64, StoreError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO attempts (name, score, answers_json)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&attempt.name)
        .bind(attempt.score)
        .bind(Json(&attempt.answers_json))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert attempt: {:?}", e);
            StoreError::from(e)
        })?;

        Ok(id)
    }

    async fn recent_attempts(&self, limit: i64) -> Result<Vec<Attempt>, StoreError> {
        let attempts = sqlx::query_as::<_, Attempt>(
            r#"
            SELECT id, name, submitted_at, score, answers_json
            FROM attempts
            ORDER BY id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch attempts: {:?}", e);
            StoreError::from(e)
        })?;

        Ok(attempts)
    }
}
