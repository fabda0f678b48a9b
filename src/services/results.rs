// src/services/results.rs

use crate::{config::RESULTS_LIMIT, error::QuizError, models::attempt::Attempt, store::AttemptStore};

/// Lists the newest attempts, highest id first.
/// `limit` is clamped to `1..=RESULTS_LIMIT`.
pub async fn list_recent_attempts<S>(store: &S, limit: i64) -> Result<Vec<Attempt>, QuizError>
where
    S: AttemptStore + ?Sized,
{
    let limit = limit.clamp(1, RESULTS_LIMIT);
    Ok(store.recent_attempts(limit).await?)
}
