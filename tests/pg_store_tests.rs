// tests/pg_store_tests.rs
//
// Runs against a real Postgres. Set DATABASE_URL and run with `--ignored`.

use std::collections::{BTreeMap, HashSet};

use quiz_backend::{
    models::attempt::{NewAttempt, StoredSubmission},
    services::{exam::assemble_exam, grading::{Submission, grade_and_record}},
    store::{AttemptStore, PgStore},
};
use sqlx::postgres::PgPoolOptions;

async fn connect() -> PgStore {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres for testing. Make sure DATABASE_URL is set.");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    PgStore::new(pool)
}

/// Inserts a question with one correct and one wrong option.
/// Returns (question id, correct option id, wrong option id).
async fn seed_question(store: &PgStore, text: &str) -> (i64, i64, i64) {
    let qid: i64 = sqlx::query_scalar("INSERT INTO questions (text) VALUES ($1) RETURNING id")
        .bind(text)
        .fetch_one(store.pool())
        .await
        .unwrap();

    let mut ids = Vec::new();
    for (label, is_correct) in [("A", true), ("B", false)] {
        let oid: i64 = sqlx::query_scalar(
            "INSERT INTO options (question_id, text, is_correct) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(qid)
        .bind(label)
        .bind(is_correct)
        .fetch_one(store.pool())
        .await
        .unwrap();
        ids.push(oid);
    }

    (qid, ids[0], ids[1])
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn pg_exam_and_grading_flow() {
    // Arrange
    let store = connect().await;
    let tag = uuid::Uuid::new_v4().simple().to_string();
    let (qid, correct, wrong) = seed_question(&store, &format!("Question {}", tag)).await;

    // Options are returned without flags and only for the asked question
    let options = store.options_for_question(qid).await.unwrap();
    let ids: HashSet<i64> = options.iter().map(|o| o.id).collect();
    assert_eq!(ids, HashSet::from([correct, wrong]));

    let exam = assemble_exam(&store, 10).await.unwrap();
    assert!(!exam.questions.is_empty());
    assert!(exam.questions.len() <= 10);

    // Act
    let name = format!("pg_{}", &tag[..8]);
    let score = grade_and_record(
        &store,
        Submission {
            name: name.clone(),
            exam_id: exam.exam_id.clone(),
            answers: BTreeMap::from([(qid.to_string(), correct)]),
        },
    )
    .await
    .unwrap();

    // Assert
    assert_eq!(score, 1);
    let latest = store.recent_attempts(50).await.unwrap();
    let row = latest
        .iter()
        .find(|a| a.name == name)
        .expect("attempt not stored");
    assert_eq!(row.score, 1);
    assert_eq!(row.answers_json.exam_id, exam.exam_id);
    assert_eq!(
        row.answers_json.answers,
        BTreeMap::from([(qid.to_string(), correct)])
    );
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn pg_recent_attempts_descending() {
    let store = connect().await;

    for score in 0..3 {
        store
            .insert_attempt(NewAttempt {
                name: "ordering".to_string(),
                score,
                answers_json: StoredSubmission {
                    exam_id: "t".to_string(),
                    answers: BTreeMap::new(),
                },
            })
            .await
            .unwrap();
    }

    let attempts = store.recent_attempts(3).await.unwrap();
    assert_eq!(attempts.len(), 3);
    assert!(attempts.windows(2).all(|w| w[0].id > w[1].id));
}
