//! Data Access Layer
//!
//! All PostgreSQL interaction for the service: the append-only quiz attempt
//! history and the per-user subtopic progress store. Queries are
//! runtime-checked `sqlx` so the crate builds without a live database;
//! migrations are still embedded at compile time.

use anyhow::Result;
use chrono::{DateTime, Utc};
use learnpath_core::{Curriculum, QuizMode, ScoreResult, SubtopicId, TopicId, TopicProgress};
use sqlx::PgPool;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// One persisted quiz attempt, exactly as stored. Attempt rows are created
/// on submit and never mutated.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AttemptRow {
    pub id: Uuid,
    pub user_id: String,
    pub quiz_type: String,
    pub overall_score: f64,
    pub total_questions: i32,
    pub correct_count: i32,
    pub incorrect_count: i32,
    pub skipped_count: i32,
    pub topic_mastery: serde_json::Value,
    pub incorrect_questions: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl AttemptRow {
    pub fn quiz_mode(&self) -> QuizMode {
        if self.quiz_type == "reassess" {
            QuizMode::Reassess
        } else {
            QuizMode::Diagnostic
        }
    }
}

/// A wrapper around the `PgPool` to provide a clear data access interface.
#[derive(Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs all pending `sqlx` migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Persists a scored submission as an immutable history record.
    pub async fn save_attempt(
        &self,
        user_id: &str,
        mode: QuizMode,
        result: &ScoreResult,
    ) -> Result<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO quiz_attempts
                (id, user_id, quiz_type, overall_score, total_questions,
                 correct_count, incorrect_count, skipped_count,
                 topic_mastery, incorrect_questions)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(mode.to_string())
        .bind(result.overall_score)
        .bind(result.total_questions as i32)
        .bind(result.correct_count as i32)
        .bind(result.incorrect_count as i32)
        .bind(result.skipped as i32)
        .bind(serde_json::to_value(&result.topic_mastery)?)
        .bind(serde_json::to_value(&result.incorrect_questions)?)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    /// Lists a user's attempts, most recent first.
    pub async fn list_attempts(&self, user_id: &str) -> Result<Vec<AttemptRow>> {
        let rows = sqlx::query_as::<_, AttemptRow>(
            r#"
            SELECT id, user_id, quiz_type, overall_score, total_questions,
                   correct_count, incorrect_count, skipped_count,
                   topic_mastery, incorrect_questions, created_at
            FROM quiz_attempts
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// The user's most recent attempt, if any.
    pub async fn latest_attempt(&self, user_id: &str) -> Result<Option<AttemptRow>> {
        let row = sqlx::query_as::<_, AttemptRow>(
            r#"
            SELECT id, user_id, quiz_type, overall_score, total_questions,
                   correct_count, incorrect_count, skipped_count,
                   topic_mastery, incorrect_questions, created_at
            FROM quiz_attempts
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Retrieves a single attempt by id, scoped to the user.
    pub async fn get_attempt(&self, user_id: &str, id: Uuid) -> Result<Option<AttemptRow>> {
        let row = sqlx::query_as::<_, AttemptRow>(
            r#"
            SELECT id, user_id, quiz_type, overall_score, total_questions,
                   correct_count, incorrect_count, skipped_count,
                   topic_mastery, incorrect_questions, created_at
            FROM quiz_attempts
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Toggles a single subtopic's completion flag.
    pub async fn set_subtopic_completed(
        &self,
        user_id: &str,
        subtopic_id: SubtopicId,
        completed: bool,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO subtopic_progress (user_id, subtopic_id, completed, completed_at)
            VALUES ($1, $2, $3, CASE WHEN $3 THEN NOW() END)
            ON CONFLICT (user_id, subtopic_id)
            DO UPDATE SET completed = EXCLUDED.completed,
                          completed_at = EXCLUDED.completed_at
            "#,
        )
        .bind(user_id)
        .bind(subtopic_id)
        .bind(completed)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Marks every given subtopic complete in one statement. The write is
    /// atomic: either all rows end up complete or the statement fails as a
    /// whole. The target state is fixed, so overlapping single toggles are
    /// safely overwritten.
    pub async fn complete_all_subtopics(
        &self,
        user_id: &str,
        subtopic_ids: &[SubtopicId],
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO subtopic_progress (user_id, subtopic_id, completed, completed_at)
            SELECT $1, unnest($2::bigint[]), TRUE, NOW()
            ON CONFLICT (user_id, subtopic_id)
            DO UPDATE SET completed = TRUE, completed_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(subtopic_ids)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// All subtopic ids the user has completed.
    pub async fn completed_subtopic_ids(&self, user_id: &str) -> Result<HashSet<SubtopicId>> {
        let ids: Vec<SubtopicId> = sqlx::query_scalar(
            r#"
            SELECT subtopic_id
            FROM subtopic_progress
            WHERE user_id = $1 AND completed = TRUE
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids.into_iter().collect())
    }

    /// Assembles per-topic completion counts for the roadmap state machine.
    pub async fn topic_progress(
        &self,
        user_id: &str,
        curriculum: &Curriculum,
    ) -> Result<HashMap<TopicId, TopicProgress>> {
        let completed = self.completed_subtopic_ids(user_id).await?;
        let progress = curriculum
            .topics()
            .iter()
            .map(|topic| {
                let done = topic
                    .subtopics
                    .iter()
                    .filter(|s| completed.contains(&s.id))
                    .count() as u32;
                (
                    topic.id,
                    TopicProgress {
                        completed: done,
                        total: topic.subtopic_count() as u32,
                    },
                )
            })
            .collect();
        Ok(progress)
    }
}
