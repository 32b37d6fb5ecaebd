use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::dto::common::PaginationParams;
use crate::dto::submission::{CreateSubmissionRequest, SubmissionWithParticipant};
use crate::error::{Result, StorageError};
use crate::models::{DateRange, Submission, week::local_date};

const SUBMISSION_COLUMNS: &str =
    "id, participant_id, link, submission_date, created_at, updated_at";

#[derive(FromRow)]
struct LatestRow {
    id: i32,
    participant_id: i32,
    participant_name: String,
    participant_emoji: String,
    link: String,
    submission_date: DateTime<Utc>,
}

impl From<LatestRow> for SubmissionWithParticipant {
    fn from(row: LatestRow) -> Self {
        Self {
            id: row.id,
            participant_id: row.participant_id,
            participant_name: row.participant_name,
            participant_emoji: row.participant_emoji,
            link: row.link,
            local_date: local_date(row.submission_date),
            submission_date: row.submission_date,
        }
    }
}

pub struct SubmissionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubmissionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a submission for an existing participant
    pub async fn create(&self, req: &CreateSubmissionRequest) -> Result<Submission> {
        sqlx::query_as::<_, Submission>(&format!(
            r#"
            INSERT INTO til_submissions (participant_id, link, submission_date)
            VALUES ($1, $2, $3)
            RETURNING {SUBMISSION_COLUMNS}
            "#
        ))
        .bind(req.participant_id)
        .bind(&req.link)
        .bind(req.submission_date)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            let error = StorageError::from(e);
            if error.is_foreign_key_violation() {
                StorageError::NotFound
            } else {
                error
            }
        })
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM til_submissions WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Submissions whose KST date falls within `range`, oldest first
    pub async fn list_in_range(&self, range: DateRange) -> Result<Vec<Submission>> {
        let (lower, upper) = range.utc_bounds();

        let submissions = sqlx::query_as::<_, Submission>(&format!(
            r#"
            SELECT {SUBMISSION_COLUMNS}
            FROM til_submissions
            WHERE submission_date >= $1 AND submission_date < $2
            ORDER BY submission_date, id
            "#
        ))
        .bind(lower)
        .bind(upper)
        .fetch_all(self.pool)
        .await?;

        Ok(submissions)
    }

    /// One page of a participant's submissions, newest first
    pub async fn list_for_participant_paginated(
        &self,
        participant_id: i32,
        pagination: &PaginationParams,
    ) -> Result<Vec<Submission>> {
        let submissions = sqlx::query_as::<_, Submission>(&format!(
            r#"
            SELECT {SUBMISSION_COLUMNS}
            FROM til_submissions
            WHERE participant_id = $1
            ORDER BY submission_date DESC, id DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(participant_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(self.pool)
        .await?;

        Ok(submissions)
    }

    pub async fn list_for_participant_in_range(
        &self,
        participant_id: i32,
        range: DateRange,
    ) -> Result<Vec<Submission>> {
        let (lower, upper) = range.utc_bounds();

        let submissions = sqlx::query_as::<_, Submission>(&format!(
            r#"
            SELECT {SUBMISSION_COLUMNS}
            FROM til_submissions
            WHERE participant_id = $1
              AND submission_date >= $2 AND submission_date < $3
            ORDER BY submission_date, id
            "#
        ))
        .bind(participant_id)
        .bind(lower)
        .bind(upper)
        .fetch_all(self.pool)
        .await?;

        Ok(submissions)
    }

    pub async fn count_for_participant(&self, participant_id: i32) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM til_submissions WHERE participant_id = $1",
        )
        .bind(participant_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Most recent submissions across all participants
    pub async fn latest(&self, limit: u32) -> Result<Vec<SubmissionWithParticipant>> {
        let rows = sqlx::query_as::<_, LatestRow>(
            r#"
            SELECT s.id, s.participant_id, p.name AS participant_name,
                   p.emoji AS participant_emoji, s.link, s.submission_date
            FROM til_submissions s
            INNER JOIN participants p ON p.id = s.participant_id
            ORDER BY s.submission_date DESC, s.id DESC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(SubmissionWithParticipant::from).collect())
    }
}
