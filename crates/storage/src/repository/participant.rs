use sqlx::PgPool;

use crate::dto::participant::CreateParticipantRequest;
use crate::error::{Result, StorageError};
use crate::models::{DEFAULT_EMOJI, Participant};

const PARTICIPANT_COLUMNS: &str = "id, name, emoji, created_at, updated_at";

pub struct ParticipantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ParticipantRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all participants ordered by name
    pub async fn list(&self) -> Result<Vec<Participant>> {
        let participants = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants ORDER BY name, id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(participants)
    }

    /// Find participant by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Participant> {
        sqlx::query_as::<_, Participant>(&format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Create a new participant; names are unique
    pub async fn create(&self, req: &CreateParticipantRequest) -> Result<Participant> {
        let name = req.name.trim();
        let emoji = req.emoji.as_deref().unwrap_or(DEFAULT_EMOJI);

        sqlx::query_as::<_, Participant>(&format!(
            "INSERT INTO participants (name, emoji) VALUES ($1, $2) RETURNING {PARTICIPANT_COLUMNS}"
        ))
        .bind(name)
        .bind(emoji)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            let error = StorageError::from(e);
            if error.is_unique_violation() {
                StorageError::ConstraintViolation(format!("Participant '{name}' already exists"))
            } else {
                error
            }
        })
    }

    /// Replace a participant's emoji
    pub async fn update_emoji(&self, id: i32, emoji: &str) -> Result<Participant> {
        sqlx::query_as::<_, Participant>(&format!(
            "UPDATE participants SET emoji = $2 WHERE id = $1 RETURNING {PARTICIPANT_COLUMNS}"
        ))
        .bind(id)
        .bind(emoji)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Delete a participant; their submissions go with them
    pub async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM participants WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
