use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::week::local_date;

/// A TIL link logged by a participant.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Submission {
    pub id: i32,
    pub participant_id: i32,
    pub link: String,
    pub submission_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Submission {
    /// The KST calendar day this submission counts toward.
    pub fn local_date(&self) -> NaiveDate {
        local_date(self.submission_date)
    }
}
