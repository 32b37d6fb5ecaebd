use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Participant;

/// Response containing participant information
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParticipantResponse {
    pub id: i32,
    pub name: String,
    pub emoji: String,
    pub created_at: DateTime<Utc>,
}

impl From<Participant> for ParticipantResponse {
    fn from(participant: Participant) -> Self {
        Self {
            id: participant.id,
            name: participant.name,
            emoji: participant.emoji,
            created_at: participant.created_at,
        }
    }
}

/// Request payload for adding a participant
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateParticipantRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,

    #[validate(length(min = 1, max = 10, message = "Emoji must be between 1 and 10 characters"))]
    pub emoji: Option<String>,
}

/// Request payload for changing a participant's emoji
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateEmojiRequest {
    #[validate(length(min = 1, max = 10, message = "Emoji must be between 1 and 10 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub emoji: String,
}

fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}
