use sqlx::PgPool;
use storage::{
    dto::{
        common::PaginationParams,
        participant::{CreateParticipantRequest, UpdateEmojiRequest},
    },
    error::Result,
    models::{Participant, Submission},
    repository::{participant::ParticipantRepository, submission::SubmissionRepository},
};

/// List all participants
pub async fn list_participants(pool: &PgPool) -> Result<Vec<Participant>> {
    let repo = ParticipantRepository::new(pool);
    repo.list().await
}

/// Get participant by ID
pub async fn get_participant(pool: &PgPool, id: i32) -> Result<Participant> {
    let repo = ParticipantRepository::new(pool);
    repo.find_by_id(id).await
}

/// Add a participant
pub async fn create_participant(
    pool: &PgPool,
    request: &CreateParticipantRequest,
) -> Result<Participant> {
    let repo = ParticipantRepository::new(pool);
    let participant = repo.create(request).await?;

    tracing::info!(participant_id = participant.id, name = %participant.name, "Participant created");
    Ok(participant)
}

/// Change a participant's emoji
pub async fn update_emoji(
    pool: &PgPool,
    id: i32,
    request: &UpdateEmojiRequest,
) -> Result<Participant> {
    let repo = ParticipantRepository::new(pool);
    repo.update_emoji(id, request.emoji.trim()).await
}

/// Delete a participant together with their submissions
pub async fn delete_participant(pool: &PgPool, id: i32) -> Result<()> {
    let repo = ParticipantRepository::new(pool);
    repo.delete(id).await?;

    tracing::info!(participant_id = id, "Participant deleted");
    Ok(())
}

/// One page of a participant's submissions and the total number they made
pub async fn list_participant_submissions(
    pool: &PgPool,
    id: i32,
    pagination: &PaginationParams,
) -> Result<(Vec<Submission>, i64)> {
    ParticipantRepository::new(pool).find_by_id(id).await?;

    let repo = SubmissionRepository::new(pool);
    let submissions = repo.list_for_participant_paginated(id, pagination).await?;
    let total = repo.count_for_participant(id).await?;

    Ok((submissions, total))
}
