use sqlx::PgPool;
use storage::{
    dto::submission::{
        CalendarQuery, CalendarResponse, CreateSubmissionRequest, SubmissionWithParticipant,
    },
    error::Result,
    models::{DateRange, Submission},
    repository::{participant::ParticipantRepository, submission::SubmissionRepository},
    services::calendar,
};

/// Log a TIL link for an existing participant
pub async fn create_submission(
    pool: &PgPool,
    request: &CreateSubmissionRequest,
) -> Result<Submission> {
    ParticipantRepository::new(pool)
        .find_by_id(request.participant_id)
        .await?;

    let submission = SubmissionRepository::new(pool).create(request).await?;

    tracing::info!(
        submission_id = submission.id,
        participant_id = submission.participant_id,
        local_date = %submission.local_date(),
        "Submission created"
    );
    Ok(submission)
}

/// Submissions whose KST date falls within the range
pub async fn list_submissions(pool: &PgPool, range: DateRange) -> Result<Vec<Submission>> {
    let repo = SubmissionRepository::new(pool);
    repo.list_in_range(range).await
}

/// Most recent submissions with participant details
pub async fn latest_submissions(
    pool: &PgPool,
    limit: u32,
) -> Result<Vec<SubmissionWithParticipant>> {
    let repo = SubmissionRepository::new(pool);
    repo.latest(limit).await
}

/// A month of submissions grouped by KST day
pub async fn month_calendar(
    pool: &PgPool,
    query: &CalendarQuery,
    range: DateRange,
) -> Result<CalendarResponse> {
    let participants = ParticipantRepository::new(pool).list().await?;
    let submissions = SubmissionRepository::new(pool).list_in_range(range).await?;

    Ok(CalendarResponse {
        year: query.year,
        month: query.month,
        days: calendar::group_by_day(submissions, &participants, query.participant_id),
    })
}

/// Delete a single submission
pub async fn delete_submission(pool: &PgPool, id: i32) -> Result<()> {
    let repo = SubmissionRepository::new(pool);
    repo.delete(id).await?;

    tracing::info!(submission_id = id, "Submission deleted");
    Ok(())
}
