use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::submission::{
        CalendarQuery, CalendarResponse, CreateSubmissionRequest, LatestSubmissionsQuery,
        SubmissionRangeQuery, SubmissionResponse, SubmissionWithParticipant,
    },
};
use validator::Validate;

use crate::error::{WebError, WebResult};

use super::services;

#[utoipa::path(
    post,
    path = "/api/submissions",
    request_body = CreateSubmissionRequest,
    responses(
        (status = 201, description = "Submission recorded", body = SubmissionResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Participant not found")
    ),
    tag = "submissions"
)]
pub async fn create_submission(
    State(db): State<Database>,
    Json(req): Json<CreateSubmissionRequest>,
) -> WebResult<Response> {
    req.validate()?;

    let submission = services::create_submission(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(SubmissionResponse::from(submission))).into_response())
}

#[utoipa::path(
    get,
    path = "/api/submissions",
    params(SubmissionRangeQuery),
    responses(
        (status = 200, description = "Submissions in the date range, oldest first", body = Vec<SubmissionResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "submissions"
)]
pub async fn list_submissions(
    State(db): State<Database>,
    Query(query): Query<SubmissionRangeQuery>,
) -> WebResult<Response> {
    query.validate().map_err(WebError::BadRequest)?;

    let submissions = services::list_submissions(db.pool(), query.range()).await?;

    let response: Vec<SubmissionResponse> = submissions
        .into_iter()
        .map(SubmissionResponse::from)
        .collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/submissions/latest",
    params(LatestSubmissionsQuery),
    responses(
        (status = 200, description = "Most recent submissions", body = Vec<SubmissionWithParticipant>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "submissions"
)]
pub async fn latest_submissions(
    State(db): State<Database>,
    Query(query): Query<LatestSubmissionsQuery>,
) -> WebResult<Response> {
    query.validate().map_err(WebError::BadRequest)?;

    let submissions = services::latest_submissions(db.pool(), query.limit).await?;

    Ok(Json(submissions).into_response())
}

#[utoipa::path(
    get,
    path = "/api/submissions/calendar",
    params(CalendarQuery),
    responses(
        (status = 200, description = "Submissions of the month grouped by day", body = CalendarResponse),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "submissions"
)]
pub async fn month_calendar(
    State(db): State<Database>,
    Query(query): Query<CalendarQuery>,
) -> WebResult<Response> {
    let range = query.range().map_err(WebError::BadRequest)?;

    let calendar = services::month_calendar(db.pool(), &query, range).await?;

    Ok(Json(calendar).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/submissions/{id}",
    params(
        ("id" = i32, Path, description = "Submission ID")
    ),
    responses(
        (status = 204, description = "Submission deleted"),
        (status = 404, description = "Submission not found")
    ),
    tag = "submissions"
)]
pub async fn delete_submission(
    State(db): State<Database>,
    Path(id): Path<i32>,
) -> WebResult<Response> {
    services::delete_submission(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
