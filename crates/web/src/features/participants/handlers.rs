use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::{PaginatedResponse, PaginationParams},
        participant::{CreateParticipantRequest, ParticipantResponse, UpdateEmojiRequest},
        submission::SubmissionResponse,
    },
};
use validator::Validate;

use crate::error::{WebError, WebResult};

use super::services;

#[utoipa::path(
    get,
    path = "/api/participants",
    responses(
        (status = 200, description = "List all participants successfully", body = Vec<ParticipantResponse>)
    ),
    tag = "participants"
)]
pub async fn list_participants(State(db): State<Database>) -> WebResult<Response> {
    let participants = services::list_participants(db.pool()).await?;

    let response: Vec<ParticipantResponse> = participants
        .into_iter()
        .map(ParticipantResponse::from)
        .collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/participants/{id}",
    params(
        ("id" = i32, Path, description = "Participant ID")
    ),
    responses(
        (status = 200, description = "Participant found", body = ParticipantResponse),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn get_participant(
    State(db): State<Database>,
    Path(id): Path<i32>,
) -> WebResult<Response> {
    let participant = services::get_participant(db.pool(), id).await?;

    Ok(Json(ParticipantResponse::from(participant)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/participants",
    request_body = CreateParticipantRequest,
    responses(
        (status = 201, description = "Participant created successfully", body = ParticipantResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "A participant with this name already exists")
    ),
    tag = "participants"
)]
pub async fn create_participant(
    State(db): State<Database>,
    Json(req): Json<CreateParticipantRequest>,
) -> WebResult<Response> {
    req.validate()?;

    let participant = services::create_participant(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(ParticipantResponse::from(participant))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/participants/{id}/emoji",
    params(
        ("id" = i32, Path, description = "Participant ID")
    ),
    request_body = UpdateEmojiRequest,
    responses(
        (status = 200, description = "Emoji updated successfully", body = ParticipantResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn update_emoji(
    State(db): State<Database>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateEmojiRequest>,
) -> WebResult<Response> {
    req.validate()?;

    let updated = services::update_emoji(db.pool(), id, &req).await?;

    Ok(Json(ParticipantResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/participants/{id}",
    params(
        ("id" = i32, Path, description = "Participant ID")
    ),
    responses(
        (status = 204, description = "Participant and their submissions deleted"),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn delete_participant(
    State(db): State<Database>,
    Path(id): Path<i32>,
) -> WebResult<Response> {
    services::delete_participant(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    get,
    path = "/api/participants/{id}/submissions",
    params(
        ("id" = i32, Path, description = "Participant ID"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Participant submissions, newest first", body = PaginatedResponse<SubmissionResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn list_participant_submissions(
    State(db): State<Database>,
    Path(id): Path<i32>,
    Query(pagination): Query<PaginationParams>,
) -> WebResult<Response> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let (submissions, total_items) =
        services::list_participant_submissions(db.pool(), id, &pagination).await?;

    let data: Vec<SubmissionResponse> = submissions
        .into_iter()
        .map(SubmissionResponse::from)
        .collect();

    Ok(Json(PaginatedResponse::new(data, pagination, total_items)).into_response())
}
