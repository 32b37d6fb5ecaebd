use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::fine::{
        CumulativeFinesResponse, FineHistoryQuery, FineHistoryResponse, FineQuery, FineRules,
        FineStatusResponse, LeaderboardQuery, LeaderboardResponse, ParticipantFineHistory,
    },
    models::week,
};

use crate::config::LedgerSettings;
use crate::error::{WebError, WebResult};

use super::services;

#[utoipa::path(
    get,
    path = "/api/fines/status",
    params(FineQuery),
    responses(
        (status = 200, description = "Fines of the last completed week", body = FineStatusResponse),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "fines"
)]
pub async fn get_status(
    State(db): State<Database>,
    State(settings): State<LedgerSettings>,
    Query(query): Query<FineQuery>,
) -> WebResult<Response> {
    query
        .validate(settings.history_start)
        .map_err(WebError::BadRequest)?;

    let anchor = query.today.unwrap_or_else(week::today_local);

    let status = services::fine_status(db.pool(), settings, anchor).await?;

    Ok(Json(status).into_response())
}

#[utoipa::path(
    get,
    path = "/api/fines/history",
    params(FineHistoryQuery),
    responses(
        (status = 200, description = "Trailing completed weeks, oldest first", body = FineHistoryResponse),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "fines"
)]
pub async fn get_history(
    State(db): State<Database>,
    State(settings): State<LedgerSettings>,
    Query(query): Query<FineHistoryQuery>,
) -> WebResult<Response> {
    query
        .validate(settings.history_start)
        .map_err(WebError::BadRequest)?;

    let anchor = query.today.unwrap_or_else(week::today_local);
    let weeks = query.weeks.unwrap_or(settings.history_weeks);

    let history = services::fine_history(db.pool(), anchor, weeks).await?;

    Ok(Json(history).into_response())
}

#[utoipa::path(
    get,
    path = "/api/fines/cumulative",
    params(FineQuery),
    responses(
        (status = 200, description = "Fines accumulated since the history start", body = CumulativeFinesResponse),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "fines"
)]
pub async fn get_cumulative(
    State(db): State<Database>,
    State(settings): State<LedgerSettings>,
    Query(query): Query<FineQuery>,
) -> WebResult<Response> {
    query
        .validate(settings.history_start)
        .map_err(WebError::BadRequest)?;

    let anchor = query.today.unwrap_or_else(week::today_local);

    let cumulative = services::cumulative_fines(db.pool(), settings, anchor).await?;

    Ok(Json(cumulative).into_response())
}

#[utoipa::path(
    get,
    path = "/api/fines/leaderboard",
    params(LeaderboardQuery),
    responses(
        (status = 200, description = "Submission ranking for the selected week", body = LeaderboardResponse),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "fines"
)]
pub async fn get_leaderboard(
    State(db): State<Database>,
    State(settings): State<LedgerSettings>,
    Query(query): Query<LeaderboardQuery>,
) -> WebResult<Response> {
    query
        .validate(settings.history_start)
        .map_err(WebError::BadRequest)?;

    let anchor = query.today.unwrap_or_else(week::today_local);

    let leaderboard =
        services::leaderboard(db.pool(), settings, anchor, query.week_offset).await?;

    Ok(Json(leaderboard).into_response())
}

#[utoipa::path(
    get,
    path = "/api/fines/rules",
    responses(
        (status = 200, description = "Fine rules", body = FineRules)
    ),
    tag = "fines"
)]
pub async fn get_rules() -> Json<FineRules> {
    Json(FineRules::default())
}

#[utoipa::path(
    get,
    path = "/api/participants/{id}/fines",
    params(
        ("id" = i32, Path, description = "Participant ID"),
        FineQuery
    ),
    responses(
        (status = 200, description = "Weekly fines of the participant, newest first", body = ParticipantFineHistory),
        (status = 400, description = "Invalid query parameters"),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn get_participant_fines(
    State(db): State<Database>,
    State(settings): State<LedgerSettings>,
    Path(id): Path<i32>,
    Query(query): Query<FineQuery>,
) -> WebResult<Response> {
    query
        .validate(settings.history_start)
        .map_err(WebError::BadRequest)?;

    let anchor = query.today.unwrap_or_else(week::today_local);

    let history = services::participant_fines(db.pool(), settings, id, anchor).await?;

    Ok(Json(history).into_response())
}
