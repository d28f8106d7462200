use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::matches::{CreateMatchRequest, MatchResponse, UpdateMatchRequest};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/matches",
    responses(
        (status = 200, description = "List all matches", body = Vec<MatchResponse>)
    ),
    tag = "matches"
)]
pub async fn list_matches(State(state): State<AppState>) -> Result<Json<Vec<MatchResponse>>, WebError> {
    let matches = services::list_matches(&state);
    Ok(Json(matches.into_iter().map(MatchResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/matches/{match_id}",
    params(
        ("match_id" = Uuid, Path, description = "Match id")
    ),
    responses(
        (status = 200, description = "Match found", body = MatchResponse),
        (status = 404, description = "Match not found")
    ),
    tag = "matches"
)]
pub async fn get_match(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let m = services::get_match(&state, match_id)?;
    Ok(Json(MatchResponse::from(m)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/matches",
    request_body = CreateMatchRequest,
    responses(
        (status = 201, description = "Match scheduled", body = MatchResponse),
        (status = 400, description = "Validation error")
    ),
    tag = "matches"
)]
pub async fn create_match(
    State(state): State<AppState>,
    Json(req): Json<CreateMatchRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let m = services::create_match(&state, &req)?;
    Ok((StatusCode::CREATED, Json(MatchResponse::from(m))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/matches/{match_id}",
    params(
        ("match_id" = Uuid, Path, description = "Match id")
    ),
    request_body = UpdateMatchRequest,
    responses(
        (status = 200, description = "Match updated", body = MatchResponse),
        (status = 404, description = "Match not found"),
        (status = 409, description = "Capacity below current occupancy")
    ),
    tag = "matches"
)]
pub async fn update_match(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
    Json(req): Json<UpdateMatchRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let m = services::update_match(&state, match_id, &req)?;
    Ok(Json(MatchResponse::from(m)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/matches/{match_id}",
    params(
        ("match_id" = Uuid, Path, description = "Match id")
    ),
    responses(
        (status = 204, description = "Match deleted"),
        (status = 404, description = "Match not found"),
        (status = 409, description = "Match still referenced")
    ),
    tag = "matches"
)]
pub async fn delete_match(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_match(&state, match_id)?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
