use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use storage::dto::team::TeamResponse;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[derive(Debug, Deserialize, IntoParams)]
pub struct GenerateTeamsQuery {
    /// Pins the shuffle of participants without a position.
    pub seed: Option<u64>,
}

#[utoipa::path(
    post,
    path = "/api/matches/{match_id}/teams",
    params(
        ("match_id" = Uuid, Path, description = "Match id"),
        GenerateTeamsQuery
    ),
    responses(
        (status = 201, description = "Teams generated", body = Vec<TeamResponse>),
        (status = 404, description = "Match not found"),
        (status = 409, description = "Not enough participants")
    ),
    tag = "teams"
)]
pub async fn generate_teams(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
    Query(query): Query<GenerateTeamsQuery>,
) -> Result<Response, WebError> {
    let teams = services::generate(&state, match_id, query.seed)?;
    let response: Vec<TeamResponse> = teams.into_iter().map(TeamResponse::from).collect();
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/matches/{match_id}/teams",
    params(
        ("match_id" = Uuid, Path, description = "Match id")
    ),
    responses(
        (status = 200, description = "Current teams of the match", body = Vec<TeamResponse>),
        (status = 404, description = "Match not found")
    ),
    tag = "teams"
)]
pub async fn get_teams(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<Json<Vec<TeamResponse>>, WebError> {
    let teams = services::get(&state, match_id)?;
    Ok(Json(teams.into_iter().map(TeamResponse::from).collect()))
}

#[utoipa::path(
    delete,
    path = "/api/matches/{match_id}/teams",
    params(
        ("match_id" = Uuid, Path, description = "Match id")
    ),
    responses(
        (status = 204, description = "Teams deleted"),
        (status = 404, description = "Match not found")
    ),
    tag = "teams"
)]
pub async fn delete_teams(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete(&state, match_id)?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
