use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::participant::{EnrollParticipantRequest, ParticipantResponse};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/matches/{match_id}/participants",
    params(
        ("match_id" = Uuid, Path, description = "Match id")
    ),
    responses(
        (status = 200, description = "Participants of the match", body = Vec<ParticipantResponse>),
        (status = 404, description = "Match not found")
    ),
    tag = "participants"
)]
pub async fn list_participants(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<Json<Vec<ParticipantResponse>>, WebError> {
    let participants = services::list(&state, match_id)?;
    Ok(Json(
        participants
            .into_iter()
            .map(ParticipantResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/matches/{match_id}/participants",
    params(
        ("match_id" = Uuid, Path, description = "Match id")
    ),
    request_body = EnrollParticipantRequest,
    responses(
        (status = 201, description = "Participant enrolled", body = ParticipantResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Match not found"),
        (status = 409, description = "Match full, closed or name already taken")
    ),
    tag = "participants"
)]
pub async fn enroll_participant(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
    Json(req): Json<EnrollParticipantRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let participant = services::enroll(&state, match_id, &req)?;
    Ok((StatusCode::CREATED, Json(ParticipantResponse::from(participant))).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/matches/{match_id}/participants/{participant_id}",
    params(
        ("match_id" = Uuid, Path, description = "Match id"),
        ("participant_id" = Uuid, Path, description = "Participant id")
    ),
    responses(
        (status = 204, description = "Participant withdrawn"),
        (status = 404, description = "Match or participant not found"),
        (status = 409, description = "Participant belongs to another match")
    ),
    tag = "participants"
)]
pub async fn withdraw_participant(
    State(state): State<AppState>,
    Path((match_id, participant_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, WebError> {
    services::withdraw(&state, match_id, participant_id)?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
