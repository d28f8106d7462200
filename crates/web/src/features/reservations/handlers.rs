use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use storage::dto::reservation::{
    CheckoutRequest, ReservationResponse, UpdateReservationStatusRequest,
};
use uuid::Uuid;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/api/reservations",
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "Cart converted into a reservation", body = ReservationResponse),
        (status = 404, description = "User not found"),
        (status = 409, description = "Empty cart or a cart line cannot be satisfied")
    ),
    tag = "reservations"
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    Json(req): Json<CheckoutRequest>,
) -> Result<Response, WebError> {
    let reservation = services::create_from_cart(&state, req.user_id)?;
    Ok((StatusCode::CREATED, Json(ReservationResponse::from(reservation))).into_response())
}

#[utoipa::path(
    get,
    path = "/api/reservations/{reservation_id}",
    params(
        ("reservation_id" = Uuid, Path, description = "Reservation id")
    ),
    responses(
        (status = 200, description = "Reservation found", body = ReservationResponse),
        (status = 404, description = "Reservation not found")
    ),
    tag = "reservations"
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let reservation = services::get_reservation(&state, reservation_id)?;
    Ok(Json(ReservationResponse::from(reservation)).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/reservations/{reservation_id}/status",
    params(
        ("reservation_id" = Uuid, Path, description = "Reservation id")
    ),
    request_body = UpdateReservationStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ReservationResponse),
        (status = 404, description = "Reservation not found"),
        (status = 409, description = "Illegal transition")
    ),
    tag = "reservations"
)]
pub async fn update_reservation_status(
    State(state): State<AppState>,
    Path(reservation_id): Path<Uuid>,
    Json(req): Json<UpdateReservationStatusRequest>,
) -> Result<Response, WebError> {
    let reservation = services::update_status(&state, reservation_id, req.status)?;
    Ok(Json(ReservationResponse::from(reservation)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/reservations/{reservation_id}/cancel",
    params(
        ("reservation_id" = Uuid, Path, description = "Reservation id")
    ),
    responses(
        (status = 200, description = "Reservation cancelled", body = ReservationResponse),
        (status = 404, description = "Reservation not found"),
        (status = 409, description = "Reservation already terminal")
    ),
    tag = "reservations"
)]
pub async fn cancel_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let reservation = services::cancel(&state, reservation_id)?;
    Ok(Json(ReservationResponse::from(reservation)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/reservations/evaluate",
    responses(
        (status = 200, description = "Automatic evaluation executed")
    ),
    tag = "reservations"
)]
pub async fn evaluate_reservations(State(state): State<AppState>) -> Result<Response, WebError> {
    let updated = services::evaluate_all(&state)?;
    Ok(Json(json!({ "updated": updated })).into_response())
}
