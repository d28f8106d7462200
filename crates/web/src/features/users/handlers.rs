use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::cart::{CartResponse, ReplaceCartRequest};
use storage::dto::reservation::TotalSpentResponse;
use storage::dto::user::{CreateUserRequest, UserResponse};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Validation error")
    ),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let user = services::create_user(&state, &req)?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))).into_response())
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "List all users", body = Vec<UserResponse>)
    ),
    tag = "users"
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, WebError> {
    let users = services::list_users(&state);
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let user = services::get_user(&state, user_id)?;
    Ok(Json(UserResponse::from(user)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/cart",
    params(
        ("user_id" = Uuid, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "The user's current cart", body = CartResponse),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let lines = services::get_cart(&state, user_id)?;
    Ok(Json(CartResponse {
        user_id,
        lines: lines.into_iter().map(Into::into).collect(),
    })
    .into_response())
}

#[utoipa::path(
    put,
    path = "/api/users/{user_id}/cart",
    params(
        ("user_id" = Uuid, Path, description = "User id")
    ),
    request_body = ReplaceCartRequest,
    responses(
        (status = 200, description = "Cart replaced", body = CartResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn replace_cart(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<ReplaceCartRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let lines = services::replace_cart(&state, user_id, &req)?;
    Ok(Json(CartResponse {
        user_id,
        lines: lines.into_iter().map(Into::into).collect(),
    })
    .into_response())
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/total-spent",
    params(
        ("user_id" = Uuid, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Sum of the user's confirmed and finished reservations", body = TotalSpentResponse),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn total_spent(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let total = services::total_spent(&state, user_id)?;
    Ok(Json(TotalSpentResponse { user_id, total }).into_response())
}
