use axum::{
    Router,
    routing::{delete, get, post},
};

use super::handlers::{enroll_participant, list_participants, withdraw_participant};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_participants))
        .route("/", post(enroll_participant))
        .route("/:participant_id", delete(withdraw_participant))
}
