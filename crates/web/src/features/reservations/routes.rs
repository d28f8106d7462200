use axum::{
    Router,
    routing::{get, patch, post},
};

use super::handlers::{
    cancel_reservation, create_reservation, evaluate_reservations, get_reservation,
    update_reservation_status,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_reservation))
        .route("/evaluate", post(evaluate_reservations))
        .route("/:reservation_id", get(get_reservation))
        .route("/:reservation_id/status", patch(update_reservation_status))
        .route("/:reservation_id/cancel", post(cancel_reservation))
}
