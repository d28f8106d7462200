use axum::{
    Router,
    routing::{delete, get, post},
};

use super::handlers::{delete_teams, generate_teams, get_teams};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(generate_teams))
        .route("/", get(get_teams))
        .route("/", delete(delete_teams))
}
