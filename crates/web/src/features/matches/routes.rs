use axum::{
    Router,
    routing::{delete, get, post, put},
};

use super::handlers::{create_match, delete_match, get_match, list_matches, update_match};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_matches))
        .route("/", post(create_match))
        .route("/:match_id", get(get_match))
        .route("/:match_id", put(update_match))
        .route("/:match_id", delete(delete_match))
}
