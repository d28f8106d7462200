use axum::{
    Router,
    routing::{get, post, put},
};

use super::handlers::{create_user, get_cart, get_user, list_users, replace_cart, total_spent};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/", post(create_user))
        .route("/:user_id", get(get_user))
        .route("/:user_id/cart", get(get_cart))
        .route("/:user_id/cart", put(replace_cart))
        .route("/:user_id/total-spent", get(total_spent))
}
