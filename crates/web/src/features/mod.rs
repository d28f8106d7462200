pub mod matches;
pub mod participants;
pub mod reservations;
pub mod teams;
pub mod users;

use axum::Router;

use crate::state::AppState;

pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/api/matches", matches::routes::routes())
        .nest(
            "/api/matches/:match_id/participants",
            participants::routes::routes(),
        )
        .nest("/api/matches/:match_id/teams", teams::routes::routes())
        .nest("/api/reservations", reservations::routes::routes())
        .nest("/api/users", users::routes::routes())
}
