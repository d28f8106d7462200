use uuid::Uuid;

use storage::dto::matches::{CreateMatchRequest, UpdateMatchRequest};
use storage::error::Result;
use storage::models::Match;
use storage::repository::matches::MatchRepository;
use storage::services::matches;

use crate::state::AppState;

/// List all matches
pub fn list_matches(state: &AppState) -> Vec<Match> {
    MatchRepository::new(&state.store).list()
}

/// Get match by id
pub fn get_match(state: &AppState, match_id: Uuid) -> Result<Match> {
    MatchRepository::new(&state.store).find_by_id(match_id)
}

/// Schedule a new match
pub fn create_match(state: &AppState, request: &CreateMatchRequest) -> Result<Match> {
    matches::create_match(&state.store, state.alerts(), state.clock(), request)
}

/// Update a match
pub fn update_match(state: &AppState, match_id: Uuid, request: &UpdateMatchRequest) -> Result<Match> {
    matches::update_match(&state.store, state.alerts(), match_id, request)
}

/// Delete a match
pub fn delete_match(state: &AppState, match_id: Uuid) -> Result<()> {
    matches::delete_match(&state.store, match_id)
}
