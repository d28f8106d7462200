use rand::SeedableRng;
use rand::rngs::StdRng;
use uuid::Uuid;

use storage::error::Result;
use storage::models::Team;
use storage::services::team_balancer;

use crate::state::AppState;

/// Generate two balanced teams for a match, replacing any previous
/// ones. A seed pins the no-position shuffle for reproducible splits;
/// without one the RNG is seeded from the OS.
pub fn generate(state: &AppState, match_id: Uuid, seed: Option<u64>) -> Result<Vec<Team>> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    team_balancer::generate_teams(&state.store, &mut rng, match_id)
}

/// Get the current teams of a match
pub fn get(state: &AppState, match_id: Uuid) -> Result<Vec<Team>> {
    team_balancer::get_teams(&state.store, match_id)
}

/// Delete the teams of a match
pub fn delete(state: &AppState, match_id: Uuid) -> Result<()> {
    team_balancer::delete_teams(&state.store, match_id)
}
