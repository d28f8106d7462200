use uuid::Uuid;

use crate::Store;
use crate::models::Team;

/// Repository for the teams generated for a match. Teams are always
/// written as a complete set per match, never edited in place.
pub struct TeamRepository<'a> {
    store: &'a Store,
}

impl<'a> TeamRepository<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn find_by_match(&self, match_id: Uuid) -> Vec<Team> {
        self.store
            .teams()
            .get(&match_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    pub fn replace_for_match(&self, match_id: Uuid, teams: Vec<Team>) {
        self.store.teams().insert(match_id, teams);
    }

    pub fn delete_for_match(&self, match_id: Uuid) {
        self.store.teams().remove(&match_id);
    }
}
