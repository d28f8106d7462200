use uuid::Uuid;

use crate::Store;
use crate::error::{Result, StorageError};
use crate::models::Match;

/// Repository for Match records.
///
/// Reads hand out snapshot clones carrying the record's version;
/// writes go through [`commit`](MatchRepository::commit), which only
/// applies a snapshot if nobody else committed in between. Services
/// that mutate a match therefore run read-validate-commit loops.
pub struct MatchRepository<'a> {
    store: &'a Store,
}

impl<'a> MatchRepository<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// List all matches, soonest kickoff first.
    pub fn list(&self) -> Vec<Match> {
        let mut all: Vec<Match> = self
            .store
            .matches()
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by_key(|m| m.kickoff_at);
        all
    }

    /// Get a snapshot of a match by id.
    pub fn find_by_id(&self, match_id: Uuid) -> Result<Match> {
        self.store
            .matches()
            .get(&match_id)
            .map(|entry| entry.value().clone())
            .ok_or(StorageError::NotFound)
    }

    /// Insert a brand-new match record.
    pub fn insert(&self, m: Match) -> Result<Match> {
        if self.store.matches().contains_key(&m.match_id) {
            return Err(StorageError::BusinessRule(format!(
                "match {} already exists",
                m.match_id
            )));
        }
        self.store.matches().insert(m.match_id, m.clone());
        Ok(m)
    }

    /// Apply a mutated snapshot. Fails with `ConcurrencyConflict` if
    /// the stored record moved past the snapshot's version, in which
    /// case the caller should re-read and retry.
    pub fn commit(&self, updated: Match) -> Result<Match> {
        let mut entry = self
            .store
            .matches()
            .get_mut(&updated.match_id)
            .ok_or(StorageError::NotFound)?;

        if entry.version != updated.version {
            return Err(StorageError::ConcurrencyConflict(format!(
                "match {} was modified concurrently",
                updated.match_id
            )));
        }

        let mut next = updated;
        next.version += 1;
        *entry = next.clone();
        Ok(next)
    }

    /// Delete a match. Refused while participants are enrolled or any
    /// reservation line or team still references it.
    pub fn delete(&self, match_id: Uuid) -> Result<()> {
        let m = self.find_by_id(match_id)?;

        if !m.participants.is_empty() {
            return Err(StorageError::BusinessRule(format!(
                "match \"{}\" still has {} enrolled participant(s)",
                m.title,
                m.participants.len()
            )));
        }

        let referenced_by_reservation = self.store.reservations().iter().any(|entry| {
            entry
                .value()
                .lines
                .iter()
                .any(|line| line.match_id == match_id)
        });
        if referenced_by_reservation {
            return Err(StorageError::BusinessRule(format!(
                "match \"{}\" is referenced by at least one reservation",
                m.title
            )));
        }

        let has_teams = self
            .store
            .teams()
            .get(&match_id)
            .map(|teams| !teams.is_empty())
            .unwrap_or(false);
        if has_teams {
            return Err(StorageError::BusinessRule(format!(
                "match \"{}\" still has generated teams",
                m.title
            )));
        }

        self.store
            .matches()
            .remove(&match_id)
            .ok_or(StorageError::NotFound)?;
        Ok(())
    }
}
