use uuid::Uuid;

use crate::Store;
use crate::error::{Result, StorageError};
use crate::models::Reservation;

/// Repository for Reservation records.
///
/// Reads hand out snapshot clones carrying the record's version;
/// writes go through [`commit`](ReservationRepository::commit), which
/// only applies a snapshot if nobody else committed in between.
pub struct ReservationRepository<'a> {
    store: &'a Store,
}

impl<'a> ReservationRepository<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn create(&self, reservation: Reservation) -> Result<Reservation> {
        if self
            .store
            .reservations()
            .contains_key(&reservation.reservation_id)
        {
            return Err(StorageError::BusinessRule(format!(
                "reservation {} already exists",
                reservation.reservation_id
            )));
        }
        self.store
            .reservations()
            .insert(reservation.reservation_id, reservation.clone());
        Ok(reservation)
    }

    pub fn find_by_id(&self, reservation_id: Uuid) -> Result<Reservation> {
        self.store
            .reservations()
            .get(&reservation_id)
            .map(|entry| entry.value().clone())
            .ok_or(StorageError::NotFound)
    }

    /// Apply a mutated snapshot. Fails with `ConcurrencyConflict` if
    /// the stored record moved past the snapshot's version, in which
    /// case the caller should re-read and retry.
    pub fn commit(&self, updated: Reservation) -> Result<Reservation> {
        let mut entry = self
            .store
            .reservations()
            .get_mut(&updated.reservation_id)
            .ok_or(StorageError::NotFound)?;

        if entry.version != updated.version {
            return Err(StorageError::ConcurrencyConflict(format!(
                "reservation {} was modified concurrently",
                updated.reservation_id
            )));
        }

        let mut next = updated;
        next.version += 1;
        *entry = next.clone();
        Ok(next)
    }

    /// All reservations that can still move: input for the periodic
    /// automatic-status scan.
    pub fn list_non_terminal(&self) -> Vec<Reservation> {
        self.store
            .reservations()
            .iter()
            .filter(|entry| !entry.value().status.is_terminal())
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn list_by_user(&self, user_id: Uuid) -> Vec<Reservation> {
        let mut found: Vec<Reservation> = self
            .store
            .reservations()
            .iter()
            .filter(|entry| entry.value().user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        found.sort_by_key(|r| r.created_at);
        found
    }
}
