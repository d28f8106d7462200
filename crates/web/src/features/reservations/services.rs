use uuid::Uuid;

use storage::error::Result;
use storage::models::{Reservation, ReservationStatus};
use storage::repository::reservations::ReservationRepository;
use storage::services::{checkout, reservation_status};

use crate::state::AppState;

/// Turn the user's cart into a reservation
pub fn create_from_cart(state: &AppState, user_id: Uuid) -> Result<Reservation> {
    checkout::create_reservation_from_cart(&state.store, state.alerts(), state.clock(), user_id)
}

/// Get reservation by id
pub fn get_reservation(state: &AppState, reservation_id: Uuid) -> Result<Reservation> {
    ReservationRepository::new(&state.store).find_by_id(reservation_id)
}

/// Apply a manual status transition
pub fn update_status(
    state: &AppState,
    reservation_id: Uuid,
    target: ReservationStatus,
) -> Result<Reservation> {
    reservation_status::transition(&state.store, state.clock(), reservation_id, target)
}

/// Cancel a reservation
pub fn cancel(state: &AppState, reservation_id: Uuid) -> Result<Reservation> {
    reservation_status::cancel(&state.store, state.clock(), reservation_id)
}

/// Run the automatic status evaluation over every non-terminal
/// reservation; returns how many were moved
pub fn evaluate_all(state: &AppState) -> Result<u64> {
    reservation_status::evaluate_all(&state.store, state.clock())
}
