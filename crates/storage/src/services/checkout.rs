use rust_decimal::Decimal;
use uuid::Uuid;

use super::{enrollment, reservation_status};
use crate::Store;
use crate::alerts::{Alert, AlertKind, AlertSink, deliver};
use crate::clock::Clock;
use crate::dto::participant::EnrollParticipantRequest;
use crate::error::{Result, StorageError};
use crate::models::{MatchStatus, Reservation, ReservationLine, ReservationStatus};
use crate::repository::carts::CartRepository;
use crate::repository::matches::MatchRepository;
use crate::repository::reservations::ReservationRepository;
use crate::repository::users::UserRepository;

/// Turns a user's cart into a reservation.
///
/// Every cart line is validated against current match capacity before
/// the reservation is persisted and before any participant is
/// enrolled, so a cart that cannot be satisfied leaves nothing
/// behind. Enrollment itself is a sequence of independent per-match
/// operations rather than one cross-match transaction; if any of them
/// fails, every participant enrolled by this call is withdrawn again,
/// the reservation is cancelled and the cause re-raised.
pub fn create_reservation_from_cart(
    store: &Store,
    alerts: &dyn AlertSink,
    clock: &dyn Clock,
    user_id: Uuid,
) -> Result<Reservation> {
    let user = UserRepository::new(store).find_by_id(user_id)?;

    let cart = CartRepository::new(store).get(user_id);
    if cart.is_empty() {
        return Err(StorageError::BusinessRule(format!(
            "cart for user \"{}\" is empty",
            user.name
        )));
    }

    // Validate every line up front: no reservation record and no
    // enrollment exists until the whole cart has passed.
    let match_repo = MatchRepository::new(store);
    for line in &cart {
        if line.quantity < 1 {
            return Err(StorageError::Validation(format!(
                "cart line for match {} has non-positive quantity {}",
                line.match_id, line.quantity
            )));
        }
        let m = match_repo.find_by_id(line.match_id)?;
        if m.status != MatchStatus::Available {
            return Err(StorageError::BusinessRule(format!(
                "match \"{}\" is not available (status {})",
                m.title, m.status
            )));
        }
        if line.quantity > m.remaining_slots() {
            return Err(StorageError::BusinessRule(format!(
                "match \"{}\" has {} slot(s) left, {} requested",
                m.title,
                m.remaining_slots(),
                line.quantity
            )));
        }
        if m.price.is_none() {
            tracing::warn!(match_id = %m.match_id, "match has no price; reservation line will be free");
        }
    }

    let now = clock.now();
    let reservation = Reservation {
        reservation_id: Uuid::new_v4(),
        user_id,
        status: ReservationStatus::Pending,
        lines: cart
            .iter()
            .map(|line| ReservationLine {
                match_id: line.match_id,
                quantity: line.quantity,
            })
            .collect(),
        created_at: now,
        updated_at: now,
        version: 0,
    };
    let reservation = ReservationRepository::new(store).create(reservation)?;

    // Enroll one participant per claimed slot, with names derived
    // from the user and a running index across the whole call.
    let mut enrolled: Vec<(Uuid, Uuid)> = Vec::new();
    let mut failure: Option<StorageError> = None;
    let mut index = 1;
    'lines: for line in &reservation.lines {
        for _ in 0..line.quantity {
            let req = EnrollParticipantRequest::named(format!("{} {}", user.name, index));
            match enrollment::enroll_participant(store, alerts, clock, line.match_id, &req) {
                Ok(p) => {
                    enrolled.push((line.match_id, p.participant_id));
                    index += 1;
                }
                Err(e) => {
                    failure = Some(e);
                    break 'lines;
                }
            }
        }
    }

    if let Some(cause) = failure {
        compensate(store, clock, &reservation, &enrolled);
        return Err(StorageError::BusinessRule(format!(
            "reservation could not be completed: {cause}"
        )));
    }

    let mut confirmed = reservation_status::transition(
        store,
        clock,
        reservation.reservation_id,
        ReservationStatus::Confirmed,
    )?;

    for line in &confirmed.lines {
        deliver(
            alerts,
            Alert {
                kind: AlertKind::ReservationConfirmed,
                message: format!(
                    "Reservation {} confirmed: {} slot(s) in match {}",
                    confirmed.reservation_id, line.quantity, line.match_id
                ),
                user_id: Some(user_id),
                match_id: Some(line.match_id),
            },
        );
    }

    if reservation_status::evaluate_automatic(store, clock, confirmed.reservation_id)?.is_some() {
        confirmed = ReservationRepository::new(store).find_by_id(confirmed.reservation_id)?;
    }

    CartRepository::new(store).clear(user_id);
    Ok(confirmed)
}

/// Rolls a failed checkout back: withdraws every participant the call
/// enrolled, then cancels the reservation record. Rollback errors are
/// logged, not propagated, so the original cause reaches the caller.
fn compensate(
    store: &Store,
    clock: &dyn Clock,
    reservation: &Reservation,
    enrolled: &[(Uuid, Uuid)],
) {
    for (match_id, participant_id) in enrolled.iter().rev() {
        if let Err(e) = enrollment::withdraw_participant(store, *match_id, *participant_id) {
            tracing::error!(
                match_id = %match_id,
                participant_id = %participant_id,
                error = %e,
                "failed to roll back enrollment after checkout failure"
            );
        }
    }
    if let Err(e) = reservation_status::cancel(store, clock, reservation.reservation_id) {
        tracing::error!(
            reservation_id = %reservation.reservation_id,
            error = %e,
            "failed to cancel reservation after checkout failure"
        );
    }
}

/// Sums price × quantity over the user's CONFIRMED and FINISHED
/// reservations. Matches without a price contribute zero.
pub fn total_spent_by_user(store: &Store, user_id: Uuid) -> Result<Decimal> {
    UserRepository::new(store).find_by_id(user_id)?;

    let match_repo = MatchRepository::new(store);
    let mut total = Decimal::ZERO;
    for reservation in ReservationRepository::new(store).list_by_user(user_id) {
        if !matches!(
            reservation.status,
            ReservationStatus::Confirmed | ReservationStatus::Finished
        ) {
            continue;
        }
        for line in &reservation.lines {
            let m = match_repo.find_by_id(line.match_id)?;
            if let Some(price) = m.price {
                total += price * Decimal::from(line.quantity);
            }
        }
    }
    Ok(total)
}
