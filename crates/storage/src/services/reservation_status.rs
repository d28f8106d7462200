use chrono::Duration;
use uuid::Uuid;

use super::MAX_COMMIT_ATTEMPTS;
use crate::Store;
use crate::clock::Clock;
use crate::error::{Result, StorageError};
use crate::models::{MatchStatus, Reservation, ReservationStatus};
use crate::repository::matches::MatchRepository;
use crate::repository::reservations::ReservationRepository;

/// Matches kicking off within this window pull a CONFIRMED
/// reservation into IN_PROGRESS.
const IMMINENCE_WINDOW_HOURS: i64 = 24;

/// Legal manual transitions from each status. Terminal statuses allow
/// nothing, not even re-affirming themselves.
pub fn allowed_targets(from: ReservationStatus) -> &'static [ReservationStatus] {
    use ReservationStatus::*;
    match from {
        Pending => &[Confirmed, Cancelled],
        Confirmed => &[InProgress, Cancelled],
        InProgress => &[Finished, Cancelled],
        Finished | Cancelled => &[],
    }
}

fn check_transition(from: ReservationStatus, to: ReservationStatus) -> Result<()> {
    if from.is_terminal() {
        return Err(StorageError::BusinessRule(format!(
            "reservation is {from} and cannot change status"
        )));
    }
    if !allowed_targets(from).contains(&to) {
        return Err(StorageError::BusinessRule(format!(
            "illegal reservation transition {from} -> {to}"
        )));
    }
    Ok(())
}

/// Applies a manual status transition after validating it against the
/// transition table. The check and the write run as one
/// read-validate-commit cycle against the reservation's version
/// counter, so a transition that lost a race is re-validated against
/// the state that beat it.
pub fn transition(
    store: &Store,
    clock: &dyn Clock,
    reservation_id: Uuid,
    target: ReservationStatus,
) -> Result<Reservation> {
    let repo = ReservationRepository::new(store);

    let mut last_conflict = StorageError::ConcurrencyConflict(format!(
        "status change of reservation {reservation_id} kept losing the race"
    ));
    for _ in 0..MAX_COMMIT_ATTEMPTS {
        let mut reservation = repo.find_by_id(reservation_id)?;

        check_transition(reservation.status, target)?;

        reservation.status = target;
        reservation.updated_at = clock.now();
        match repo.commit(reservation) {
            Ok(saved) => return Ok(saved),
            Err(e) if e.is_conflict() => last_conflict = e,
            Err(e) => return Err(e),
        }
    }
    Err(last_conflict)
}

pub fn cancel(store: &Store, clock: &dyn Clock, reservation_id: Uuid) -> Result<Reservation> {
    transition(store, clock, reservation_id, ReservationStatus::Cancelled)
}

/// Time-based evaluation of one non-terminal reservation. When every
/// line's match is FINISHED the reservation converges to FINISHED
/// (this bypasses the manual table); otherwise an imminent kickoff
/// moves a CONFIRMED reservation to IN_PROGRESS. Returns the new
/// status when one was applied.
///
/// Idempotent and safe to run concurrently with manual transitions:
/// every attempt re-reads the current state, and the version-checked
/// commit rejects a write over a reservation somebody else moved in
/// the meantime.
pub fn evaluate_automatic(
    store: &Store,
    clock: &dyn Clock,
    reservation_id: Uuid,
) -> Result<Option<ReservationStatus>> {
    let repo = ReservationRepository::new(store);
    let match_repo = MatchRepository::new(store);

    let mut last_conflict = StorageError::ConcurrencyConflict(format!(
        "automatic evaluation of reservation {reservation_id} kept losing the race"
    ));
    for _ in 0..MAX_COMMIT_ATTEMPTS {
        let mut reservation = repo.find_by_id(reservation_id)?;
        if reservation.status.is_terminal() {
            return Ok(None);
        }

        let now = clock.now();
        let mut all_finished = !reservation.lines.is_empty();
        let mut some_imminent = false;
        for line in &reservation.lines {
            let m = match_repo.find_by_id(line.match_id)?;
            if m.status != MatchStatus::Finished {
                all_finished = false;
            }
            let until_kickoff = m.kickoff_at - now;
            if until_kickoff >= Duration::zero()
                && until_kickoff <= Duration::hours(IMMINENCE_WINDOW_HOURS)
            {
                some_imminent = true;
            }
        }

        let target = if all_finished {
            ReservationStatus::Finished
        } else if some_imminent && reservation.status == ReservationStatus::Confirmed {
            ReservationStatus::InProgress
        } else {
            return Ok(None);
        };

        reservation.status = target;
        reservation.updated_at = now;
        match repo.commit(reservation) {
            Ok(_) => return Ok(Some(target)),
            Err(e) if e.is_conflict() => last_conflict = e,
            Err(e) => return Err(e),
        }
    }
    Err(last_conflict)
}

/// Scheduler entry point: evaluates every non-terminal reservation
/// and returns how many transitions were applied.
pub fn evaluate_all(store: &Store, clock: &dyn Clock) -> Result<u64> {
    let repo = ReservationRepository::new(store);
    let mut updated = 0u64;
    for reservation in repo.list_non_terminal() {
        if evaluate_automatic(store, clock, reservation.reservation_id)?.is_some() {
            updated += 1;
        }
    }
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::services::test_support::ts;

    fn seed_reservation(store: &Store, status: ReservationStatus) -> Uuid {
        let reservation = Reservation {
            reservation_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            status,
            lines: Vec::new(),
            created_at: ts("2026-05-01 10:00:00"),
            updated_at: ts("2026-05-01 10:00:00"),
            version: 0,
        };
        let id = reservation.reservation_id;
        ReservationRepository::new(store)
            .create(reservation)
            .unwrap();
        id
    }

    #[test]
    fn only_listed_transitions_are_legal() {
        use ReservationStatus::*;
        let all = [Pending, Confirmed, InProgress, Finished, Cancelled];
        let clock = FixedClock::at(ts("2026-05-02 10:00:00"));

        for from in all {
            for to in all {
                let store = Store::new();
                let id = seed_reservation(&store, from);
                let outcome = transition(&store, &clock, id, to);
                if allowed_targets(from).contains(&to) {
                    let updated = outcome.unwrap();
                    assert_eq!(updated.status, to);
                } else {
                    assert!(
                        outcome.unwrap_err().is_business_rule(),
                        "{from} -> {to} should be rejected"
                    );
                }
            }
        }
    }

    #[test]
    fn terminal_states_reject_even_their_own_status() {
        let clock = FixedClock::at(ts("2026-05-02 10:00:00"));
        for status in [ReservationStatus::Finished, ReservationStatus::Cancelled] {
            let store = Store::new();
            let id = seed_reservation(&store, status);
            let err = transition(&store, &clock, id, status).unwrap_err();
            assert!(err.is_business_rule());
        }
    }

    #[test]
    fn unknown_reservation_is_not_found() {
        let store = Store::new();
        let clock = FixedClock::at(ts("2026-05-02 10:00:00"));
        let err =
            transition(&store, &clock, Uuid::new_v4(), ReservationStatus::Confirmed).unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[test]
    fn updated_at_moves_with_the_clock() {
        let store = Store::new();
        let id = seed_reservation(&store, ReservationStatus::Pending);
        let clock = FixedClock::at(ts("2026-05-03 09:30:00"));

        let updated = transition(&store, &clock, id, ReservationStatus::Confirmed).unwrap();
        assert_eq!(updated.updated_at, ts("2026-05-03 09:30:00"));
    }
}
