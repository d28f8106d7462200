mod common;

use std::sync::{Arc, Barrier};
use std::thread;

use chrono::Duration;
use uuid::Uuid;

use common::{distant_match, match_record, now, seed_match, seed_user, stage_cart, ts};
use storage::Store;
use storage::alerts::RecordingAlertSink;
use storage::clock::FixedClock;
use storage::models::{MatchStatus, Reservation, ReservationLine, ReservationStatus};
use storage::repository::matches::MatchRepository;
use storage::repository::reservations::ReservationRepository;
use storage::services::{checkout, reservation_status};

fn seed_reservation(store: &Store, status: ReservationStatus, match_ids: &[Uuid]) -> Uuid {
    let reservation = Reservation {
        reservation_id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        status,
        lines: match_ids
            .iter()
            .map(|match_id| ReservationLine {
                match_id: *match_id,
                quantity: 1,
            })
            .collect(),
        created_at: ts("2026-05-01 10:00:00"),
        updated_at: ts("2026-05-01 10:00:00"),
        version: 0,
    };
    let id = reservation.reservation_id;
    ReservationRepository::new(store)
        .create(reservation)
        .expect("seed reservation");
    id
}

fn finish_match(store: &Store, match_id: Uuid) {
    let repo = MatchRepository::new(store);
    let mut m = repo.find_by_id(match_id).expect("match exists");
    m.status = MatchStatus::Finished;
    repo.commit(m).expect("finish match");
}

#[test]
fn imminent_kickoff_moves_confirmed_to_in_progress() {
    let store = Store::new();
    let clock = FixedClock::at(now());

    let soon = seed_match(&store, match_record("Tonight", 10, now() + Duration::hours(10)));
    let id = seed_reservation(&store, ReservationStatus::Confirmed, &[soon]);

    let applied = reservation_status::evaluate_automatic(&store, &clock, id).unwrap();
    assert_eq!(applied, Some(ReservationStatus::InProgress));
}

#[test]
fn imminence_window_is_twenty_four_hours_inclusive() {
    for (offset_hours, expected) in [(24, Some(ReservationStatus::InProgress)), (25, None)] {
        let store = Store::new();
        let clock = FixedClock::at(now());
        let m = seed_match(
            &store,
            match_record("Edge", 10, now() + Duration::hours(offset_hours)),
        );
        let id = seed_reservation(&store, ReservationStatus::Confirmed, &[m]);
        let applied = reservation_status::evaluate_automatic(&store, &clock, id).unwrap();
        assert_eq!(applied, expected, "offset = {offset_hours}h");
    }
}

#[test]
fn already_kicked_off_match_is_not_imminent() {
    let store = Store::new();
    let clock = FixedClock::at(now());
    let m = seed_match(&store, match_record("Earlier", 10, now() - Duration::hours(2)));
    let id = seed_reservation(&store, ReservationStatus::Confirmed, &[m]);
    assert_eq!(
        reservation_status::evaluate_automatic(&store, &clock, id).unwrap(),
        None
    );
}

#[test]
fn imminence_only_moves_confirmed_reservations() {
    let store = Store::new();
    let clock = FixedClock::at(now());
    let m = seed_match(&store, match_record("Tonight", 10, now() + Duration::hours(3)));
    let id = seed_reservation(&store, ReservationStatus::Pending, &[m]);
    assert_eq!(
        reservation_status::evaluate_automatic(&store, &clock, id).unwrap(),
        None
    );
}

#[test]
fn all_matches_finished_converges_from_any_non_terminal_status() {
    for status in [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::InProgress,
    ] {
        let store = Store::new();
        let clock = FixedClock::at(now());
        let first = seed_match(&store, distant_match("First", 10));
        let second = seed_match(&store, distant_match("Second", 10));
        finish_match(&store, first);
        finish_match(&store, second);

        let id = seed_reservation(&store, status, &[first, second]);
        let applied = reservation_status::evaluate_automatic(&store, &clock, id).unwrap();
        assert_eq!(applied, Some(ReservationStatus::Finished), "from {status}");
    }
}

#[test]
fn one_unfinished_match_blocks_convergence() {
    let store = Store::new();
    let clock = FixedClock::at(now());
    let first = seed_match(&store, distant_match("First", 10));
    let second = seed_match(&store, distant_match("Second", 10));
    finish_match(&store, first);

    let id = seed_reservation(&store, ReservationStatus::InProgress, &[first, second]);
    assert_eq!(
        reservation_status::evaluate_automatic(&store, &clock, id).unwrap(),
        None
    );
}

#[test]
fn cancelled_reservations_are_never_resurrected() {
    let store = Store::new();
    let clock = FixedClock::at(now());
    let m = seed_match(&store, distant_match("First", 10));
    finish_match(&store, m);

    let id = seed_reservation(&store, ReservationStatus::Cancelled, &[m]);
    assert_eq!(
        reservation_status::evaluate_automatic(&store, &clock, id).unwrap(),
        None
    );
    let unchanged = ReservationRepository::new(&store).find_by_id(id).unwrap();
    assert_eq!(unchanged.status, ReservationStatus::Cancelled);
}

#[test]
fn bulk_scan_applies_once_then_settles() {
    let store = Store::new();
    let clock = FixedClock::at(now());

    let soon = seed_match(&store, match_record("Tonight", 10, now() + Duration::hours(5)));
    let done = seed_match(&store, distant_match("Done", 10));
    finish_match(&store, done);

    seed_reservation(&store, ReservationStatus::Confirmed, &[soon]);
    seed_reservation(&store, ReservationStatus::InProgress, &[done]);
    seed_reservation(&store, ReservationStatus::Cancelled, &[done]);

    let first_pass = reservation_status::evaluate_all(&store, &clock).unwrap();
    assert_eq!(first_pass, 2);

    // Idempotent: IN_PROGRESS is not moved again by imminence, and
    // finished reservations are terminal.
    let second_pass = reservation_status::evaluate_all(&store, &clock).unwrap();
    assert_eq!(second_pass, 0);
}

#[test]
fn concurrent_cancellation_is_never_overwritten_by_the_scan() {
    // A cancel racing the automatic evaluation on the same CONFIRMED
    // reservation: whoever commits second must see the other's write,
    // so a reservation cancelled with Ok can never end IN_PROGRESS.
    for _ in 0..500 {
        let store = Store::new();
        let soon = seed_match(
            &store,
            match_record("Tonight", 10, now() + Duration::hours(10)),
        );
        let id = seed_reservation(&store, ReservationStatus::Confirmed, &[soon]);

        let barrier = Arc::new(Barrier::new(2));
        let canceller = {
            let store = store.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                reservation_status::cancel(&store, &FixedClock::at(now()), id).is_ok()
            })
        };
        let scanner = {
            let store = store.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                let _ = reservation_status::evaluate_automatic(&store, &FixedClock::at(now()), id);
            })
        };

        scanner.join().expect("scanner thread");
        let cancelled = canceller.join().expect("canceller thread");

        let stored = ReservationRepository::new(&store).find_by_id(id).unwrap();
        if cancelled {
            assert_eq!(stored.status, ReservationStatus::Cancelled);
        }
    }
}

#[test]
fn checkout_against_an_imminent_match_lands_in_progress() {
    let store = Store::new();
    let clock = FixedClock::at(now());
    let alerts = RecordingAlertSink::new();

    let tonight = seed_match(&store, match_record("Tonight", 10, now() + Duration::hours(10)));
    let alice = seed_user(&store, "Alice");
    stage_cart(&store, alice, &[(tonight, 1)]);

    let reservation =
        checkout::create_reservation_from_cart(&store, &alerts, &clock, alice).unwrap();
    assert_eq!(reservation.status, ReservationStatus::InProgress);
}
