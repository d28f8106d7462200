use uuid::Uuid;

use super::{MAX_COMMIT_ATTEMPTS, capacity};
use crate::Store;
use crate::alerts::AlertSink;
use crate::clock::Clock;
use crate::dto::participant::EnrollParticipantRequest;
use crate::error::{Result, StorageError};
use crate::models::{MatchStatus, Participant};
use crate::repository::matches::MatchRepository;

/// Enrolls a participant into a match.
///
/// The capacity check and the insert run as one read-validate-commit
/// cycle against the match's version counter, so two racing
/// enrollments can never both take the last slot; the loser re-reads
/// and retries, and only persistent contention surfaces as
/// `ConcurrencyConflict`.
pub fn enroll_participant(
    store: &Store,
    alerts: &dyn AlertSink,
    clock: &dyn Clock,
    match_id: Uuid,
    req: &EnrollParticipantRequest,
) -> Result<Participant> {
    let repo = MatchRepository::new(store);

    let mut last_conflict = StorageError::ConcurrencyConflict(format!(
        "enrollment into match {match_id} kept losing the capacity race"
    ));
    for _ in 0..MAX_COMMIT_ATTEMPTS {
        let mut m = repo.find_by_id(match_id)?;

        if m.status != MatchStatus::Available {
            return Err(StorageError::BusinessRule(format!(
                "match \"{}\" is not open for enrollment (status {})",
                m.title, m.status
            )));
        }
        if m.occupancy() >= m.max_players {
            return Err(StorageError::BusinessRule(format!(
                "match \"{}\" is already at capacity ({})",
                m.title, m.max_players
            )));
        }
        if m.has_participant_named(&req.display_name) {
            return Err(StorageError::BusinessRule(format!(
                "participant \"{}\" is already enrolled in match \"{}\"",
                req.display_name, m.title
            )));
        }

        let participant = Participant {
            participant_id: Uuid::new_v4(),
            display_name: req.display_name.clone(),
            nickname: req.nickname.clone(),
            position: req.position,
            skill_level: req.skill_level,
            enrolled_at: clock.now(),
        };
        m.participants.push(participant.clone());
        capacity::recompute_status(&mut m);

        match repo.commit(m) {
            Ok(saved) => {
                capacity::notify_low_capacity(alerts, &saved);
                return Ok(participant);
            }
            Err(e) if e.is_conflict() => last_conflict = e,
            Err(e) => return Err(e),
        }
    }
    Err(last_conflict)
}

/// Removes a participant from a match and recomputes its status.
pub fn withdraw_participant(store: &Store, match_id: Uuid, participant_id: Uuid) -> Result<()> {
    let repo = MatchRepository::new(store);

    let mut last_conflict = StorageError::ConcurrencyConflict(format!(
        "withdrawal from match {match_id} kept losing the race"
    ));
    for _ in 0..MAX_COMMIT_ATTEMPTS {
        let mut m = repo.find_by_id(match_id)?;

        let Some(index) = m.participant_index(participant_id) else {
            return Err(withdraw_lookup_failure(store, match_id, participant_id));
        };
        m.participants.remove(index);
        capacity::recompute_status(&mut m);

        match repo.commit(m) {
            Ok(_) => return Ok(()),
            Err(e) if e.is_conflict() => last_conflict = e,
            Err(e) => return Err(e),
        }
    }
    Err(last_conflict)
}

pub fn list_participants(store: &Store, match_id: Uuid) -> Result<Vec<Participant>> {
    Ok(MatchRepository::new(store)
        .find_by_id(match_id)?
        .participants)
}

/// A withdrawal that misses its participant is `NotFound` for an
/// unknown id but a business-rule violation when the participant is
/// enrolled in a different match.
fn withdraw_lookup_failure(store: &Store, match_id: Uuid, participant_id: Uuid) -> StorageError {
    let enrolled_elsewhere = MatchRepository::new(store)
        .list()
        .iter()
        .any(|m| m.match_id != match_id && m.participant_index(participant_id).is_some());
    if enrolled_elsewhere {
        StorageError::BusinessRule(format!(
            "participant {participant_id} does not belong to match {match_id}"
        ))
    } else {
        StorageError::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::{AlertKind, RecordingAlertSink};
    use crate::clock::FixedClock;
    use crate::services::test_support::{match_with_capacity, seed_match, ts};

    fn request(name: &str) -> EnrollParticipantRequest {
        EnrollParticipantRequest::named(name.to_string())
    }

    fn fixture() -> (Store, RecordingAlertSink, FixedClock) {
        (
            Store::new(),
            RecordingAlertSink::new(),
            FixedClock::at(ts("2026-05-20 12:00:00")),
        )
    }

    #[test]
    fn enrolls_until_full_then_rejects() {
        let (store, alerts, clock) = fixture();
        let match_id = seed_match(&store, match_with_capacity("Sunday kickabout", 2));

        enroll_participant(&store, &alerts, &clock, match_id, &request("Ada")).unwrap();
        enroll_participant(&store, &alerts, &clock, match_id, &request("Grace")).unwrap();

        let m = MatchRepository::new(&store).find_by_id(match_id).unwrap();
        assert_eq!(m.status, MatchStatus::Full);

        let err = enroll_participant(&store, &alerts, &clock, match_id, &request("Edsger"))
            .unwrap_err();
        assert!(err.is_business_rule(), "got {err:?}");
    }

    #[test]
    fn rejects_duplicate_display_name() {
        let (store, alerts, clock) = fixture();
        let match_id = seed_match(&store, match_with_capacity("Sunday kickabout", 5));

        enroll_participant(&store, &alerts, &clock, match_id, &request("Ada")).unwrap();
        let err =
            enroll_participant(&store, &alerts, &clock, match_id, &request("Ada")).unwrap_err();
        assert!(err.is_business_rule());
    }

    #[test]
    fn unknown_match_is_not_found() {
        let (store, alerts, clock) = fixture();
        let err = enroll_participant(&store, &alerts, &clock, Uuid::new_v4(), &request("Ada"))
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[test]
    fn eighth_of_ten_triggers_exactly_one_low_capacity_alert() {
        let (store, _, clock) = fixture();
        let match_id = seed_match(&store, match_with_capacity("League night", 10));

        let quiet = RecordingAlertSink::new();
        for i in 1..=7 {
            enroll_participant(&store, &quiet, &clock, match_id, &request(&format!("P{i}")))
                .unwrap();
        }

        let sink = RecordingAlertSink::new();
        enroll_participant(&store, &sink, &clock, match_id, &request("P8")).unwrap();
        assert_eq!(sink.count_of(AlertKind::LowCapacity), 1);
    }

    #[test]
    fn no_alert_while_remaining_above_band() {
        let (store, _, clock) = fixture();
        let match_id = seed_match(&store, match_with_capacity("League night", 10));

        let sink = RecordingAlertSink::new();
        for i in 1..=4 {
            enroll_participant(&store, &sink, &clock, match_id, &request(&format!("P{i}")))
                .unwrap();
        }
        // 6 slots remain, above the [1, 5] band
        assert_eq!(sink.count_of(AlertKind::LowCapacity), 0);
    }

    /// Commits a competing update to the match every time the time is
    /// read, so the enrolling caller's commit loses on every attempt.
    struct ContendedClock<'a> {
        store: &'a Store,
        match_id: Uuid,
    }

    impl Clock for ContendedClock<'_> {
        fn now(&self) -> chrono::NaiveDateTime {
            let repo = MatchRepository::new(self.store);
            if let Ok(m) = repo.find_by_id(self.match_id) {
                let _ = repo.commit(m);
            }
            ts("2026-05-20 12:00:00")
        }
    }

    #[test]
    fn persistent_contention_surfaces_a_concurrency_conflict() {
        let (store, alerts, _) = fixture();
        let match_id = seed_match(&store, match_with_capacity("Contested", 5));

        let clock = ContendedClock {
            store: &store,
            match_id,
        };
        let err =
            enroll_participant(&store, &alerts, &clock, match_id, &request("Ada")).unwrap_err();
        assert!(err.is_conflict(), "got {err:?}");

        let m = MatchRepository::new(&store).find_by_id(match_id).unwrap();
        assert_eq!(m.occupancy(), 0);
    }

    #[test]
    fn withdraw_reopens_a_full_match() {
        let (store, alerts, clock) = fixture();
        let match_id = seed_match(&store, match_with_capacity("Sunday kickabout", 2));

        let p = enroll_participant(&store, &alerts, &clock, match_id, &request("Ada")).unwrap();
        enroll_participant(&store, &alerts, &clock, match_id, &request("Grace")).unwrap();

        withdraw_participant(&store, match_id, p.participant_id).unwrap();
        let m = MatchRepository::new(&store).find_by_id(match_id).unwrap();
        assert_eq!(m.status, MatchStatus::Available);
        assert_eq!(m.occupancy(), 1);
    }

    #[test]
    fn withdraw_from_wrong_match_is_a_business_rule_violation() {
        let (store, alerts, clock) = fixture();
        let first = seed_match(&store, match_with_capacity("First", 5));
        let second = seed_match(&store, match_with_capacity("Second", 5));

        let p = enroll_participant(&store, &alerts, &clock, first, &request("Ada")).unwrap();
        let err = withdraw_participant(&store, second, p.participant_id).unwrap_err();
        assert!(err.is_business_rule());
    }

    #[test]
    fn withdraw_unknown_participant_is_not_found() {
        let (store, _, _) = fixture();
        let match_id = seed_match(&store, match_with_capacity("First", 5));
        let err = withdraw_participant(&store, match_id, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }
}
