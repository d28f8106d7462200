use uuid::Uuid;

use super::{MAX_COMMIT_ATTEMPTS, capacity};
use crate::Store;
use crate::alerts::AlertSink;
use crate::clock::Clock;
use crate::dto::matches::{CreateMatchRequest, UpdateMatchRequest};
use crate::error::{Result, StorageError};
use crate::models::{Match, MatchStatus};
use crate::repository::matches::MatchRepository;

/// Schedules a new match. The low-capacity alert rule applies from
/// creation: a freshly created match whose capacity already sits in
/// the alert band fires immediately.
pub fn create_match(
    store: &Store,
    alerts: &dyn AlertSink,
    clock: &dyn Clock,
    req: &CreateMatchRequest,
) -> Result<Match> {
    if !(1..=50).contains(&req.max_players) {
        return Err(StorageError::Validation(format!(
            "capacity must be between 1 and 50, got {}",
            req.max_players
        )));
    }
    if req.auto_generated && req.max_players % 2 != 0 {
        return Err(StorageError::Validation(format!(
            "auto-generated matches need an even capacity, got {}",
            req.max_players
        )));
    }
    let now = clock.now();
    if req.kickoff_at <= now {
        return Err(StorageError::Validation(
            "kickoff must be in the future".to_string(),
        ));
    }

    let m = MatchRepository::new(store).insert(Match {
        match_id: Uuid::new_v4(),
        title: req.title.clone(),
        kickoff_at: req.kickoff_at,
        max_players: req.max_players,
        status: MatchStatus::Available,
        price: req.price,
        participants: Vec::new(),
        created_at: now,
        version: 0,
    })?;
    capacity::notify_low_capacity(alerts, &m);
    Ok(m)
}

/// Updates a match. Capacity may grow or shrink but never below the
/// current occupancy; status can only be set to FINISHED or
/// CANCELLED by hand, the AVAILABLE ⇄ FULL edge is recomputed here.
pub fn update_match(
    store: &Store,
    alerts: &dyn AlertSink,
    match_id: Uuid,
    req: &UpdateMatchRequest,
) -> Result<Match> {
    let repo = MatchRepository::new(store);

    let mut last_conflict = StorageError::ConcurrencyConflict(format!(
        "update of match {match_id} kept losing the race"
    ));
    for _ in 0..MAX_COMMIT_ATTEMPTS {
        let mut m = repo.find_by_id(match_id)?;
        let capacity_before = m.max_players;

        if let Some(title) = &req.title {
            m.title = title.clone();
        }
        if let Some(kickoff_at) = req.kickoff_at {
            m.kickoff_at = kickoff_at;
        }
        if let Some(max_players) = req.max_players {
            if !(1..=50).contains(&max_players) {
                return Err(StorageError::Validation(format!(
                    "capacity must be between 1 and 50, got {max_players}"
                )));
            }
            if max_players < m.occupancy() {
                return Err(StorageError::BusinessRule(format!(
                    "capacity {} would drop below the {} enrolled participant(s) of match \"{}\"",
                    max_players,
                    m.occupancy(),
                    m.title
                )));
            }
            m.max_players = max_players;
        }
        if let Some(price) = req.price {
            m.price = Some(price);
        }
        if let Some(status) = req.status {
            if !status.is_terminal() {
                return Err(StorageError::Validation(format!(
                    "status {status} cannot be set manually"
                )));
            }
            if m.status.is_terminal() && m.status != status {
                return Err(StorageError::BusinessRule(format!(
                    "match \"{}\" is already {}",
                    m.title, m.status
                )));
            }
            m.status = status;
        }

        capacity::recompute_status(&mut m);

        match repo.commit(m) {
            Ok(saved) => {
                if saved.max_players != capacity_before {
                    capacity::notify_low_capacity(alerts, &saved);
                }
                return Ok(saved);
            }
            Err(e) if e.is_conflict() => last_conflict = e,
            Err(e) => return Err(e),
        }
    }
    Err(last_conflict)
}

pub fn delete_match(store: &Store, match_id: Uuid) -> Result<()> {
    MatchRepository::new(store).delete(match_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::{AlertKind, RecordingAlertSink};
    use crate::clock::FixedClock;
    use crate::dto::participant::EnrollParticipantRequest;
    use crate::services::enrollment;
    use crate::services::test_support::ts;

    fn fixture() -> (Store, RecordingAlertSink, FixedClock) {
        (
            Store::new(),
            RecordingAlertSink::new(),
            FixedClock::at(ts("2026-05-20 12:00:00")),
        )
    }

    fn create_request(max_players: i32) -> CreateMatchRequest {
        CreateMatchRequest {
            title: "Evening friendly".to_string(),
            kickoff_at: ts("2026-06-20 19:00:00"),
            max_players,
            price: None,
            auto_generated: false,
        }
    }

    #[test]
    fn rejects_past_kickoff() {
        let (store, alerts, clock) = fixture();
        let mut req = create_request(10);
        req.kickoff_at = ts("2026-01-01 10:00:00");
        let err = create_match(&store, &alerts, &clock, &req).unwrap_err();
        assert!(matches!(err, StorageError::Validation(_)));
    }

    #[test]
    fn rejects_odd_capacity_for_auto_generated() {
        let (store, alerts, clock) = fixture();
        let mut req = create_request(11);
        req.auto_generated = true;
        let err = create_match(&store, &alerts, &clock, &req).unwrap_err();
        assert!(matches!(err, StorageError::Validation(_)));
    }

    #[test]
    fn tiny_match_alerts_on_creation() {
        let (store, alerts, clock) = fixture();
        create_match(&store, &alerts, &clock, &create_request(4)).unwrap();
        assert_eq!(alerts.count_of(AlertKind::LowCapacity), 1);
    }

    #[test]
    fn capacity_cannot_drop_below_occupancy() {
        let (store, alerts, clock) = fixture();
        let m = create_match(&store, &alerts, &clock, &create_request(10)).unwrap();
        for i in 0..4 {
            enrollment::enroll_participant(
                &store,
                &alerts,
                &clock,
                m.match_id,
                &EnrollParticipantRequest::named(format!("P{i}")),
            )
            .unwrap();
        }

        let req = UpdateMatchRequest {
            title: None,
            kickoff_at: None,
            max_players: Some(3),
            price: None,
            status: None,
        };
        let err = update_match(&store, &alerts, m.match_id, &req).unwrap_err();
        assert!(err.is_business_rule());
    }

    #[test]
    fn shrinking_capacity_to_occupancy_makes_the_match_full() {
        let (store, alerts, clock) = fixture();
        let m = create_match(&store, &alerts, &clock, &create_request(10)).unwrap();
        for i in 0..4 {
            enrollment::enroll_participant(
                &store,
                &alerts,
                &clock,
                m.match_id,
                &EnrollParticipantRequest::named(format!("P{i}")),
            )
            .unwrap();
        }

        let req = UpdateMatchRequest {
            title: None,
            kickoff_at: None,
            max_players: Some(4),
            price: None,
            status: None,
        };
        let updated = update_match(&store, &alerts, m.match_id, &req).unwrap();
        assert_eq!(updated.status, MatchStatus::Full);
    }

    #[test]
    fn growing_a_full_match_reopens_it_and_alerts() {
        let (store, alerts, clock) = fixture();
        let m = create_match(&store, &alerts, &clock, &create_request(2)).unwrap();
        for name in ["Ada", "Grace"] {
            enrollment::enroll_participant(
                &store,
                &alerts,
                &clock,
                m.match_id,
                &EnrollParticipantRequest::named(name.to_string()),
            )
            .unwrap();
        }

        let sink = RecordingAlertSink::new();
        let req = UpdateMatchRequest {
            title: None,
            kickoff_at: None,
            max_players: Some(4),
            price: None,
            status: None,
        };
        let updated = update_match(&store, &sink, m.match_id, &req).unwrap();
        assert_eq!(updated.status, MatchStatus::Available);
        // 2 slots remain, inside the alert band
        assert_eq!(sink.count_of(AlertKind::LowCapacity), 1);
    }

    #[test]
    fn delete_is_refused_while_participants_remain() {
        let (store, alerts, clock) = fixture();
        let m = create_match(&store, &alerts, &clock, &create_request(10)).unwrap();
        enrollment::enroll_participant(
            &store,
            &alerts,
            &clock,
            m.match_id,
            &EnrollParticipantRequest::named("Ada".to_string()),
        )
        .unwrap();

        let err = delete_match(&store, m.match_id).unwrap_err();
        assert!(err.is_business_rule());
    }
}
