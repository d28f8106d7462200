use crate::alerts::{Alert, AlertKind, AlertSink, deliver};
use crate::models::{Match, MatchStatus};

/// Remaining-slot band that triggers a low-capacity alert.
pub const LOW_CAPACITY_MIN: i32 = 1;
pub const LOW_CAPACITY_MAX: i32 = 5;

/// Recomputes a match's status from its occupancy. Only the
/// AVAILABLE ⇄ FULL edge is ever taken; FINISHED and CANCELLED are
/// terminal and left untouched. Called after every mutation that can
/// change occupancy or capacity.
pub fn recompute_status(m: &mut Match) {
    match m.status {
        MatchStatus::Finished | MatchStatus::Cancelled => {}
        MatchStatus::Available if m.occupancy() == m.max_players => {
            m.status = MatchStatus::Full;
        }
        MatchStatus::Full if m.occupancy() < m.max_players => {
            m.status = MatchStatus::Available;
        }
        _ => {}
    }
}

pub fn is_low_capacity(m: &Match) -> bool {
    (LOW_CAPACITY_MIN..=LOW_CAPACITY_MAX).contains(&m.remaining_slots())
}

/// Fires a low-capacity alert when the match's remaining slots sit in
/// the alert band. Delivery failures are logged and dropped.
pub fn notify_low_capacity(alerts: &dyn AlertSink, m: &Match) {
    if !is_low_capacity(m) {
        return;
    }
    deliver(
        alerts,
        Alert {
            kind: AlertKind::LowCapacity,
            message: format!(
                "Match \"{}\" has only {} slot(s) left",
                m.title,
                m.remaining_slots()
            ),
            user_id: None,
            match_id: Some(m.match_id),
        },
    );
}
