use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::Participant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Available,
    Full,
    Finished,
    Cancelled,
}

impl MatchStatus {
    /// FINISHED and CANCELLED matches never change status again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, MatchStatus::Finished | MatchStatus::Cancelled)
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MatchStatus::Available => "AVAILABLE",
            MatchStatus::Full => "FULL",
            MatchStatus::Finished => "FINISHED",
            MatchStatus::Cancelled => "CANCELLED",
        };
        f.write_str(s)
    }
}

/// A scheduled match. Participants are owned by the match and are
/// cascade-deleted with it; occupancy is always derived from the
/// participant list, never stored separately.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Match {
    pub match_id: Uuid,
    pub title: String,
    pub kickoff_at: chrono::NaiveDateTime,
    pub max_players: i32,
    pub status: MatchStatus,
    pub price: Option<Decimal>,
    pub participants: Vec<Participant>,
    pub created_at: chrono::NaiveDateTime,
    /// Optimistic concurrency token, bumped on every commit.
    #[serde(skip)]
    pub version: u64,
}

impl Match {
    pub fn occupancy(&self) -> i32 {
        self.participants.len() as i32
    }

    pub fn remaining_slots(&self) -> i32 {
        self.max_players - self.occupancy()
    }

    pub fn has_participant_named(&self, display_name: &str) -> bool {
        self.participants
            .iter()
            .any(|p| p.display_name == display_name)
    }

    pub fn participant_index(&self, participant_id: Uuid) -> Option<usize> {
        self.participants
            .iter()
            .position(|p| p.participant_id == participant_id)
    }
}
