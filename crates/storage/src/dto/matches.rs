use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Match, MatchStatus};

/// Request payload for scheduling a new match
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateMatchRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters"
    ))]
    pub title: String,

    pub kickoff_at: NaiveDateTime,

    #[validate(range(min = 1, max = 50, message = "Capacity must be between 1 and 50"))]
    pub max_players: i32,

    pub price: Option<Decimal>,

    /// Matches created by the periodic scheduler must carry an even
    /// capacity so sides can come out equal.
    #[serde(default)]
    pub auto_generated: bool,
}

/// Request payload for updating an existing match
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateMatchRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    pub kickoff_at: Option<NaiveDateTime>,

    #[validate(range(min = 1, max = 50, message = "Capacity must be between 1 and 50"))]
    pub max_players: Option<i32>,

    pub price: Option<Decimal>,

    /// Only FINISHED and CANCELLED may be set by hand; AVAILABLE and
    /// FULL are derived from occupancy.
    #[validate(custom(function = "validate_manual_status"))]
    pub status: Option<MatchStatus>,
}

/// Response containing match details and derived occupancy
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MatchResponse {
    pub match_id: Uuid,
    pub title: String,
    pub kickoff_at: NaiveDateTime,
    pub max_players: i32,
    pub status: MatchStatus,
    pub price: Option<Decimal>,
    pub occupancy: i32,
    pub remaining_slots: i32,
    pub created_at: NaiveDateTime,
}

impl From<Match> for MatchResponse {
    fn from(m: Match) -> Self {
        let occupancy = m.occupancy();
        let remaining_slots = m.remaining_slots();
        Self {
            match_id: m.match_id,
            title: m.title,
            kickoff_at: m.kickoff_at,
            max_players: m.max_players,
            status: m.status,
            price: m.price,
            occupancy,
            remaining_slots,
            created_at: m.created_at,
        }
    }
}

fn validate_manual_status(status: &MatchStatus) -> Result<(), validator::ValidationError> {
    if status.is_terminal() {
        Ok(())
    } else {
        Err(validator::ValidationError::new(
            "only FINISHED or CANCELLED can be set manually",
        ))
    }
}
