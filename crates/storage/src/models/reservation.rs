use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    InProgress,
    Finished,
    Cancelled,
}

impl ReservationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Finished | ReservationStatus::Cancelled
        )
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ReservationStatus::Pending => "PENDING",
            ReservationStatus::Confirmed => "CONFIRMED",
            ReservationStatus::InProgress => "IN_PROGRESS",
            ReservationStatus::Finished => "FINISHED",
            ReservationStatus::Cancelled => "CANCELLED",
        };
        f.write_str(s)
    }
}

/// One (match, quantity) claim inside a reservation. The match
/// reference is non-owning.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReservationLine {
    pub match_id: Uuid,
    pub quantity: i32,
}

/// A user's claim on one or more matches. Created only by the cart
/// checkout; status mutated only through the reservation status
/// service.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Reservation {
    pub reservation_id: Uuid,
    pub user_id: Uuid,
    pub status: ReservationStatus,
    pub lines: Vec<ReservationLine>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
    /// Optimistic concurrency token, bumped on every commit.
    #[serde(skip)]
    pub version: u64,
}
