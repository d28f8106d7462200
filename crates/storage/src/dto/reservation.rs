use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Reservation, ReservationLine, ReservationStatus};

/// Request payload for turning a user's cart into a reservation
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CheckoutRequest {
    pub user_id: Uuid,
}

/// Request payload for a manual reservation status change
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateReservationStatusRequest {
    pub status: ReservationStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReservationLineResponse {
    pub match_id: Uuid,
    pub quantity: i32,
}

impl From<ReservationLine> for ReservationLineResponse {
    fn from(line: ReservationLine) -> Self {
        Self {
            match_id: line.match_id,
            quantity: line.quantity,
        }
    }
}

/// Response containing reservation details
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReservationResponse {
    pub reservation_id: Uuid,
    pub user_id: Uuid,
    pub status: ReservationStatus,
    pub lines: Vec<ReservationLineResponse>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Reservation> for ReservationResponse {
    fn from(r: Reservation) -> Self {
        Self {
            reservation_id: r.reservation_id,
            user_id: r.user_id,
            status: r.status,
            lines: r.lines.into_iter().map(Into::into).collect(),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Response for the per-user spending total
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TotalSpentResponse {
    pub user_id: Uuid,
    pub total: Decimal,
}
