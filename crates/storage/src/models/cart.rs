use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A pending, unconfirmed claim on a match. Carts are kept per user
/// and consumed by the checkout.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartLine {
    pub match_id: Uuid,
    pub quantity: i32,
}
