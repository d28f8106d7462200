use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::CartLine;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CartLineRequest {
    pub match_id: Uuid,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

/// Request payload replacing a user's cart wholesale
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReplaceCartRequest {
    #[validate(nested)]
    pub lines: Vec<CartLineRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartLineResponse {
    pub match_id: Uuid,
    pub quantity: i32,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            match_id: line.match_id,
            quantity: line.quantity,
        }
    }
}

/// Response containing a user's current cart
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartResponse {
    pub user_id: Uuid,
    pub lines: Vec<CartLineResponse>,
}
