use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub user_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}
