use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerPosition {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl PlayerPosition {
    pub const ALL: [PlayerPosition; 4] = [
        PlayerPosition::Goalkeeper,
        PlayerPosition::Defender,
        PlayerPosition::Midfielder,
        PlayerPosition::Forward,
    ];
}

/// A person enrolled into one specific match. Display names are
/// unique within the owning match (case-sensitive).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Participant {
    pub participant_id: Uuid,
    pub display_name: String,
    pub nickname: Option<String>,
    pub position: Option<PlayerPosition>,
    /// 1 (beginner) to 10 (elite) when known.
    pub skill_level: Option<i16>,
    pub enrolled_at: chrono::NaiveDateTime,
}
