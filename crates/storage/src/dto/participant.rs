use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Participant, PlayerPosition};

/// Request payload for enrolling a participant into a match
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct EnrollParticipantRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Display name must be between 1 and 100 characters"
    ))]
    pub display_name: String,

    #[validate(length(max = 50))]
    pub nickname: Option<String>,

    pub position: Option<PlayerPosition>,

    #[validate(range(min = 1, max = 10, message = "Skill level must be between 1 and 10"))]
    pub skill_level: Option<i16>,
}

impl EnrollParticipantRequest {
    /// Minimal request used by the checkout for auto-generated names.
    pub fn named(display_name: String) -> Self {
        Self {
            display_name,
            nickname: None,
            position: None,
            skill_level: None,
        }
    }
}

/// Response containing participant details
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParticipantResponse {
    pub participant_id: Uuid,
    pub display_name: String,
    pub nickname: Option<String>,
    pub position: Option<PlayerPosition>,
    pub skill_level: Option<i16>,
    pub enrolled_at: NaiveDateTime,
}

impl From<Participant> for ParticipantResponse {
    fn from(p: Participant) -> Self {
        Self {
            participant_id: p.participant_id,
            display_name: p.display_name,
            nickname: p.nickname,
            position: p.position,
            skill_level: p.skill_level,
            enrolled_at: p.enrolled_at,
        }
    }
}
