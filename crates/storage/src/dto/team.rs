use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Team;

/// Response containing one generated team
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamResponse {
    pub team_id: Uuid,
    pub match_id: Uuid,
    pub name: String,
    pub participant_ids: Vec<Uuid>,
}

impl From<Team> for TeamResponse {
    fn from(t: Team) -> Self {
        Self {
            team_id: t.team_id,
            match_id: t.match_id,
            name: t.name,
            participant_ids: t.participant_ids,
        }
    }
}
