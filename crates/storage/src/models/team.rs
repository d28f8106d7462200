use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One of two balanced partitions of a match's participants. Holds
/// weak participant references only and is regenerated wholesale on
/// every balancing request, never partially updated.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Team {
    pub team_id: Uuid,
    pub match_id: Uuid,
    pub name: String,
    pub participant_ids: Vec<Uuid>,
}
