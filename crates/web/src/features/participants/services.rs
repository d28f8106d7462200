use uuid::Uuid;

use storage::dto::participant::EnrollParticipantRequest;
use storage::error::Result;
use storage::models::Participant;
use storage::services::enrollment;

use crate::state::AppState;

/// Enroll a participant into a match
pub fn enroll(
    state: &AppState,
    match_id: Uuid,
    request: &EnrollParticipantRequest,
) -> Result<Participant> {
    enrollment::enroll_participant(&state.store, state.alerts(), state.clock(), match_id, request)
}

/// Withdraw a participant from a match
pub fn withdraw(state: &AppState, match_id: Uuid, participant_id: Uuid) -> Result<()> {
    enrollment::withdraw_participant(&state.store, match_id, participant_id)
}

/// List a match's participants
pub fn list(state: &AppState, match_id: Uuid) -> Result<Vec<Participant>> {
    enrollment::list_participants(&state.store, match_id)
}
