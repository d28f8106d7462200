pub mod capacity;
pub mod checkout;
pub mod enrollment;
pub mod matches;
pub mod reservation_status;
pub mod team_balancer;

/// Upper bound on read-validate-commit attempts against a match
/// before the conflict is surfaced to the caller.
pub(crate) const MAX_COMMIT_ATTEMPTS: usize = 3;
