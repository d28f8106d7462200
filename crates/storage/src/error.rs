use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    #[error("Concurrency conflict: {0}")]
    ConcurrencyConflict(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_business_rule(&self) -> bool {
        matches!(self, StorageError::BusinessRule(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, StorageError::ConcurrencyConflict(_))
    }
}
