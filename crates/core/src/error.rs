use crate::query::QueryError;
use crate::store::{EntityKind, StoreError};
use crate::validation::ValidationError;
use api_shared::RecordId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A request field is missing or malformed (outside the vaccine validator).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: RecordId },
    /// A filtered listing that must not come back empty did.
    #[error("no {0} records match the query")]
    NoMatches(EntityKind),
    #[error("storage failure: {0}")]
    Store(StoreError),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { kind, id } => CoreError::NotFound { kind, id },
            other => CoreError::Store(other),
        }
    }
}

impl From<clinic_types::TextError> for CoreError {
    fn from(err: clinic_types::TextError) -> Self {
        CoreError::InvalidInput(err.to_string())
    }
}

impl From<clinic_types::DateError> for CoreError {
    fn from(err: clinic_types::DateError) -> Self {
        CoreError::InvalidInput(err.to_string())
    }
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
