use thiserror::Error;

use amparo_core::models::session::SessionStage;
use amparo_instruments::scoring::ValidationError;
use amparo_storage::error::StorageError;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("session is in stage {actual:?}, expected {expected:?}")]
    WrongStage {
        expected: SessionStage,
        actual: SessionStage,
    },

    #[error("concurrent update: {0}")]
    Conflict(String),

    #[error("invalid policy: {0}")]
    InvalidPolicy(String),

    #[error("storage error: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for FlowError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { key } => FlowError::NotFound(key),
            StorageError::VersionConflict { key } | StorageError::Contention { key, .. } => {
                FlowError::Conflict(key)
            }
            other => FlowError::Storage(other),
        }
    }
}

impl FlowError {
    pub(crate) fn session_not_found(id: uuid::Uuid) -> Self {
        FlowError::NotFound(format!("session {id}"))
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        FlowError::Validation(ValidationError {
            item: None,
            value: None,
            expected_range: None,
            message: message.into(),
        })
    }
}
