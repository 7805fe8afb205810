use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    /// The document changed since it was read.
    #[error("version conflict for key: {key}")]
    VersionConflict { key: String },

    #[error("gave up on {key} after {attempts} conflicting writes")]
    Contention { key: String, attempts: usize },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("S3 GetObject error: {0}")]
    GetObject(String),

    #[error("S3 PutObject error: {0}")]
    PutObject(String),

    #[error("S3 ListObjects error: {0}")]
    ListObjects(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}
