use thiserror::Error;

use crate::scoring::ValidationError;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid cutpoints for {scale}: {reason}")]
    InvalidCutpoints { scale: String, reason: String },
}
