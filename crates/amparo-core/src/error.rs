use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unrecognized risk level: {0} (expected 0, 1, 2 or 3)")]
    InvalidRiskLevel(i64),

    #[error("expected {expected} answers, got {actual}")]
    AnswerCount { expected: usize, actual: usize },
}
