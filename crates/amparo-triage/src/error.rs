use thiserror::Error;

#[derive(Debug, Error)]
pub enum TriageError {
    #[error("phrase category '{0}' has no phrases")]
    EmptyCategory(&'static str),

    #[error("phrase taxonomy version must not be empty")]
    MissingVersion,
}
