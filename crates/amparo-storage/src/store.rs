use async_trait::async_trait;
use uuid::Uuid;

use amparo_core::models::assessment::AssessmentRecord;
use amparo_core::models::eea::EeaEntry;
use amparo_core::models::interaction::InteractionRecord;
use amparo_core::models::session::CrisisSession;
use amparo_core::store_keys;

use crate::error::StorageError;

/// How many read-modify-write rounds [`update_session`] attempts before
/// giving up.
pub const MAX_UPDATE_ATTEMPTS: usize = 5;

/// A document together with the opaque version it was read at.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub value: T,
    pub version: String,
}

/// Persistence for first-contact sessions and everything hanging off them.
///
/// Sessions are mutable and guarded by compare-and-set; interactions, EEA
/// entries, and assessments are append-only.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a new session. Returns its initial version.
    async fn create(&self, session: &CrisisSession) -> Result<String, StorageError>;

    async fn get(&self, id: Uuid) -> Result<Option<Versioned<CrisisSession>>, StorageError>;

    /// Replace a session only if it is still at `expected_version`. Returns
    /// the new version, or `StorageError::VersionConflict`.
    async fn replace_if_version(
        &self,
        session: &CrisisSession,
        expected_version: &str,
    ) -> Result<String, StorageError>;

    async fn append_interaction(&self, record: &InteractionRecord) -> Result<(), StorageError>;

    /// Interactions for a session, oldest first.
    async fn interactions(&self, session_id: Uuid) -> Result<Vec<InteractionRecord>, StorageError>;

    async fn save_assessment(&self, record: &AssessmentRecord) -> Result<(), StorageError>;

    /// A user's assessments, newest first, at most `limit`.
    async fn assessment_history(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<AssessmentRecord>, StorageError>;

    async fn append_eea_entry(&self, entry: &EeaEntry) -> Result<(), StorageError>;
}

/// Read a session, apply `mutate`, and write it back with compare-and-set.
///
/// `mutate` runs against a fresh copy on every attempt, so a concurrent
/// writer never loses an update; after [`MAX_UPDATE_ATTEMPTS`] conflicts the
/// call fails with `StorageError::Contention`. `updated_at` is stamped here.
pub async fn update_session<F, T>(
    store: &dyn SessionStore,
    id: Uuid,
    mut mutate: F,
) -> Result<(CrisisSession, T), StorageError>
where
    F: FnMut(&mut CrisisSession) -> T + Send,
    T: Send,
{
    let key = store_keys::session(id);
    for attempt in 1..=MAX_UPDATE_ATTEMPTS {
        let Versioned { mut value, version } = store
            .get(id)
            .await?
            .ok_or_else(|| StorageError::NotFound { key: key.clone() })?;

        let out = mutate(&mut value);
        value.updated_at = jiff::Timestamp::now();

        match store.replace_if_version(&value, &version).await {
            Ok(_) => return Ok((value, out)),
            Err(StorageError::VersionConflict { .. }) => {
                tracing::debug!(session_id = %id, attempt, "session write conflict, retrying");
            }
            Err(e) => return Err(e),
        }
    }

    tracing::warn!(session_id = %id, "session update abandoned after repeated conflicts");
    Err(StorageError::Contention {
        key,
        attempts: MAX_UPDATE_ATTEMPTS,
    })
}
