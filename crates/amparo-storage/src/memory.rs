use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use amparo_core::models::assessment::AssessmentRecord;
use amparo_core::models::eea::EeaEntry;
use amparo_core::models::interaction::InteractionRecord;
use amparo_core::models::session::CrisisSession;
use amparo_core::models::therapist::TherapistRecord;
use amparo_core::store_keys;

use crate::directory::TherapistDirectory;
use crate::error::StorageError;
use crate::store::{SessionStore, Versioned};

/// In-process store. Versions are per-session write counters.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    sessions: HashMap<Uuid, (CrisisSession, u64)>,
    interactions: Vec<InteractionRecord>,
    assessments: Vec<AssessmentRecord>,
    eea_entries: Vec<EeaEntry>,
    therapists: Vec<TherapistRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored EEA entries for a session, oldest first.
    pub async fn eea_entries(&self, session_id: Uuid) -> Vec<EeaEntry> {
        let inner = self.inner.lock().await;
        inner
            .eea_entries
            .iter()
            .filter(|e| e.session_id == session_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create(&self, session: &CrisisSession) -> Result<String, StorageError> {
        let mut inner = self.inner.lock().await;
        inner.sessions.insert(session.id, (session.clone(), 1));
        Ok("1".to_string())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Versioned<CrisisSession>>, StorageError> {
        let inner = self.inner.lock().await;
        Ok(inner.sessions.get(&id).map(|(session, version)| Versioned {
            value: session.clone(),
            version: version.to_string(),
        }))
    }

    async fn replace_if_version(
        &self,
        session: &CrisisSession,
        expected_version: &str,
    ) -> Result<String, StorageError> {
        let mut inner = self.inner.lock().await;
        let key = store_keys::session(session.id);
        let (stored, version) = inner
            .sessions
            .get_mut(&session.id)
            .ok_or_else(|| StorageError::NotFound { key: key.clone() })?;

        if version.to_string() != expected_version {
            return Err(StorageError::VersionConflict { key });
        }
        *stored = session.clone();
        *version += 1;
        Ok(version.to_string())
    }

    async fn append_interaction(&self, record: &InteractionRecord) -> Result<(), StorageError> {
        self.inner.lock().await.interactions.push(record.clone());
        Ok(())
    }

    async fn interactions(&self, session_id: Uuid) -> Result<Vec<InteractionRecord>, StorageError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .interactions
            .iter()
            .filter(|r| r.session_id == session_id)
            .cloned()
            .collect())
    }

    async fn save_assessment(&self, record: &AssessmentRecord) -> Result<(), StorageError> {
        self.inner.lock().await.assessments.push(record.clone());
        Ok(())
    }

    async fn assessment_history(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<AssessmentRecord>, StorageError> {
        let inner = self.inner.lock().await;
        let mut records: Vec<AssessmentRecord> = inner
            .assessments
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        // Stable sort on insertion order keeps same-instant records newest-first too.
        records.reverse();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit);
        Ok(records)
    }

    async fn append_eea_entry(&self, entry: &EeaEntry) -> Result<(), StorageError> {
        self.inner.lock().await.eea_entries.push(entry.clone());
        Ok(())
    }
}

#[async_trait]
impl TherapistDirectory for MemoryStore {
    async fn add_therapist(&self, record: &TherapistRecord) -> Result<(), StorageError> {
        self.inner.lock().await.therapists.push(record.clone());
        Ok(())
    }

    async fn therapists(&self) -> Result<Vec<TherapistRecord>, StorageError> {
        Ok(self.inner.lock().await.therapists.clone())
    }
}
