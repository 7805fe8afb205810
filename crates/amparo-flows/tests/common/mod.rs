#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use amparo_core::models::assessment::AssessmentRecord;
use amparo_core::models::eea::EeaEntry;
use amparo_core::models::interaction::InteractionRecord;
use amparo_core::models::session::CrisisSession;
use amparo_core::models::therapist::TherapistRecord;
use amparo_flows::{FlowContext, Policy};
use amparo_storage::directory::TherapistDirectory;
use amparo_storage::error::StorageError;
use amparo_storage::memory::MemoryStore;
use amparo_storage::store::{SessionStore, Versioned};

pub fn context() -> (FlowContext, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (FlowContext::new(store.clone(), Policy::default()), store)
}

/// Delegates to a memory store but refuses every append and session write.
pub struct FailingWrites {
    pub inner: MemoryStore,
    pub refused: AtomicUsize,
}

impl FailingWrites {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            refused: AtomicUsize::new(0),
        }
    }

    fn refuse(&self) -> StorageError {
        self.refused.fetch_add(1, Ordering::SeqCst);
        StorageError::Unavailable("writes disabled".to_string())
    }
}

#[async_trait]
impl SessionStore for FailingWrites {
    async fn create(&self, session: &CrisisSession) -> Result<String, StorageError> {
        self.inner.create(session).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Versioned<CrisisSession>>, StorageError> {
        self.inner.get(id).await
    }

    async fn replace_if_version(
        &self,
        _session: &CrisisSession,
        _expected_version: &str,
    ) -> Result<String, StorageError> {
        Err(self.refuse())
    }

    async fn append_interaction(&self, _record: &InteractionRecord) -> Result<(), StorageError> {
        Err(self.refuse())
    }

    async fn interactions(&self, session_id: Uuid) -> Result<Vec<InteractionRecord>, StorageError> {
        self.inner.interactions(session_id).await
    }

    async fn save_assessment(&self, _record: &AssessmentRecord) -> Result<(), StorageError> {
        Err(self.refuse())
    }

    async fn assessment_history(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<AssessmentRecord>, StorageError> {
        self.inner.assessment_history(user_id, limit).await
    }

    async fn append_eea_entry(&self, _entry: &EeaEntry) -> Result<(), StorageError> {
        Err(self.refuse())
    }
}

#[async_trait]
impl TherapistDirectory for FailingWrites {
    async fn add_therapist(&self, _record: &TherapistRecord) -> Result<(), StorageError> {
        Err(self.refuse())
    }

    async fn therapists(&self) -> Result<Vec<TherapistRecord>, StorageError> {
        self.inner.therapists().await
    }
}
