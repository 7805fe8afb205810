use async_trait::async_trait;
use aws_sdk_s3::Client;
use uuid::Uuid;

use amparo_core::models::assessment::AssessmentRecord;
use amparo_core::models::eea::EeaEntry;
use amparo_core::models::interaction::InteractionRecord;
use amparo_core::models::session::CrisisSession;
use amparo_core::models::therapist::TherapistRecord;
use amparo_core::store_keys;

use crate::directory::TherapistDirectory;
use crate::documents;
use crate::error::StorageError;
use crate::store::{SessionStore, Versioned};

/// S3-backed store. Session versions are object ETags; interactions, EEA
/// entries, and assessments are one immutable object each.
#[derive(Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl SessionStore for S3Store {
    async fn create(&self, session: &CrisisSession) -> Result<String, StorageError> {
        let key = store_keys::session(session.id);
        documents::save(&self.client, &self.bucket, &key, session).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Versioned<CrisisSession>>, StorageError> {
        let key = store_keys::session(id);
        let found = documents::load_optional(&self.client, &self.bucket, &key).await?;
        Ok(found.map(|(value, version)| Versioned { value, version }))
    }

    async fn replace_if_version(
        &self,
        session: &CrisisSession,
        expected_version: &str,
    ) -> Result<String, StorageError> {
        let key = store_keys::session(session.id);
        documents::save_if_match(&self.client, &self.bucket, &key, session, expected_version).await
    }

    async fn append_interaction(&self, record: &InteractionRecord) -> Result<(), StorageError> {
        let key = store_keys::interaction(record.session_id, record.created_at, record.id);
        documents::save(&self.client, &self.bucket, &key, record).await?;
        Ok(())
    }

    async fn interactions(&self, session_id: Uuid) -> Result<Vec<InteractionRecord>, StorageError> {
        let prefix = store_keys::interactions_prefix(session_id);
        documents::load_all(&self.client, &self.bucket, &prefix).await
    }

    async fn save_assessment(&self, record: &AssessmentRecord) -> Result<(), StorageError> {
        let key = store_keys::assessment(&record.user_id, record.created_at, record.id);
        documents::save(&self.client, &self.bucket, &key, record).await?;
        Ok(())
    }

    async fn assessment_history(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<AssessmentRecord>, StorageError> {
        let prefix = store_keys::assessments_prefix(user_id);
        // Keys under the prefix already list newest first.
        let records: Vec<AssessmentRecord> =
            documents::load_first(&self.client, &self.bucket, &prefix, limit).await?;
        Ok(records
            .into_iter()
            .filter(|a| a.user_id == user_id)
            .collect())
    }

    async fn append_eea_entry(&self, entry: &EeaEntry) -> Result<(), StorageError> {
        let key = store_keys::eea_entry(entry.session_id, entry.id);
        documents::save(&self.client, &self.bucket, &key, entry).await?;
        Ok(())
    }
}

#[async_trait]
impl TherapistDirectory for S3Store {
    async fn add_therapist(&self, record: &TherapistRecord) -> Result<(), StorageError> {
        let key = store_keys::therapist(record.id);
        documents::save(&self.client, &self.bucket, &key, record).await?;
        Ok(())
    }

    async fn therapists(&self) -> Result<Vec<TherapistRecord>, StorageError> {
        documents::load_all(&self.client, &self.bucket, store_keys::THERAPISTS_PREFIX).await
    }
}
