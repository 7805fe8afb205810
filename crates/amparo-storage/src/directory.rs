use async_trait::async_trait;

use amparo_core::models::therapist::TherapistRecord;

use crate::error::StorageError;

/// Persistence for the therapist referral directory.
///
/// The directory is small and curated, so filtering happens in the caller.
#[async_trait]
pub trait TherapistDirectory: Send + Sync {
    async fn add_therapist(&self, record: &TherapistRecord) -> Result<(), StorageError>;

    /// Every listed therapist, in no particular order.
    async fn therapists(&self) -> Result<Vec<TherapistRecord>, StorageError>;
}
