use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A licensed therapist listed in the referral directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TherapistRecord {
    pub id: Uuid,
    pub name: String,
    /// Professional licence (cédula) number.
    pub license: String,
    pub specialties: Vec<String>,
    pub regions: Vec<String>,
    /// Accepts patients through an institutional agreement.
    pub convenio: bool,
    pub contact_email: Option<String>,
    pub created_at: jiff::Timestamp,
}
