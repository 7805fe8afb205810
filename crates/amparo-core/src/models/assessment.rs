use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::score::Dass21Score;

/// A scored questionnaire submission, persisted per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentRecord {
    pub id: Uuid,
    pub user_id: String,
    pub instrument_id: String,
    pub score: Dass21Score,
    pub created_at: jiff::Timestamp,
}
