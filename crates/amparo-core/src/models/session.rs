use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::score::{DASS21_ITEM_COUNT, Dass21Score};
use crate::error::CoreError;

/// Where a crisis session currently is in the first-contact protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SessionStage {
    Assessment,
    Negotiation,
    Closed,
}

/// Safety-commitment state within the negotiation stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum NegotiationState {
    /// No safety plan offered yet.
    #[default]
    Open,
    /// A fixed-window safety plan was offered and awaits acknowledgment.
    CommitmentRequested,
}

/// Per-session record for the first-contact flow: DASS-21 answers followed
/// by the safety negotiation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CrisisSession {
    pub id: Uuid,
    pub user_id: Option<String>,
    pub channel: String,
    pub stage: SessionStage,
    /// Always `DASS21_ITEM_COUNT` slots; `None` until answered.
    pub answers: Vec<Option<u8>>,
    pub scores: Option<Dass21Score>,
    #[serde(default)]
    pub negotiation: NegotiationState,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl CrisisSession {
    pub fn new(user_id: Option<String>, channel: impl Into<String>) -> Self {
        let now = jiff::Timestamp::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            channel: channel.into(),
            stage: SessionStage::Assessment,
            answers: vec![None; DASS21_ITEM_COUNT],
            scores: None,
            negotiation: NegotiationState::Open,
            created_at: now,
            updated_at: now,
        }
    }

    /// First unanswered item, if any.
    pub fn next_unanswered(&self) -> Option<usize> {
        self.answers.iter().position(Option::is_none)
    }

    /// All answers, once every slot is filled.
    pub fn complete_answers(&self) -> Result<Option<Vec<u8>>, CoreError> {
        if self.answers.len() != DASS21_ITEM_COUNT {
            return Err(CoreError::AnswerCount {
                expected: DASS21_ITEM_COUNT,
                actual: self.answers.len(),
            });
        }
        Ok(self.answers.iter().copied().collect())
    }
}
