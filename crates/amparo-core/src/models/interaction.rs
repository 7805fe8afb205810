use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum InteractionKind {
    Negotiation,
}

/// Immutable audit record of one bot turn. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InteractionRecord {
    pub id: Uuid,
    pub session_id: Uuid,
    pub kind: InteractionKind,
    pub user_message: String,
    pub bot_message: String,
    pub crisis_detected: bool,
    pub created_at: jiff::Timestamp,
}

impl InteractionRecord {
    pub fn negotiation(
        session_id: Uuid,
        user_message: impl Into<String>,
        bot_message: impl Into<String>,
        crisis_detected: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            kind: InteractionKind::Negotiation,
            user_message: user_message.into(),
            bot_message: bot_message.into(),
            crisis_detected,
            created_at: jiff::Timestamp::now(),
        }
    }
}
