use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::action::ActionTag;
use super::flag::FlagSet;
use super::risk::RiskLevel;

/// Outcome of one triage request. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TriageResult {
    #[ts(type = "0 | 1 | 2 | 3")]
    pub risk_level: RiskLevel,
    pub flags: FlagSet,
    pub actions: Vec<ActionTag>,
}
