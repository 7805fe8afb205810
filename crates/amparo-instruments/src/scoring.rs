use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use amparo_core::models::score::Subscale;

/// Defines an inclusive integer range for a response or score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreRange {
    pub min: i64,
    pub max: i64,
}

impl ScoreRange {
    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A single questionnaire item.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    pub index: usize,
    pub text: String,
}

/// A subscale within an instrument: which items feed it and the range of the
/// resulting score.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Domain {
    pub subscale: Subscale,
    pub name: String,
    pub item_indices: Vec<usize>,
    pub score_range: ScoreRange,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub item: Option<usize>,
    pub value: Option<i64>,
    pub expected_range: Option<ScoreRange>,
    pub message: String,
}
