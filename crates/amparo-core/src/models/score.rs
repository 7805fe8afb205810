use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::risk::RiskLevel;

/// Number of items in a DASS-21 questionnaire.
pub const DASS21_ITEM_COUNT: usize = 21;

/// One of the three DASS-21 subscales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Subscale {
    Depression,
    Anxiety,
    Stress,
}

impl Subscale {
    pub const ALL: [Subscale; 3] = [Subscale::Depression, Subscale::Anxiety, Subscale::Stress];

    pub fn as_str(self) -> &'static str {
        match self {
            Subscale::Depression => "depression",
            Subscale::Anxiety => "anxiety",
            Subscale::Stress => "stress",
        }
    }
}

/// Clinical severity band for a single subscale score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Severity {
    Normal,
    Mild,
    Moderate,
    Severe,
    Extreme,
}

/// A doubled subscale score (0–42) with its severity band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubscaleScore {
    pub subscale: Subscale,
    pub score: u8,
    pub severity: Severity,
}

/// Severity band per subscale, reported alongside the numeric scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SeverityBands {
    pub depression: Severity,
    pub anxiety: Severity,
    pub stress: Severity,
}

/// Result of scoring a complete DASS-21 submission.
///
/// `risk_level` is derived from `total` alone and is coarser than the
/// per-subscale severity bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Dass21Score {
    #[serde(rename = "D")]
    pub depression: u8,
    #[serde(rename = "A")]
    pub anxiety: u8,
    #[serde(rename = "S")]
    pub stress: u8,
    pub total: u16,
    #[ts(type = "0 | 1 | 2 | 3")]
    pub risk_level: RiskLevel,
    pub severity: SeverityBands,
}

impl Dass21Score {
    pub fn subscale(&self, subscale: Subscale) -> SubscaleScore {
        let (score, severity) = match subscale {
            Subscale::Depression => (self.depression, self.severity.depression),
            Subscale::Anxiety => (self.anxiety, self.severity.anxiety),
            Subscale::Stress => (self.stress, self.severity.stress),
        };
        SubscaleScore {
            subscale,
            score,
            severity,
        }
    }
}
