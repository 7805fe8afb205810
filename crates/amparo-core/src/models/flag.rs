use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A semantic tag derived from free text. Closed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Flag {
    /// Text directly names self-harm or suicidal intent.
    ExplicitIdeation,
    /// Despair without explicit intent.
    Hopelessness,
}

impl Flag {
    pub fn as_str(self) -> &'static str {
        match self {
            Flag::ExplicitIdeation => "explicit_ideation",
            Flag::Hopelessness => "hopelessness",
        }
    }
}

/// Set of flags produced from one piece of text. Order-irrelevant; duplicates
/// collapse. Serializes as a sorted list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct FlagSet(BTreeSet<Flag>);

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, flag: Flag) -> bool {
        self.0.insert(flag)
    }

    pub fn contains(&self, flag: Flag) -> bool {
        self.0.contains(&flag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Flag> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Flag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
