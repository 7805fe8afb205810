//! The single, versioned list of risk phrases.
//!
//! The flag detector, the negotiation step's crisis check, and the companion
//! guardrail all query this taxonomy. Text and phrases go through the same
//! [`normalize`] so a phrase matches regardless of case, accents, or spacing.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::error::TriageError;

/// Phrase categories known to the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhraseCategory {
    /// Directly names self-harm or suicidal intent.
    ExplicitIdeation,
    /// Despair without explicit intent.
    Hopelessness,
    /// Broad crisis watch list for the negotiation step. Over-matches on
    /// purpose; only used to mark interactions for audit.
    CrisisWatch,
    /// Terms that must never appear in a companion reply.
    GuardrailBlock,
}

impl PhraseCategory {
    pub const ALL: [PhraseCategory; 4] = [
        PhraseCategory::ExplicitIdeation,
        PhraseCategory::Hopelessness,
        PhraseCategory::CrisisWatch,
        PhraseCategory::GuardrailBlock,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PhraseCategory::ExplicitIdeation => "explicit_ideation",
            PhraseCategory::Hopelessness => "hopelessness",
            PhraseCategory::CrisisWatch => "crisis_watch",
            PhraseCategory::GuardrailBlock => "guardrail_block",
        }
    }
}

/// On-disk shape of the taxonomy, before normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyFile {
    pub version: String,
    pub explicit_ideation: Vec<String>,
    pub hopelessness: Vec<String>,
    pub crisis_watch: Vec<String>,
    pub guardrail_block: Vec<String>,
}

/// Normalized phrase lists, tagged by category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaxonomyFile", into = "TaxonomyFile")]
pub struct PhraseTaxonomy {
    version: String,
    explicit_ideation: Vec<String>,
    hopelessness: Vec<String>,
    crisis_watch: Vec<String>,
    guardrail_block: Vec<String>,
}

impl PhraseTaxonomy {
    fn normalized(file: TaxonomyFile) -> Self {
        Self {
            version: file.version,
            explicit_ideation: normalize_all(&file.explicit_ideation),
            hopelessness: normalize_all(&file.hopelessness),
            crisis_watch: normalize_all(&file.crisis_watch),
            guardrail_block: normalize_all(&file.guardrail_block),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn phrases(&self, category: PhraseCategory) -> &[String] {
        match category {
            PhraseCategory::ExplicitIdeation => &self.explicit_ideation,
            PhraseCategory::Hopelessness => &self.hopelessness,
            PhraseCategory::CrisisWatch => &self.crisis_watch,
            PhraseCategory::GuardrailBlock => &self.guardrail_block,
        }
    }

    /// Whether `text` contains any phrase of `category`.
    pub fn matches(&self, category: PhraseCategory, text: &str) -> bool {
        self.matches_normalized(category, &normalize(text))
    }

    /// Like [`matches`](Self::matches) for text that is already normalized.
    pub fn matches_normalized(&self, category: PhraseCategory, normalized: &str) -> bool {
        self.phrases(category)
            .iter()
            .any(|p| normalized.contains(p.as_str()))
    }

    /// Every category with at least one phrase in `text`.
    pub fn categories(&self, text: &str) -> Vec<PhraseCategory> {
        let normalized = normalize(text);
        PhraseCategory::ALL
            .into_iter()
            .filter(|c| self.matches_normalized(*c, &normalized))
            .collect()
    }
}

impl TryFrom<TaxonomyFile> for PhraseTaxonomy {
    type Error = TriageError;

    fn try_from(file: TaxonomyFile) -> Result<Self, Self::Error> {
        if file.version.trim().is_empty() {
            return Err(TriageError::MissingVersion);
        }
        let taxonomy = Self::normalized(file);
        for category in PhraseCategory::ALL {
            if taxonomy.phrases(category).is_empty() {
                return Err(TriageError::EmptyCategory(category.as_str()));
            }
        }
        Ok(taxonomy)
    }
}

impl From<PhraseTaxonomy> for TaxonomyFile {
    fn from(t: PhraseTaxonomy) -> Self {
        Self {
            version: t.version,
            explicit_ideation: t.explicit_ideation,
            hopelessness: t.hopelessness,
            crisis_watch: t.crisis_watch,
            guardrail_block: t.guardrail_block,
        }
    }
}

impl Default for PhraseTaxonomy {
    fn default() -> Self {
        let file = TaxonomyFile {
            version: "es-MX-2025.1".to_string(),
            explicit_ideation: strings(&[
                "quiero morir",
                "quitarme la vida",
                "suicid",
                "me mato",
                "me quiero matar",
                "matarme",
                "no quiero vivir",
            ]),
            hopelessness: strings(&["sin esperanza", "no vale la pena", "no puedo más"]),
            crisis_watch: strings(&[
                "quiero",
                "matar",
                "suic",
                "autoles",
                "hacerme daño",
                "lastimarme",
                "no quiero vivir",
            ]),
            guardrail_block: strings(&[
                "sobredosis",
                "dosis letal",
                "cortarme",
                "ahorcarme",
                "veneno",
                "cómo suicidarme",
                "metodo para morir",
            ]),
        };
        Self::normalized(file)
    }
}

fn strings(phrases: &[&str]) -> Vec<String> {
    phrases.iter().map(|p| p.to_string()).collect()
}

fn normalize_all(phrases: &[String]) -> Vec<String> {
    let mut out: Vec<String> = phrases
        .iter()
        .map(|p| normalize(p))
        .filter(|p| !p.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}

/// Lower-case, strip diacritics, and collapse whitespace runs to a single
/// space.
///
/// Text is decomposed (NFD) first, so precomposed `á` and `a` followed by a
/// combining acute both fold to `a`.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.nfd().filter(|c| !is_combining_mark(*c)) {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        // Some lowercase mappings emit combining marks of their own.
        out.extend(ch.to_lowercase().filter(|c| !is_combining_mark(*c)));
    }
    out
}
