use amparo_core::models::flag::{Flag, FlagSet};

use crate::taxonomy::{PhraseCategory, PhraseTaxonomy, normalize};

/// Scan free text for crisis indicators.
///
/// Plain phrase containment after normalization; no stemming. A text may
/// raise zero, one, or both flags. Empty text yields an empty set.
pub fn detect(taxonomy: &PhraseTaxonomy, text: &str) -> FlagSet {
    let normalized = normalize(text);
    let mut flags = FlagSet::new();
    if taxonomy.matches_normalized(PhraseCategory::ExplicitIdeation, &normalized) {
        flags.insert(Flag::ExplicitIdeation);
    }
    if taxonomy.matches_normalized(PhraseCategory::Hopelessness, &normalized) {
        flags.insert(Flag::Hopelessness);
    }
    flags
}
