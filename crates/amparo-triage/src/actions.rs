use amparo_core::models::action::ActionTag;
use amparo_core::models::risk::RiskLevel;
use amparo_core::models::triage::TriageResult;

use crate::combine::combine;
use crate::detect::detect;
use crate::taxonomy::PhraseTaxonomy;

/// Actions unlocked at each level, in output order. Each level keeps every
/// action of the levels below it.
const LADDER: [(RiskLevel, &[ActionTag]); 3] = [
    (RiskLevel::Medium, &[ActionTag::HideAds]),
    (
        RiskLevel::High,
        &[ActionTag::ShowSos, ActionTag::NotifyTherapistIfConsented],
    ),
    (
        RiskLevel::Critical,
        &[ActionTag::ForceCrisisScreen, ActionTag::OfferEmergencyCall],
    ),
];

/// Safety actions for a final risk level. `Low` yields none.
pub fn select_actions(level: RiskLevel) -> Vec<ActionTag> {
    LADDER
        .iter()
        .filter(|(threshold, _)| level >= *threshold)
        .flat_map(|(_, actions)| actions.iter().copied())
        .collect()
}

/// Full triage for one request: flag the text, combine with the questionnaire
/// level, and pick actions.
pub fn triage(taxonomy: &PhraseTaxonomy, psychometric: RiskLevel, text: Option<&str>) -> TriageResult {
    let flags = detect(taxonomy, text.unwrap_or_default());
    let risk_level = combine(psychometric, &flags);
    TriageResult {
        risk_level,
        flags,
        actions: select_actions(risk_level),
    }
}
