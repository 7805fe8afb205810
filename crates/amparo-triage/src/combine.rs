use amparo_core::models::flag::{Flag, FlagSet};
use amparo_core::models::risk::RiskLevel;

/// Merge the questionnaire risk level with text flags.
///
/// First matching rule wins:
/// 1. explicit ideation → `Critical`, whatever the questionnaire said
/// 2. hopelessness → one level up, capped at `Critical`
/// 3. otherwise the questionnaire level unchanged
///
/// The result is never below `psychometric`.
pub fn combine(psychometric: RiskLevel, flags: &FlagSet) -> RiskLevel {
    if flags.contains(Flag::ExplicitIdeation) {
        return RiskLevel::Critical;
    }
    if flags.contains(Flag::Hopelessness) {
        return psychometric.escalate();
    }
    psychometric
}
