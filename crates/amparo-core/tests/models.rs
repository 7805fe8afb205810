use amparo_core::models::flag::{Flag, FlagSet};
use amparo_core::models::risk::RiskLevel;
use amparo_core::models::score::DASS21_ITEM_COUNT;
use amparo_core::models::session::{CrisisSession, NegotiationState, SessionStage};

#[test]
fn risk_level_serializes_as_integer() {
    let json = serde_json::to_string(&RiskLevel::High).unwrap();
    assert_eq!(json, "2");

    let parsed: RiskLevel = serde_json::from_str("3").unwrap();
    assert_eq!(parsed, RiskLevel::Critical);
}

#[test]
fn unrecognized_risk_level_is_rejected() {
    assert!(serde_json::from_str::<RiskLevel>("4").is_err());
    assert!(serde_json::from_str::<RiskLevel>("-1").is_err());
    assert!(serde_json::from_str::<RiskLevel>("\"high\"").is_err());
}

#[test]
fn escalate_saturates_at_critical() {
    assert_eq!(RiskLevel::Low.escalate(), RiskLevel::Medium);
    assert_eq!(RiskLevel::Medium.escalate(), RiskLevel::High);
    assert_eq!(RiskLevel::High.escalate(), RiskLevel::Critical);
    assert_eq!(RiskLevel::Critical.escalate(), RiskLevel::Critical);
}

#[test]
fn flag_set_collapses_duplicates_and_sorts() {
    let flags: FlagSet = [Flag::Hopelessness, Flag::ExplicitIdeation, Flag::Hopelessness]
        .into_iter()
        .collect();
    assert_eq!(flags.len(), 2);

    let json = serde_json::to_string(&flags).unwrap();
    assert_eq!(json, r#"["explicit_ideation","hopelessness"]"#);
}

#[test]
fn new_session_starts_in_assessment_with_empty_answers() {
    let session = CrisisSession::new(None, "web");
    assert_eq!(session.stage, SessionStage::Assessment);
    assert_eq!(session.negotiation, NegotiationState::Open);
    assert_eq!(session.answers.len(), DASS21_ITEM_COUNT);
    assert_eq!(session.next_unanswered(), Some(0));
    assert_eq!(session.complete_answers().unwrap(), None);
}

#[test]
fn complete_answers_once_every_slot_is_filled() {
    let mut session = CrisisSession::new(Some("user-1".to_string()), "app");
    for slot in session.answers.iter_mut() {
        *slot = Some(1);
    }
    assert_eq!(session.next_unanswered(), None);
    assert_eq!(session.complete_answers().unwrap(), Some(vec![1; DASS21_ITEM_COUNT]));
}
