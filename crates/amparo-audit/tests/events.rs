use amparo_audit::{AuditAction, AuditEvent, Outcome};

#[test]
fn new_event_defaults_to_success_without_actor() {
    let event = AuditEvent::new(AuditAction::SessionStarted, "session", "abc");
    assert_eq!(event.outcome, Outcome::Success);
    assert!(event.actor.is_none());
    assert!(event.details.is_none());
}

#[test]
fn builder_sets_failure_actor_and_details() {
    let event = AuditEvent::new(AuditAction::AuditWriteFailed, "interaction", "abc")
        .by("user-7")
        .failed()
        .with_details(serde_json::json!({ "error": "store unavailable" }));

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["action"], "audit_write_failed");
    assert_eq!(json["outcome"], "failure");
    assert_eq!(json["actor"], "user-7");
    assert_eq!(json["details"]["error"], "store unavailable");

    // Emitting without a subscriber installed is a no-op.
    event.emit();
}

#[test]
fn action_names_match_serialized_form() {
    for action in [
        AuditAction::CrisisDetected,
        AuditAction::NegotiationTurn,
        AuditAction::TriageEvaluated,
    ] {
        let json = serde_json::to_value(action).unwrap();
        assert_eq!(json, action.as_str());
    }
}
