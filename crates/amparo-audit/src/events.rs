use serde::Serialize;
use tracing::{error, info};

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    SessionStarted,
    AnswerRecorded,
    AssessmentCompleted,
    AssessmentSubmitted,
    NegotiationTurn,
    CrisisDetected,
    /// A record that must be kept for audit could not be written.
    AuditWriteFailed,
    EeaStepSaved,
    SosTriggered,
    TriageEvaluated,
    TherapistRegistered,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::SessionStarted => "session_started",
            AuditAction::AnswerRecorded => "answer_recorded",
            AuditAction::AssessmentCompleted => "assessment_completed",
            AuditAction::AssessmentSubmitted => "assessment_submitted",
            AuditAction::NegotiationTurn => "negotiation_turn",
            AuditAction::CrisisDetected => "crisis_detected",
            AuditAction::AuditWriteFailed => "audit_write_failed",
            AuditAction::EeaStepSaved => "eea_step_saved",
            AuditAction::SosTriggered => "sos_triggered",
            AuditAction::TriageEvaluated => "triage_evaluated",
            AuditAction::TherapistRegistered => "therapist_registered",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Failure,
}

/// A structured audit event.
///
/// Failures are emitted at `error` level so operational alerting picks them
/// up; everything else at `info`.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub resource_type: String,
    pub resource_id: String,
    pub actor: Option<String>,
    pub outcome: Outcome,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        action: AuditAction,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
    ) -> Self {
        Self {
            action,
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            actor: None,
            outcome: Outcome::Success,
            details: None,
        }
    }

    pub fn by(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    pub fn failed(mut self) -> Self {
        self.outcome = Outcome::Failure;
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        let actor = self.actor.as_deref().unwrap_or("anonymous");
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();

        match self.outcome {
            Outcome::Success => info!(
                audit.action = self.action.as_str(),
                audit.resource_type = %self.resource_type,
                audit.resource_id = %self.resource_id,
                audit.actor = actor,
                audit.details = %details,
                "audit event"
            ),
            Outcome::Failure => error!(
                audit.action = self.action.as_str(),
                audit.resource_type = %self.resource_type,
                audit.resource_id = %self.resource_id,
                audit.actor = actor,
                audit.details = %details,
                "audit event failed"
            ),
        }
    }
}
