//! Safety negotiation: ask a user in crisis to commit to a short safe window.
//!
//! Every turn restates the plan and is recorded as an immutable interaction.
//! The reply never depends on the record being written: store failures are
//! reported to monitoring and the user still gets the safety message.

use serde::Serialize;
use uuid::Uuid;

use amparo_audit::{AuditAction, AuditEvent};
use amparo_core::models::interaction::InteractionRecord;
use amparo_core::models::session::NegotiationState;
use amparo_storage::error::StorageError;
use amparo_storage::store::update_session;
use amparo_triage::taxonomy::{PhraseCategory, PhraseTaxonomy, normalize};

use crate::context::FlowContext;
use crate::error::FlowError;
use crate::policy::NegotiationPolicy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NegotiationReply {
    pub message: String,
    pub ask_commitment: bool,
    pub commitment_question: String,
    pub crisis_detected: bool,
    pub state: NegotiationState,
}

/// The fixed safety plan and commitment question for a window length.
pub fn safety_plan(policy: &NegotiationPolicy) -> (String, String) {
    let minutes = policy.commitment_window_minutes;
    let message = format!(
        "Gracias por decir cómo te sientes. Tu seguridad importa. \
         ¿Podemos acordar algo ahora mismo? Durante los próximos {minutes} minutos, \
         evita cualquier acción que pueda ponerte en riesgo. Respira: inhala 4, sostén 4, exhala 6. \
         Si hay peligro inmediato, contacta al 911 o a la Línea de la Vida 800-911-2000. \
         ¿Te parece si seguimos conversando mientras te acompaño?"
    );
    let question = format!("¿Aceptas este plan de {minutes} minutos seguros?");
    (message, question)
}

/// Crisis check for audit marking: the broad watch list or explicit ideation.
pub fn detect_crisis(taxonomy: &PhraseTaxonomy, text: &str) -> bool {
    let normalized = normalize(text);
    taxonomy.matches_normalized(PhraseCategory::CrisisWatch, &normalized)
        || taxonomy.matches_normalized(PhraseCategory::ExplicitIdeation, &normalized)
}

/// Handle one negotiation turn.
///
/// Fails only when the session does not exist or cannot be read. The first
/// turn moves the session from `Open` to `CommitmentRequested`; later turns
/// restate the plan.
pub async fn negotiate(
    ctx: &FlowContext,
    session_id: Uuid,
    user_message: &str,
) -> Result<NegotiationReply, FlowError> {
    let current = ctx
        .store
        .get(session_id)
        .await?
        .ok_or_else(|| FlowError::session_not_found(session_id))?;

    let crisis_detected = detect_crisis(&ctx.policy.taxonomy, user_message);
    let (message, commitment_question) = safety_plan(&ctx.policy.negotiation);

    if current.value.negotiation == NegotiationState::Open {
        let requested = update_session(ctx.store.as_ref(), session_id, |s| {
            s.negotiation = NegotiationState::CommitmentRequested;
        })
        .await;
        if let Err(e) = requested {
            report_write_failure("session", session_id, &e);
        }
    }

    let record =
        InteractionRecord::negotiation(session_id, user_message, &message, crisis_detected);
    if let Err(e) = ctx.store.append_interaction(&record).await {
        report_write_failure("interaction", record.id, &e);
    }

    AuditEvent::new(AuditAction::NegotiationTurn, "session", session_id.to_string())
        .with_details(serde_json::json!({
            "interaction_id": record.id,
            "crisis_detected": crisis_detected,
        }))
        .emit();
    if crisis_detected {
        AuditEvent::new(AuditAction::CrisisDetected, "session", session_id.to_string())
            .with_details(serde_json::json!({ "source": "negotiation" }))
            .emit();
    }

    Ok(NegotiationReply {
        message,
        ask_commitment: true,
        commitment_question,
        crisis_detected,
        state: NegotiationState::CommitmentRequested,
    })
}

fn report_write_failure(resource_type: &str, id: Uuid, error: &StorageError) {
    tracing::error!(
        resource_type,
        resource_id = %id,
        error = %error,
        "negotiation record not persisted"
    );
    AuditEvent::new(AuditAction::AuditWriteFailed, resource_type, id.to_string())
        .failed()
        .with_details(serde_json::json!({ "error": error.to_string() }))
        .emit();
}
