//! Expressive-writing (EEA) exercise: five guided prompts, each answer saved
//! against the session.

use serde::Serialize;
use uuid::Uuid;

use amparo_audit::{AuditAction, AuditEvent};
use amparo_core::models::eea::{EeaEntry, EeaStep};

use crate::context::FlowContext;
use crate::error::FlowError;

pub fn prompt(step: EeaStep) -> &'static str {
    match step {
        EeaStep::EleccionDelEvento => {
            "**Elección del evento**: identifica una situación reciente que te movió emocionalmente \
             (tristeza, ansiedad, enojo, pérdida, etc.). Describe brevemente qué ocurrió."
        }
        EeaStep::EscrituraLibre => {
            "**Escritura libre**: redacta sin censura lo que piensas y sientes sobre ese evento. \
             No te preocupes por la forma; enfócate en vaciar la mente."
        }
        EeaStep::ExploracionEmocional => {
            "**Exploración emocional**: pon en palabras emociones, pensamientos automáticos y \
             reacciones corporales que notaste. Sé específico/a."
        }
        EeaStep::ReencuadreAutoreflexivo => {
            "**Reencuadre autoreflexivo**: ¿Qué aprendizajes, alternativas o significados ves ahora? \
             ¿Qué te dirías con amabilidad?"
        }
        EeaStep::CierrePositivo => {
            "**Cierre positivo**: escribe una frase de autocuidado o un plan breve para ti \
             (algo pequeño y concreto que harás hoy)."
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepSaved {
    pub step_key: &'static str,
    pub step_prompt: &'static str,
    pub saved: bool,
}

/// Save the user's text for one step and return that step's prompt.
pub async fn step(
    ctx: &FlowContext,
    session_id: Uuid,
    step_key: &str,
    user_text: &str,
) -> Result<StepSaved, FlowError> {
    let step = EeaStep::from_key(step_key)
        .ok_or_else(|| FlowError::invalid(format!("unknown step_key: {step_key}")))?;

    ctx.store
        .get(session_id)
        .await?
        .ok_or_else(|| FlowError::session_not_found(session_id))?;

    let entry = EeaEntry {
        id: Uuid::new_v4(),
        session_id,
        step,
        user_text: user_text.to_string(),
        created_at: jiff::Timestamp::now(),
    };
    ctx.store.append_eea_entry(&entry).await?;

    AuditEvent::new(AuditAction::EeaStepSaved, "session", session_id.to_string())
        .with_details(serde_json::json!({ "step": step.key() }))
        .emit();

    Ok(StepSaved {
        step_key: step.key(),
        step_prompt: prompt(step),
        saved: true,
    })
}
