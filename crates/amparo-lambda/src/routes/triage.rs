use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use amparo_audit::{AuditAction, AuditEvent};
use amparo_core::models::risk::RiskLevel;
use amparo_core::models::triage::TriageResult;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct EvaluateRequest {
    pub dass_level: i64,
    #[serde(default)]
    pub text: Option<String>,
}

pub async fn evaluate(
    State(state): State<AppState>,
    Json(req): Json<EvaluateRequest>,
) -> Result<Json<TriageResult>, ApiError> {
    let level = RiskLevel::try_from(req.dass_level).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let result = amparo_triage::actions::triage(&state.flows.policy.taxonomy, level, req.text.as_deref());

    AuditEvent::new(AuditAction::TriageEvaluated, "triage", "-")
        .with_details(serde_json::json!({
            "psychometric_level": level.as_u8(),
            "risk_level": result.risk_level.as_u8(),
            "flags": result.flags,
            "actions": result.actions,
        }))
        .emit();

    Ok(Json(result))
}
