use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use amparo_audit::{AuditAction, AuditEvent};
use amparo_triage::emergency::EmergencyDirectory;

use crate::state::AppState;

#[derive(Deserialize, Default)]
pub struct TriggerRequest {
    #[serde(default)]
    pub session_id: Option<Uuid>,
}

#[derive(Serialize)]
pub struct TriggerResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub directory: EmergencyDirectory,
}

pub async fn trigger(
    State(state): State<AppState>,
    Json(req): Json<TriggerRequest>,
) -> Json<TriggerResponse> {
    let resource_id = req
        .session_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    AuditEvent::new(AuditAction::SosTriggered, "session", resource_id)
        .with_details(serde_json::json!({ "region": state.flows.policy.emergency.region }))
        .emit();

    Json(TriggerResponse {
        ok: true,
        directory: state.flows.policy.emergency.clone(),
    })
}
