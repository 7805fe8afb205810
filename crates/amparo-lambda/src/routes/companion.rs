use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use amparo_triage::companion::{self, CompanionReply, Persona};

use crate::state::AppState;

#[derive(Deserialize)]
pub struct ReplyRequest {
    pub text: String,
    #[serde(default)]
    pub persona: Option<String>,
}

pub async fn reply(
    State(state): State<AppState>,
    Json(req): Json<ReplyRequest>,
) -> Json<CompanionReply> {
    let persona = req.persona.as_deref().map(Persona::parse).unwrap_or_default();
    Json(companion::reply(&state.flows.policy.taxonomy, &req.text, persona))
}
