use axum::Json;
use serde::Deserialize;

use amparo_triage::crisis::{self, CrisisResponse};

#[derive(Deserialize)]
pub struct RespondRequest {
    #[serde(default)]
    pub text: String,
}

pub async fn respond(Json(req): Json<RespondRequest>) -> Json<CrisisResponse> {
    Json(crisis::respond(&req.text))
}
