use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use uuid::Uuid;

use amparo_flows::eea::{self, StepSaved};
use amparo_flows::first_contact::{self, AnswerOutcome, Question, StartedSession};
use amparo_flows::negotiation::{self, NegotiationReply};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct StartRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default = "default_channel")]
    pub channel: String,
}

fn default_channel() -> String {
    "web".to_string()
}

#[derive(Deserialize)]
pub struct QuestionQuery {
    pub session_id: Uuid,
    #[serde(default)]
    pub index: i64,
}

#[derive(Deserialize)]
pub struct AnswerRequest {
    pub session_id: Uuid,
    pub index: i64,
    pub value: i64,
}

#[derive(Deserialize)]
pub struct NegotiationRequest {
    pub session_id: Uuid,
    pub message: String,
}

#[derive(Deserialize)]
pub struct EeaRequest {
    pub session_id: Uuid,
    pub step_key: String,
    #[serde(default)]
    pub user_text: String,
}

pub async fn start_first_contact(
    State(state): State<AppState>,
    Json(req): Json<StartRequest>,
) -> Result<Json<StartedSession>, ApiError> {
    let started = first_contact::start(&state.flows, req.user_id, &req.channel).await?;
    Ok(Json(started))
}

pub async fn dass21_question(
    State(state): State<AppState>,
    Query(q): Query<QuestionQuery>,
) -> Result<Json<Question>, ApiError> {
    let question = first_contact::question(&state.flows, q.session_id, q.index).await?;
    Ok(Json(question))
}

pub async fn dass21_answer(
    State(state): State<AppState>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<AnswerOutcome>, ApiError> {
    let outcome =
        first_contact::submit_answer(&state.flows, req.session_id, req.index, req.value).await?;
    Ok(Json(outcome))
}

pub async fn negotiation_message(
    State(state): State<AppState>,
    Json(req): Json<NegotiationRequest>,
) -> Result<Json<NegotiationReply>, ApiError> {
    let reply = negotiation::negotiate(&state.flows, req.session_id, &req.message).await?;
    Ok(Json(reply))
}

pub async fn eea_step(
    State(state): State<AppState>,
    Json(req): Json<EeaRequest>,
) -> Result<Json<StepSaved>, ApiError> {
    let saved = eea::step(&state.flows, req.session_id, &req.step_key, &req.user_text).await?;
    Ok(Json(saved))
}
