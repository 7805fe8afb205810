use axum::extract::{Query, State};
use axum::{Extension, Json};
use serde::Deserialize;

use amparo_core::models::assessment::AssessmentRecord;
use amparo_flows::assessments::{self, Submitted};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SubmitRequest {
    pub answers: Vec<i32>,
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

pub async fn submit_dass21(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<Submitted>, ApiError> {
    let submitted = assessments::submit(&state.flows, &user.sub, &req.answers).await?;
    Ok(Json(submitted))
}

pub async fn history(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(q): Query<HistoryQuery>,
) -> Result<Json<Vec<AssessmentRecord>>, ApiError> {
    let records = assessments::history(&state.flows, &user.sub, q.limit).await?;
    Ok(Json(records))
}
