//! Standalone DASS-21 submission: score all 21 answers at once and keep the
//! result in the user's history.

use serde::Serialize;
use uuid::Uuid;

use amparo_audit::{AuditAction, AuditEvent};
use amparo_core::models::assessment::AssessmentRecord;
use amparo_core::models::score::Dass21Score;
use amparo_core::store_keys;
use amparo_instruments::Instrument;
use amparo_instruments::instruments::dass21::{self, Dass21};

use crate::context::FlowContext;
use crate::error::FlowError;

pub const DEFAULT_HISTORY_LIMIT: usize = 6;
pub const MAX_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submitted {
    pub assessment_id: Uuid,
    pub score: Dass21Score,
}

/// Score and persist a submission. Nothing is stored when validation fails.
pub async fn submit(ctx: &FlowContext, user_id: &str, answers: &[i32]) -> Result<Submitted, FlowError> {
    check_user_id(user_id)?;
    let score = dass21::score(&ctx.policy.dass21, answers)?;

    let record = AssessmentRecord {
        id: Uuid::new_v4(),
        user_id: user_id.to_string(),
        instrument_id: Dass21.id().to_string(),
        score,
        created_at: jiff::Timestamp::now(),
    };
    ctx.store.save_assessment(&record).await?;

    AuditEvent::new(AuditAction::AssessmentSubmitted, "assessment", record.id.to_string())
        .by(user_id)
        .with_details(serde_json::json!({
            "total": score.total,
            "risk_level": score.risk_level.as_u8(),
        }))
        .emit();

    Ok(Submitted {
        assessment_id: record.id,
        score,
    })
}

/// Most recent assessments for a user, newest first.
pub async fn history(
    ctx: &FlowContext,
    user_id: &str,
    limit: Option<usize>,
) -> Result<Vec<AssessmentRecord>, FlowError> {
    check_user_id(user_id)?;
    let limit = limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    Ok(ctx.store.assessment_history(user_id, limit).await?)
}

/// User ids become part of object keys.
fn check_user_id(user_id: &str) -> Result<(), FlowError> {
    if store_keys::is_key_segment(user_id) {
        Ok(())
    } else {
        Err(FlowError::invalid("user id is not a valid key segment"))
    }
}
