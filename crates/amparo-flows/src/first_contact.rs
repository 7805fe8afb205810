//! First contact: open a session and collect the 21 DASS-21 answers one at a
//! time. The 21st answer scores the session and moves it to negotiation.

use serde::Serialize;
use uuid::Uuid;

use amparo_audit::{AuditAction, AuditEvent};
use amparo_core::models::score::{DASS21_ITEM_COUNT, Dass21Score};
use amparo_core::models::session::{CrisisSession, SessionStage};
use amparo_instruments::instruments::dass21::{self, RESPONSE_RANGE};
use amparo_instruments::scoring::ValidationError;
use amparo_storage::store::update_session;

use crate::context::FlowContext;
use crate::error::FlowError;

#[derive(Debug, Clone, Serialize)]
pub struct StartedSession {
    pub session_id: Uuid,
    pub stage: SessionStage,
    pub question_index: usize,
    pub question_text: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub session_id: Uuid,
    pub index: usize,
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnswerOutcome {
    /// More answers needed.
    Next {
        next_index: usize,
        next_text: &'static str,
    },
    /// All 21 answers present; the session moved on.
    Completed {
        scores: Dass21Score,
        next_stage: SessionStage,
    },
}

/// Create a session and hand back the first question.
pub async fn start(
    ctx: &FlowContext,
    user_id: Option<String>,
    channel: &str,
) -> Result<StartedSession, FlowError> {
    let session = CrisisSession::new(user_id, channel);
    ctx.store.create(&session).await?;

    let mut event = AuditEvent::new(AuditAction::SessionStarted, "session", session.id.to_string())
        .with_details(serde_json::json!({ "channel": channel }));
    if let Some(user) = &session.user_id {
        event = event.by(user.as_str());
    }
    event.emit();

    Ok(StartedSession {
        session_id: session.id,
        stage: session.stage,
        question_index: 0,
        question_text: question_text(0)?,
    })
}

/// Question text for an index of an existing session.
pub async fn question(ctx: &FlowContext, session_id: Uuid, index: i64) -> Result<Question, FlowError> {
    ctx.store
        .get(session_id)
        .await?
        .ok_or_else(|| FlowError::session_not_found(session_id))?;

    let index = item_index(index)?;
    Ok(Question {
        session_id,
        index,
        text: question_text(index)?,
    })
}

/// Record one answer. Re-answering an index overwrites it while the session
/// is still collecting answers.
pub async fn submit_answer(
    ctx: &FlowContext,
    session_id: Uuid,
    index: i64,
    value: i64,
) -> Result<AnswerOutcome, FlowError> {
    let index = item_index(index)?;
    if !RESPONSE_RANGE.contains(value) {
        return Err(FlowError::Validation(ValidationError {
            item: Some(index),
            value: Some(value),
            expected_range: Some(RESPONSE_RANGE),
            message: format!(
                "response {value} is outside range [{}, {}]",
                RESPONSE_RANGE.min, RESPONSE_RANGE.max
            ),
        }));
    }
    // range-checked above
    let value = value as u8;

    let current = ctx
        .store
        .get(session_id)
        .await?
        .ok_or_else(|| FlowError::session_not_found(session_id))?;
    if current.value.stage != SessionStage::Assessment {
        return Err(FlowError::WrongStage {
            expected: SessionStage::Assessment,
            actual: current.value.stage,
        });
    }

    let cutpoints = ctx.policy.dass21;
    let (session, step) = update_session(ctx.store.as_ref(), session_id, |session| {
        // Re-checked here: another writer may have completed the session.
        if session.stage != SessionStage::Assessment {
            return Step::WrongStage(session.stage);
        }
        let Some(slot) = session.answers.get_mut(index) else {
            return Step::Malformed;
        };
        *slot = Some(value);

        let answers = match session.complete_answers() {
            Ok(Some(answers)) => answers,
            Ok(None) => return Step::Recorded,
            Err(_) => return Step::Malformed,
        };
        match dass21::score_answers(&cutpoints, &answers) {
            Ok(scores) => {
                session.scores = Some(scores);
                session.stage = SessionStage::Negotiation;
                Step::Completed(scores)
            }
            Err(e) => Step::Invalid(e),
        }
    })
    .await?;

    match step {
        Step::WrongStage(actual) => Err(FlowError::WrongStage {
            expected: SessionStage::Assessment,
            actual,
        }),
        Step::Invalid(e) => Err(FlowError::Validation(e)),
        Step::Malformed => Err(FlowError::invalid(format!(
            "session {session_id} does not hold {DASS21_ITEM_COUNT} answer slots"
        ))),
        Step::Recorded => {
            AuditEvent::new(AuditAction::AnswerRecorded, "session", session_id.to_string())
                .with_details(serde_json::json!({ "index": index }))
                .emit();
            let next_index = session
                .next_unanswered()
                .ok_or_else(|| FlowError::invalid("session has no unanswered items"))?;
            Ok(AnswerOutcome::Next {
                next_index,
                next_text: question_text(next_index)?,
            })
        }
        Step::Completed(scores) => {
            AuditEvent::new(AuditAction::AssessmentCompleted, "session", session_id.to_string())
                .with_details(serde_json::json!({
                    "total": scores.total,
                    "risk_level": scores.risk_level.as_u8(),
                }))
                .emit();
            Ok(AnswerOutcome::Completed {
                scores,
                next_stage: session.stage,
            })
        }
    }
}

/// What happened inside one compare-and-set round.
enum Step {
    Recorded,
    Completed(Dass21Score),
    WrongStage(SessionStage),
    Invalid(ValidationError),
    Malformed,
}

fn item_index(index: i64) -> Result<usize, FlowError> {
    usize::try_from(index)
        .ok()
        .filter(|i| *i < DASS21_ITEM_COUNT)
        .ok_or_else(|| {
            FlowError::Validation(ValidationError {
                item: None,
                value: Some(index),
                expected_range: None,
                message: format!("item index {index} is outside 0..{DASS21_ITEM_COUNT}"),
            })
        })
}

fn question_text(index: usize) -> Result<&'static str, FlowError> {
    dass21::question(index).ok_or_else(|| FlowError::invalid(format!("no question at {index}")))
}
