use axum::Json;
use axum::extract::Query;
use serde::{Deserialize, Serialize};

use amparo_core::models::risk::RiskLevel;
use amparo_triage::ads::{Screen, should_show_ads};

use crate::error::ApiError;

#[derive(Deserialize)]
pub struct SlotQuery {
    pub screen: String,
    #[serde(default)]
    pub risk_level: i64,
}

#[derive(Serialize)]
pub struct Slot {
    pub show: bool,
}

/// Unknown screens never get an ad.
pub async fn slot(Query(q): Query<SlotQuery>) -> Result<Json<Slot>, ApiError> {
    let level = RiskLevel::try_from(q.risk_level).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let show = Screen::parse(&q.screen).is_some_and(|screen| should_show_ads(screen, level));
    Ok(Json(Slot { show }))
}
