use axum::extract::{Query, State};
use axum::{Extension, Json};

use amparo_core::models::therapist::TherapistRecord;
use amparo_flows::directory::{self, NewTherapist, TherapistQuery};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<NewTherapist>,
) -> Result<Json<TherapistRecord>, ApiError> {
    if !user.can_edit_directory() {
        return Err(ApiError::Forbidden(
            "only admins and therapists may list therapists".to_string(),
        ));
    }
    let record = directory::register(&state.flows, &user.sub, req).await?;
    Ok(Json(record))
}

pub async fn search(
    State(state): State<AppState>,
    Query(q): Query<TherapistQuery>,
) -> Result<Json<Vec<TherapistRecord>>, ApiError> {
    let found = directory::search(&state.flows, &q).await?;
    Ok(Json(found))
}
