use crate::{
    AppState,
    dto::{CreateHypeRequest, HypeCheckQuery, HypeCheckResponse},
    errors::ApiError,
    models::Hype,
};
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use tracing::info;
use validator::Validate;

use super::parse_id;

/// POST /api/hypes
/// Body: { "submissionId": "...", "userId": "..." }
///
/// One hype per user per submission; a repeat is rejected with
/// "Already hyped this submission".
pub async fn create_hype(
    State(state): State<AppState>,
    payload: Result<Json<CreateHypeRequest>, JsonRejection>,
) -> Result<Json<Hype>, ApiError> {
    let Json(payload) = payload?;
    payload
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;

    // A malformed user id can never name a bootstrapped user
    let user_id = parse_id(&payload.user_id).ok_or(ApiError::UserNotFound)?;
    let submission_id = parse_id(&payload.submission_id)
        .ok_or_else(|| ApiError::ValidationError("Invalid submissionId".into()))?;

    let hype = state.store.award_hype(submission_id, user_id)?;

    info!("Hype {} on submission {} by user {}", hype.id, submission_id, user_id);

    Ok(Json(hype))
}

/// GET /api/hypes/check?submissionId=...&userId=...
pub async fn check_hype(
    State(state): State<AppState>,
    query: Result<Query<HypeCheckQuery>, QueryRejection>,
) -> Result<Json<HypeCheckResponse>, ApiError> {
    let Query(query) = query?;

    let hyped = match (parse_id(&query.submission_id), parse_id(&query.user_id)) {
        (Some(submission_id), Some(user_id)) => {
            state.store.has_user_hyped(&submission_id, &user_id)
        }
        _ => false,
    };

    Ok(Json(HypeCheckResponse { hyped }))
}
