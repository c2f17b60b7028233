use crate::{
    AppState,
    dto::CreateChallengeRequest,
    errors::ApiError,
    models::{Challenge, NewChallenge},
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use tracing::info;
use validator::Validate;

use super::parse_id;

/// GET /api/challenges
/// Most popular first
pub async fn get_challenges(State(state): State<AppState>) -> Json<Vec<Challenge>> {
    Json(state.store.get_all_challenges())
}

/// POST /api/challenges
/// Body: { "title": "...", "description": "...", "emoji": "..." }
pub async fn create_challenge(
    State(state): State<AppState>,
    payload: Result<Json<CreateChallengeRequest>, JsonRejection>,
) -> Result<Json<Challenge>, ApiError> {
    let Json(payload) = payload?;
    payload
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;

    let challenge = state.store.create_challenge(NewChallenge {
        title: payload.title,
        description: payload.description,
        emoji: payload.emoji,
    });

    info!("Challenge created: {} ({})", challenge.id, challenge.title);

    Ok(Json(challenge))
}

/// GET /api/challenges/{id}
pub async fn get_challenge(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Challenge>, ApiError> {
    parse_id(&id)
        .and_then(|id| state.store.get_challenge(&id))
        .map(Json)
        .ok_or(ApiError::NotFound("Challenge not found"))
}
