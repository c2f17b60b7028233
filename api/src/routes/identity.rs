use crate::{
    AppState,
    dto::{IdentityRequest, IdentityResponse},
    errors::ApiError,
    models::NewUser,
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::info;
use validator::Validate;

/// POST /api/identity
/// Body: { "username": "...", "state": "...", "platoon": "..." }
///
/// Returns the user registered under `username`, creating it first if
/// needed. An existing user keeps its original state and platoon.
pub async fn bootstrap_identity(
    State(state): State<AppState>,
    payload: Result<Json<IdentityRequest>, JsonRejection>,
) -> Result<Json<IdentityResponse>, ApiError> {
    let Json(payload) = payload?;
    payload
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;

    let (user, was_created) = state.store.bootstrap_identity(NewUser {
        username: payload.username,
        state: payload.state,
        platoon: payload.platoon,
    });

    if was_created {
        info!("New user registered: {} ({})", user.username, user.id);
    }

    Ok(Json(IdentityResponse { user, was_created }))
}
