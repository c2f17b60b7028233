use crate::{AppState, errors::ApiError, models::User};
use axum::{
    Json,
    extract::{Path, State},
};

use super::parse_id;

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    parse_id(&id)
        .and_then(|id| state.store.get_user(&id))
        .map(Json)
        .ok_or(ApiError::NotFound("User not found"))
}
