use crate::{AppState, models::User};
use axum::{Json, extract::State};

/// GET /api/leaderboard
/// Users ranked by total hype points
pub async fn get_leaderboard(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.store.get_leaderboard())
}
