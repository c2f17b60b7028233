use crate::{
    AppState,
    dto::{CreateSubmissionRequest, SubmissionQuery},
    errors::ApiError,
    models::{Submission, SubmissionDraft},
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use tracing::info;
use validator::Validate;

use super::parse_id;

/// GET /api/submissions
/// GET /api/submissions?challengeId=...
///
/// Without a filter: newest first. With one: the challenge's submissions in
/// the order they were made.
pub async fn get_submissions(
    State(state): State<AppState>,
    query: Result<Query<SubmissionQuery>, QueryRejection>,
) -> Result<Json<Vec<Submission>>, ApiError> {
    let Query(query) = query?;

    let submissions = match query.challenge_id.as_deref().filter(|id| !id.is_empty()) {
        Some(raw) => parse_id(raw)
            .map(|id| state.store.get_submissions_by_challenge(&id))
            .unwrap_or_default(),
        None => state.store.get_all_submissions(),
    };

    Ok(Json(submissions))
}

/// GET /api/submissions/{id}
pub async fn get_submission(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Submission>, ApiError> {
    parse_id(&id)
        .and_then(|id| state.store.get_submission(&id))
        .map(Json)
        .ok_or(ApiError::NotFound("Submission not found"))
}

/// POST /api/submissions
/// Body: { "challengeId": "...", "username": "...", "caption": "...",
///         "mediaType": "image" | "video", "mediaUrl": "..." }
///
/// The author must already exist (see POST /api/identity).
pub async fn create_submission(
    State(state): State<AppState>,
    payload: Result<Json<CreateSubmissionRequest>, JsonRejection>,
) -> Result<Json<Submission>, ApiError> {
    let Json(payload) = payload?;
    payload
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;

    let challenge_id = parse_id(&payload.challenge_id)
        .ok_or_else(|| ApiError::ValidationError("Invalid challengeId".into()))?;

    let submission = state.store.submit(
        &payload.username,
        SubmissionDraft {
            challenge_id,
            caption: payload.caption,
            media_type: payload.media_type,
            media_url: payload.media_url,
        },
    )?;

    info!(
        "Submission created: {} by {} for challenge {}",
        submission.id, submission.username, submission.challenge_id
    );

    Ok(Json(submission))
}
