use crate::models::MediaType;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Validate, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRequest {
    #[validate(length(min = 2, max = 50, message = "Username must be 2-50 characters"))]
    pub username: String,
    #[validate(length(min = 2, max = 50, message = "State is required"))]
    pub state: String,
    #[validate(length(min = 1, max = 20, message = "Platoon is required"))]
    pub platoon: String,
}

#[derive(Debug, Validate, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChallengeRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(min = 1, max = 1000))]
    pub description: String,
    #[validate(length(min = 1, max = 16))]
    pub emoji: String,
}

#[derive(Debug, Validate, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubmissionRequest {
    #[validate(length(min = 1, message = "Please select a challenge"))]
    pub challenge_id: String,
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 10, max = 500, message = "Caption must be 10-500 characters"))]
    pub caption: String,
    pub media_type: MediaType,
    #[validate(length(min = 1, message = "Media URL is required"))]
    pub media_url: String,
}

#[derive(Debug, Validate, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHypeRequest {
    #[validate(length(min = 1, message = "Missing required fields"))]
    pub submission_id: String,
    #[validate(length(min = 1, message = "Missing required fields"))]
    pub user_id: String,
}

/// GET /api/submissions?challengeId=...
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionQuery {
    pub challenge_id: Option<String>,
}

/// GET /api/hypes/check?submissionId=...&userId=...
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HypeCheckQuery {
    pub submission_id: String,
    pub user_id: String,
}
