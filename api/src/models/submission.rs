use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

/// A media post entered into a challenge.
///
/// `username`, `state` and `platoon` are a snapshot of the author taken when
/// the submission was created; they are not kept in sync with the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    pub challenge_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub state: String,
    pub platoon: String,
    pub caption: String,
    pub media_type: MediaType,
    pub media_url: String,
    pub hype_count: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub challenge_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub state: String,
    pub platoon: String,
    pub caption: String,
    pub media_type: MediaType,
    pub media_url: String,
}

/// What a caller supplies for a submission; the author snapshot is filled in
/// by the store.
#[derive(Debug, Clone)]
pub struct SubmissionDraft {
    pub challenge_id: Uuid,
    pub caption: String,
    pub media_type: MediaType,
    pub media_url: String,
}
