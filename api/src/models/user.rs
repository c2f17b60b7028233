use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub state: String,
    pub platoon: String,
    pub total_hype_points: u64,
}

/// Fields supplied when a user is first bootstrapped.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub state: String,
    pub platoon: String,
}
