use crate::models::User;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResponse {
    pub user: User,
    pub was_created: bool,
}

#[derive(Debug, Serialize)]
pub struct HypeCheckResponse {
    pub hyped: bool,
}
