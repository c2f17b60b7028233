use crate::store::StoreError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::warn;

#[derive(Debug)]
pub enum ApiError {
    NotFound(&'static str),
    UserNotFound,
    AlreadyHyped,
    RateLimited,
    ValidationError(String),
}

/// Convert our custom errors to HTTP responses
///
/// Every error body has the shape `{ "error": "<message>" }`
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, what),
            ApiError::UserNotFound => (
                StatusCode::BAD_REQUEST,
                "User not found. Please bootstrap identity first.",
            ),
            ApiError::AlreadyHyped => (StatusCode::BAD_REQUEST, "Already hyped this submission"),
            ApiError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "Too many requests"),
            ApiError::ValidationError(msg) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({
                      "error": msg
                    })),
                )
                    .into_response();
            }
        };

        (
            status,
            Json(serde_json::json!({
              "error": message
            })),
        )
            .into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateHype { .. } => {
                warn!("Rejected hype: {}", err);
                ApiError::AlreadyHyped
            }
            StoreError::UserNotFound(_) => ApiError::UserNotFound,
            // Only reachable through create_user, which the routes never call
            // for a name that is already bound.
            StoreError::UsernameTaken(_) => ApiError::ValidationError(err.to_string()),
        }
    }
}

/// Malformed bodies and missing fields both surface as 400s.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::ValidationError(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::ValidationError(rejection.body_text())
    }
}
