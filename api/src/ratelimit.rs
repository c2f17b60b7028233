use crate::{AppState, errors::ApiError};
use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::{num::NonZeroU32, sync::Arc};
use tracing::warn;

/// Process-wide limiter shared by every write endpoint.
pub fn write_limiter(per_second: u32, burst: u32) -> Arc<DefaultDirectRateLimiter> {
    let rate = NonZeroU32::new(per_second).unwrap_or(NonZeroU32::MIN);
    let burst = NonZeroU32::new(burst).unwrap_or(rate);
    Arc::new(RateLimiter::direct(Quota::per_second(rate).allow_burst(burst)))
}

/// Rejects POSTs with 429 once the write quota is spent. Reads pass through.
pub async fn limit_writes(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if request.method() == Method::POST && state.write_limiter.check().is_err() {
        warn!("Write rate limit hit on {}", request.uri().path());
        return Err(ApiError::RateLimited);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_is_exhausted_then_rejected() {
        let limiter = write_limiter(1, 3);
        for _ in 0..3 {
            assert!(limiter.check().is_ok());
        }
        assert!(limiter.check().is_err());
    }

    #[test]
    fn zero_settings_still_admit_one_request() {
        let limiter = write_limiter(0, 0);
        assert!(limiter.check().is_ok());
    }
}
