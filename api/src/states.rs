use crate::{config::Config, ratelimit::write_limiter, store::EngagementStore};
use governor::DefaultDirectRateLimiter;
use std::sync::Arc;

// ============================================================================
// APPLICATION STATE - Shared data across all requests
// ============================================================================
/// Cheap to clone: every handler gets its own copy of the handles.
///
/// The store is built once in `main` and handed to the router here, so tests
/// can run against isolated instances.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<EngagementStore>,
    pub write_limiter: Arc<DefaultDirectRateLimiter>,
}

impl AppState {
    pub fn new(store: EngagementStore, config: &Config) -> Self {
        Self {
            store: Arc::new(store),
            write_limiter: write_limiter(config.write_rate_per_second, config.write_burst),
        }
    }
}
