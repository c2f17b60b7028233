// ============================================================================
// CAMP HYPE API
// ============================================================================

// - Identity bootstrap (get-or-create by username)
// - Challenges, media submissions and one-time hypes
// - Leaderboard of hype points
// - In-memory engagement store
// - Input validation
// - Write rate limiting
// - Structured logging

pub mod config;
pub mod dto;
pub mod errors;
pub mod models;
pub mod ratelimit;
pub mod routes;
pub mod seed;
pub mod states;
pub mod store;

pub use states::AppState;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use routes::{challenge, health, hype, identity, leaderboard, submission, user};

/// Builds the full HTTP surface around an already constructed state.
pub fn app(state: AppState, config: &config::Config) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route(
            "/challenges",
            get(challenge::get_challenges).post(challenge::create_challenge),
        )
        .route("/challenges/{id}", get(challenge::get_challenge))
        .route(
            "/submissions",
            get(submission::get_submissions).post(submission::create_submission),
        )
        .route("/submissions/{id}", get(submission::get_submission))
        .route("/hypes", post(hype::create_hype))
        .route("/hypes/check", get(hype::check_hype))
        .route("/leaderboard", get(leaderboard::get_leaderboard))
        .route("/users/{id}", get(user::get_user))
        .route("/identity", post(identity::bootstrap_identity))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            ratelimit::limit_writes,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(GlobalConcurrencyLimitLayer::new(
                    config.max_concurrent_requests.max(1),
                ))
                .layer(cors),
        )
}
