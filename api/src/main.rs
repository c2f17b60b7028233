use camp_hype_api::{AppState, app, config::Config, store::EngagementStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env();

    let store = if config.seed_challenges {
        EngagementStore::seeded()
    } else {
        EngagementStore::new()
    };
    info!("Store ready with {} challenges", store.get_all_challenges().len());

    let state = AppState::new(store, &config);
    let app = app(state, &config);

    // Start server
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("API Endpoints:");
    info!("  GET    /health                  - Health check");
    info!("  GET    /api/challenges          - List challenges (most popular first)");
    info!("  POST   /api/challenges          - Create challenge");
    info!("  GET    /api/challenges/:id      - Get specific challenge");
    info!("  GET    /api/submissions         - List submissions (?challengeId=)");
    info!("  GET    /api/submissions/:id     - Get specific submission");
    info!("  POST   /api/submissions         - Submit to a challenge");
    info!("  POST   /api/hypes               - Hype a submission");
    info!("  GET    /api/hypes/check         - Has a user hyped a submission");
    info!("  GET    /api/leaderboard         - Users by hype points");
    info!("  GET    /api/users/:id           - Get specific user");
    info!("  POST   /api/identity            - Get or create user by username");

    axum::serve(listener, app).await?;

    Ok(())
}
