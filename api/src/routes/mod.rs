pub mod challenge;
pub mod health;
pub mod hype;
pub mod identity;
pub mod leaderboard;
pub mod submission;
pub mod user;

use uuid::Uuid;

/// Ids are opaque to clients; anything that is not a UUID simply matches
/// nothing.
fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
