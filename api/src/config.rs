use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub seed_challenges: bool,
    pub write_rate_per_second: u32,
    pub write_burst: u32,
    pub max_concurrent_requests: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            seed_challenges: true,
            write_rate_per_second: 20,
            write_burst: 40,
            max_concurrent_requests: 1024,
        }
    }
}

impl Config {
    /// Reads the environment (after `.env` has been loaded). Missing or
    /// unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: try_load("PORT", defaults.port),
            seed_challenges: try_load("SEED_CHALLENGES", defaults.seed_challenges),
            write_rate_per_second: try_load("WRITE_RATE_PER_SECOND", defaults.write_rate_per_second),
            write_burst: try_load("WRITE_BURST", defaults.write_burst),
            max_concurrent_requests: nonzero_or(
                "MAX_CONCURRENT_REQUESTS",
                try_load("MAX_CONCURRENT_REQUESTS", defaults.max_concurrent_requests),
                defaults.max_concurrent_requests,
            ),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => parse_or(key, &raw, default),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}

fn parse_or<T>(key: &str, raw: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}

/// A zero concurrency limit would admit no request at all.
fn nonzero_or(key: &str, value: usize, default: usize) -> usize {
    if value == 0 {
        warn!("{key} must be at least 1, using default: {default}");
        return default;
    }
    value
}
