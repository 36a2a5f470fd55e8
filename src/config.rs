//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{DEFAULT_BATCH_SIZE, DEFAULT_REFRESH_TIMEOUT, DEFAULT_TTL};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Lifetime of the public builds snapshot in seconds
    pub public_builds_ttl_secs: u64,
    /// Lifetime of a resolved creator display name in seconds
    pub user_name_ttl_secs: u64,
    /// Maximum number of usernames sent in one identity lookup
    pub name_lookup_batch_size: usize,
    /// Upper bound for one public builds refresh in seconds
    pub refresh_timeout_secs: u64,
    /// Coalesce concurrent public builds refreshes into one
    pub single_flight_refresh: bool,
    /// Background name-cache prune interval in seconds
    pub cleanup_interval: u64,
    /// Allowed CORS origins; empty means any origin
    pub allowed_origins: Vec<String>,
    /// Optional JSON file used to seed the in-memory backends
    pub seed_file: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `PUBLIC_BUILDS_TTL_SECS` - Public builds snapshot TTL (default: 120)
    /// - `USER_NAME_TTL_SECS` - Creator name TTL (default: 300)
    /// - `NAME_LOOKUP_BATCH_SIZE` - Usernames per identity lookup (default: 60)
    /// - `REFRESH_TIMEOUT_SECS` - Refresh timeout (default: 10)
    /// - `SINGLE_FLIGHT_REFRESH` - Coalesce concurrent refreshes (default: true)
    /// - `CLEANUP_INTERVAL` - Name-cache prune frequency in seconds (default: 60)
    /// - `ALLOWED_ORIGINS` - Comma-separated CORS origins (default: any)
    /// - `SEED_FILE` - Seed data for the in-memory backends (default: none)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            public_builds_ttl_secs: env_or("PUBLIC_BUILDS_TTL_SECS", defaults.public_builds_ttl_secs),
            user_name_ttl_secs: env_or("USER_NAME_TTL_SECS", defaults.user_name_ttl_secs),
            name_lookup_batch_size: env_or("NAME_LOOKUP_BATCH_SIZE", defaults.name_lookup_batch_size)
                .max(1),
            refresh_timeout_secs: env_or("REFRESH_TIMEOUT_SECS", defaults.refresh_timeout_secs),
            single_flight_refresh: env_or("SINGLE_FLIGHT_REFRESH", defaults.single_flight_refresh),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval).max(1),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
            seed_file: env::var("SEED_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Public builds snapshot lifetime.
    pub fn public_builds_ttl(&self) -> Duration {
        Duration::from_secs(self.public_builds_ttl_secs)
    }

    /// Creator display name lifetime.
    pub fn user_name_ttl(&self) -> Duration {
        Duration::from_secs(self.user_name_ttl_secs)
    }

    pub fn refresh_timeout(&self) -> Duration {
        Duration::from_secs(self.refresh_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            public_builds_ttl_secs: DEFAULT_TTL.as_secs(),
            user_name_ttl_secs: 300,
            name_lookup_batch_size: DEFAULT_BATCH_SIZE,
            refresh_timeout_secs: DEFAULT_REFRESH_TIMEOUT.as_secs(),
            single_flight_refresh: true,
            cleanup_interval: 60,
            allowed_origins: Vec::new(),
            seed_file: None,
        }
    }
}

/// Reads and parses an environment variable, falling back on absence or parse failure.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Splits a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}
