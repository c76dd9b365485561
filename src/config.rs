//! Runtime configuration
//!
//! Server settings come from the environment (a `.env` file is loaded by
//! `main` first). Bad values are logged and replaced by defaults.

use crate::catalog::ChallengeCatalog;
use crate::engine::tally::{CATEGORY_CEILING, MAX_VOTE_DELTA};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ROOM_CODE: &str = "KITCHEN-101";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:6574";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_TICK_MILLIS: u64 = 1000;

/// Engine constants applied to every new session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    pub vote_ceiling: u32,
    pub max_vote_delta: u32,
    pub default_room_code: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            vote_ceiling: CATEGORY_CEILING,
            max_vote_delta: MAX_VOTE_DELTA,
            default_room_code: DEFAULT_ROOM_CODE.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
    /// Optional JSON file replacing the built-in challenge list
    pub challenges_file: Option<PathBuf>,
    /// Countdown tick period, one second outside of tests and demos
    pub tick_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 6574)),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            challenges_file: None,
            tick_interval: Duration::from_millis(DEFAULT_TICK_MILLIS),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

impl ServerConfig {
    /// Load server config from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind_addr = match non_empty_var("KITCHEN_BIND_ADDR") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!(
                    "Invalid KITCHEN_BIND_ADDR {:?} ({}), using {}",
                    raw,
                    e,
                    DEFAULT_BIND_ADDR
                );
                defaults.bind_addr
            }),
            None => defaults.bind_addr,
        };

        let tick_interval = match non_empty_var("KITCHEN_TICK_MILLIS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(millis) if millis > 0 => Duration::from_millis(millis),
                _ => {
                    tracing::warn!(
                        "Invalid KITCHEN_TICK_MILLIS {:?}, using {}ms",
                        raw,
                        DEFAULT_TICK_MILLIS
                    );
                    defaults.tick_interval
                }
            },
            None => defaults.tick_interval,
        };

        Self {
            bind_addr,
            static_dir: non_empty_var("KITCHEN_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            challenges_file: non_empty_var("KITCHEN_CHALLENGES_FILE").map(PathBuf::from),
            tick_interval,
        }
    }

    /// Load the configured catalog, falling back to the built-in list
    pub fn load_catalog(&self) -> ChallengeCatalog {
        let Some(path) = &self.challenges_file else {
            return ChallengeCatalog::builtin();
        };

        match ChallengeCatalog::from_path(path) {
            Ok(catalog) => {
                tracing::info!(
                    "Loaded {} challenges from {}",
                    catalog.len(),
                    path.display()
                );
                catalog
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to load challenges from {}: {}. Using built-in catalog.",
                    path.display(),
                    e
                );
                ChallengeCatalog::builtin()
            }
        }
    }
}
