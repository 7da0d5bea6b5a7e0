//! Configuration module - environment variable parsing

use std::env;

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Seed for the world RNG (random when unset)
    pub world_seed: Option<u64>,
    /// Number of enemies spawned into the demo arena
    pub enemy_count: usize,
    /// Square arena side length in world units
    pub arena_size: f32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let world_seed = match env::var("WORLD_SEED") {
            Ok(raw) => Some(
                raw.parse()
                    .map_err(|_| ConfigError::Invalid("WORLD_SEED"))?,
            ),
            Err(_) => None,
        };

        let enemy_count = env::var("ENEMY_COUNT")
            .unwrap_or_else(|_| "3".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("ENEMY_COUNT"))?;

        let arena_size = env::var("ARENA_SIZE")
            .unwrap_or_else(|_| "4000".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("ARENA_SIZE"))?;

        Ok(Self {
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            world_seed,
            enemy_count,
            arena_size,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            world_seed: None,
            enemy_count: 3,
            arena_size: 4000.0,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
