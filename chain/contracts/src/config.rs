//! Registry configuration

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Default page size ceiling for `Registry::list`
pub const DEFAULT_MAX_PAGE_SIZE: usize = 20;

/// Default number of donors kept on each campaign's leaderboard
pub const DEFAULT_LEADERBOARD_CAPACITY: usize = 10;

/// Configuration for a registry and the campaigns it creates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Upper bound applied to every requested `limit`.
    pub max_page_size: usize,
    /// Leaderboard capacity N of every campaign.
    pub leaderboard_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            leaderboard_capacity: DEFAULT_LEADERBOARD_CAPACITY,
        }
    }
}

impl RegistryConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RegistryConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_page_size == 0 {
            return Err(ConfigError::Invalid {
                field: "max_page_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.leaderboard_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "leaderboard_capacity",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
