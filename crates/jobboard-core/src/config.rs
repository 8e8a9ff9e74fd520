//! Listing configuration.
//!
//! Loaded from a `[listing]` TOML table or built in code. Every listing
//! call receives a `ListingConfig`; there is no global configuration.

use crate::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("listing config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("listing config invalid: {0}")]
    Invalid(String),
}

///
/// ListingConfig
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingConfig {
    /// Page size used when the caller gives no limit.
    pub default_limit: u32,
    /// Hard cap; larger requested limits are silently clamped.
    pub max_limit: u32,
}

impl ListingConfig {
    /// Build a validated config.
    pub fn new(default_limit: u32, max_limit: u32) -> Result<Self, ConfigError> {
        let config = Self {
            default_limit,
            max_limit,
        };
        config.validate()?;

        Ok(config)
    }

    ///
    /// Parse a TOML document.
    ///
    /// Accepts either a bare table (`max_limit = 50`) or one nested under
    /// `[listing]`. Missing keys fall back to defaults.
    ///
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Wrapped {
            listing: ListingConfig,
        }

        let table: toml::Table = toml::from_str(content)?;
        let config = if table.contains_key("listing") {
            toml::from_str::<Wrapped>(content)?.listing
        } else {
            toml::from_str::<Self>(content)?
        };
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_limit == 0 {
            return Err(ConfigError::Invalid("max_limit must be positive".into()));
        }
        if self.default_limit == 0 {
            return Err(ConfigError::Invalid("default_limit must be positive".into()));
        }
        if self.default_limit > self.max_limit {
            return Err(ConfigError::Invalid(format!(
                "default_limit {} exceeds max_limit {}",
                self.default_limit, self.max_limit
            )));
        }

        Ok(())
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_LIMIT,
            max_limit: MAX_PAGE_LIMIT,
        }
    }
}
