use crate::{DEFAULT_FALLBACK_THRESHOLD, WELL_KNOWN_BUCKET_SIZES};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// FilterConfig
///
/// Tunables for membership filter construction, loadable from TOML.
/// Every field has a default, so an empty document is a valid config.
///
/// ```toml
/// fallback_threshold = 1024
/// well_known_sizes = [0, 50, 51, 100, 101]
/// ```
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Unique candidate count above which the native membership test
    /// replaces the bucketized OR-tree.
    pub fallback_threshold: usize,

    /// Candidate counts kept exactly instead of rounding to a power of two.
    pub well_known_sizes: Vec<usize>,
}

impl FilterConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input).map_err(|err| ConfigError::Parse {
            message: err.to_string(),
        })?;
        config.validate()?;

        Ok(config)
    }

    /// Render this config as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|err| ConfigError::Parse {
            message: err.to_string(),
        })
    }

    /// Reject configs whose tree path could never be taken.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fallback_threshold == 0 {
            return Err(ConfigError::Invalid {
                field: "fallback_threshold",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            fallback_threshold: DEFAULT_FALLBACK_THRESHOLD,
            well_known_sizes: WELL_KNOWN_BUCKET_SIZES.to_vec(),
        }
    }
}

///
/// ConfigError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ConfigError {
    #[error("invalid filter config: {message}")]
    Parse { message: String },

    #[error("invalid filter config field '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}
