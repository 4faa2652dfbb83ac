//! Runtime configuration.
//!
//! Every field has a default matching the stock mock delays, so an empty
//! JSON object is a valid config.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::icebreaker::DEFAULT_PENALTY;
use crate::verification::DEFAULT_THRESHOLD;

/// Tunables for the mock service and view state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindlingConfig {
    /// Delay for like, reject, super like and send message.
    pub action_latency_ms: u64,
    /// Delay for super like blast and AI DM blast.
    pub blast_latency_ms: u64,
    /// Delay before conversation suggestions appear.
    pub suggestion_latency_ms: u64,
    /// Delay for the photo verification check.
    pub photo_verification_latency_ms: u64,
    /// Lowest verification score that unlocks the app.
    pub verification_threshold: u32,
    /// Points removed for a negatively judged icebreaker answer.
    pub negative_answer_penalty: u32,
    /// Period of the FOMO alert ticker.
    pub alert_interval_secs: u64,
}

impl Default for KindlingConfig {
    fn default() -> Self {
        Self {
            action_latency_ms: 500,
            blast_latency_ms: 2_000,
            suggestion_latency_ms: 1_500,
            photo_verification_latency_ms: 2_000,
            verification_threshold: DEFAULT_THRESHOLD,
            negative_answer_penalty: DEFAULT_PENALTY,
            alert_interval_secs: 30,
        }
    }
}

impl KindlingConfig {
    /// A config with every delay set to zero, for tests and scripted demos.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            action_latency_ms: 0,
            blast_latency_ms: 0,
            suggestion_latency_ms: 0,
            photo_verification_latency_ms: 0,
            ..Self::default()
        }
    }

    /// Parses and validates a JSON config.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON and
    /// `ConfigError::Invalid` for values rejected by [`KindlingConfig::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` when the file cannot be read, otherwise
    /// the same errors as [`KindlingConfig::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for a zero threshold or a zero alert interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.verification_threshold == 0 {
            return Err(ConfigError::Invalid {
                field: "verification_threshold".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.alert_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "alert_interval_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Action delay as a `Duration`.
    #[must_use]
    pub const fn action_latency(&self) -> Duration {
        Duration::from_millis(self.action_latency_ms)
    }

    /// Blast delay as a `Duration`.
    #[must_use]
    pub const fn blast_latency(&self) -> Duration {
        Duration::from_millis(self.blast_latency_ms)
    }

    /// Suggestion delay as a `Duration`.
    #[must_use]
    pub const fn suggestion_latency(&self) -> Duration {
        Duration::from_millis(self.suggestion_latency_ms)
    }

    /// Photo verification delay as a `Duration`.
    #[must_use]
    pub const fn photo_verification_latency(&self) -> Duration {
        Duration::from_millis(self.photo_verification_latency_ms)
    }

    /// Alert ticker period as a `Duration`.
    #[must_use]
    pub const fn alert_interval(&self) -> Duration {
        Duration::from_secs(self.alert_interval_secs)
    }
}
