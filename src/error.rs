//! Error types for Kindling.
//!
//! All errors are strongly typed using thiserror so callers can pattern
//! match on the exact condition (a locked feature, a blank form field)
//! instead of parsing alert strings.

use thiserror::Error;

use crate::storage::StorageError;
use crate::subscription::{Feature, Tier};

/// Validation errors raised by forms and view-state operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required field '{field}' is missing")]
    MissingField {
        field: String,
    },

    #[error("Field '{field}' cannot be blank")]
    BlankField {
        field: String,
    },

    #[error("Field '{field}' value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Field '{field}' range is inverted: {min} > {max}")]
    InvertedRange {
        field: String,
        min: i64,
        max: i64,
    },

    #[error("Field '{field}' expects a whole number, got '{value}'")]
    InvalidNumber {
        field: String,
        value: String,
    },

    #[error("The profile is not being edited")]
    NotEditing,

    #[error("Invalid time of day '{value}', expected HH:MM")]
    InvalidTimeOfDay {
        value: String,
    },

    #[error("Unknown subscription tier '{value}'")]
    UnknownTier {
        value: String,
    },

    #[error("No conversation is selected")]
    NoConversationSelected,

    #[error("No profile is loaded")]
    NoProfileLoaded,

    #[error("Index {index} is out of bounds for {len} items")]
    IndexOutOfBounds {
        index: usize,
        len: usize,
    },

    #[error("The game has not been started")]
    GameNotStarted,

    #[error("There is no question to answer")]
    NoActiveQuestion,

    #[error("Verification step {step} is incomplete: {reason}")]
    IncompleteStep {
        step: u8,
        reason: String,
    },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::MissingField`].
    #[must_use]
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Shorthand for [`ValidationError::BlankField`].
    #[must_use]
    pub fn blank(field: impl Into<String>) -> Self {
        Self::BlankField {
            field: field.into(),
        }
    }
}

/// A subscription tier does not unlock the requested feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GatingError {
    #[error("{feature} is not available on the {tier} tier; upgrade to {upgrade_to}")]
    FeatureLocked {
        feature: Feature,
        tier: Tier,
        upgrade_to: Tier,
    },
}

impl GatingError {
    /// The feature that was denied.
    #[must_use]
    pub const fn feature(&self) -> Feature {
        match self {
            Self::FeatureLocked { feature, .. } => *feature,
        }
    }

    /// The tier the caller should be prompted to upgrade to.
    #[must_use]
    pub const fn upgrade_to(&self) -> Tier {
        match self {
            Self::FeatureLocked { upgrade_to, .. } => *upgrade_to,
        }
    }
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value for '{field}': {reason}")]
    Invalid {
        field: String,
        reason: String,
    },
}

/// Top-level error type for Kindling.
#[derive(Debug, Error)]
pub enum KindlingError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Gating error: {0}")]
    Gating(#[from] GatingError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl KindlingError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a gating error.
    #[must_use]
    pub const fn is_gating(&self) -> bool {
        matches!(self, Self::Gating(_))
    }

    /// Returns true if this is a storage error.
    #[must_use]
    pub const fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Returns true if this is an internal error.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }

    /// Returns true if an upgrade would make the same call succeed.
    #[must_use]
    pub const fn needs_upgrade(&self) -> bool {
        self.is_gating()
    }
}

/// Result type alias for Kindling operations.
pub type KindlingResult<T> = Result<T, KindlingError>;
