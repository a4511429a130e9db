//! Error types for the Remedy decision-support pipeline.
//!
//! Every fallible operation returns `RemedyResult<T>`. None of these errors is
//! fatal to the process: callers convert them into a single user-facing
//! `Advisory` at the boundary and the request can simply be resubmitted.

use thiserror::Error;

/// The unified error type for the Remedy workspace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemedyError {
    /// A caller-supplied identifier was malformed or empty (e.g. a blank
    /// disease label, or a diastolic reading above the systolic one).
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// The request did not carry enough data to be evaluated: fewer than two
    /// drugs for an interaction check, no symptoms, or unfilled patient fields.
    #[error("insufficient input: {reason}")]
    InsufficientInput { reason: String },

    /// A backing table or model artifact could not be loaded, or it lacks the
    /// structure the pipeline requires.
    #[error("data unavailable: {reason}")]
    DataUnavailable { reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

impl RemedyError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput { reason: reason.into() }
    }

    pub fn insufficient_input(reason: impl Into<String>) -> Self {
        Self::InsufficientInput { reason: reason.into() }
    }

    pub fn data_unavailable(reason: impl Into<String>) -> Self {
        Self::DataUnavailable { reason: reason.into() }
    }

    /// The bare reason, without the error-kind prefix.
    pub fn reason(&self) -> &str {
        match self {
            Self::InvalidInput { reason }
            | Self::InsufficientInput { reason }
            | Self::DataUnavailable { reason }
            | Self::ConfigError { reason } => reason,
        }
    }
}

/// Convenience alias used throughout the Remedy crates.
pub type RemedyResult<T> = Result<T, RemedyError>;
