//! Estimator error types
//!
//! Defines the standardized error type for tag lookups, collection
//! validation, lifecycle checks and algorithm hooks.

use thiserror::Error;

use crate::model::{Capability, CollectionLayout, TagKey};

/// Result type alias for estimator operations
pub type Result<T> = std::result::Result<T, EstimatorError>;

/// Errors that can occur while configuring, fitting or applying an estimator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimatorError {
    /// A tag name outside the fixed vocabulary was requested
    #[error("Unknown tag '{0}'")]
    UnknownTag(String),

    /// A tag was given a value of the wrong kind
    #[error("Tag '{key}' expects a {expected} value, got {got}")]
    TagTypeMismatch {
        key: TagKey,
        expected: &'static str,
        got: String,
    },

    /// The tag set is incomplete or internally inconsistent
    #[error("Invalid tags: {0}")]
    InvalidTags(String),

    /// `set_tag` was called on a fitted estimator
    #[error("Tag '{0}' cannot be set after fit; use override_tag")]
    TagsFrozen(TagKey),

    /// Input does not match any recognized collection layout
    #[error("Invalid input type: {0}")]
    InvalidInputType(String),

    /// Input is a recognized layout but structurally malformed
    #[error("Invalid input shape: expected {expected}, got {got}")]
    InvalidInputShape { expected: String, got: String },

    /// Input layout cannot be losslessly converted to a supported layout
    #[error("Unsupported input type: {got} cannot be converted to any of [{supported}]")]
    UnsupportedInputType {
        got: CollectionLayout,
        supported: String,
    },

    /// Input is well formed but needs a capability the estimator lacks
    #[error("{estimator} cannot handle {capability}: {detail}")]
    NotSupported {
        estimator: String,
        capability: Capability,
        detail: String,
    },

    /// Predict/transform input disagrees with the channel count seen in fit
    #[error("Channel mismatch: fitted on {expected} channel(s), got {got}")]
    ChannelMismatch { expected: usize, got: usize },

    /// Target length differs from the number of instances
    #[error("Target length mismatch: expected {expected} value(s), got {got}")]
    TargetLength { expected: usize, got: usize },

    /// The estimator needs a target but none was given
    #[error("{0} requires a target in fit")]
    TargetRequired(String),

    /// Target values are unusable for the estimator's role
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// A fitted-only method was called before fit
    #[error("This instance of {0} has not been fitted yet; call fit first")]
    NotFitted(String),

    /// Refit was attempted with refitting disabled
    #[error("{0} is already fitted and refitting is disabled")]
    AlreadyFitted(String),

    /// The algorithm returned output violating the declared output contract
    #[error("Output contract violated: {0}")]
    OutputContract(String),

    /// Error raised inside a concrete algorithm hook
    #[error("Algorithm error: {0}")]
    Algorithm(String),
}

/// Coarse grouping of [`EstimatorError`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Estimator misconfiguration; never recovered
    Programmer,
    /// Malformed input
    Structural,
    /// Well-formed input the estimator cannot handle
    Capability,
    /// Fit-before-predict violations
    Lifecycle,
    /// Bad values (targets, channel counts vs fit)
    Value,
    /// Failures inside or returned by the algorithm
    Algorithm,
}

impl EstimatorError {
    /// Category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            EstimatorError::UnknownTag(_)
            | EstimatorError::TagTypeMismatch { .. }
            | EstimatorError::InvalidTags(_)
            | EstimatorError::TagsFrozen(_) => ErrorCategory::Programmer,
            EstimatorError::InvalidInputType(_) | EstimatorError::InvalidInputShape { .. } => {
                ErrorCategory::Structural
            }
            EstimatorError::UnsupportedInputType { .. } | EstimatorError::NotSupported { .. } => {
                ErrorCategory::Capability
            }
            EstimatorError::NotFitted(_) | EstimatorError::AlreadyFitted(_) => {
                ErrorCategory::Lifecycle
            }
            EstimatorError::ChannelMismatch { .. }
            | EstimatorError::TargetLength { .. }
            | EstimatorError::TargetRequired(_)
            | EstimatorError::InvalidTarget(_) => ErrorCategory::Value,
            EstimatorError::OutputContract(_) | EstimatorError::Algorithm(_) => {
                ErrorCategory::Algorithm
            }
        }
    }

    /// Shorthand for an [`EstimatorError::InvalidInputShape`].
    pub fn shape(expected: impl Into<String>, got: impl Into<String>) -> Self {
        EstimatorError::InvalidInputShape {
            expected: expected.into(),
            got: got.into(),
        }
    }
}
