//! Error types for estimator operations
//!
//! This module provides the [`EstimatorError`] enum and [`Result`] type alias
//! shared by every crate of the estimator stack.

mod estimator_error;

pub use estimator_error::{ErrorCategory, EstimatorError, Result};
