//! Structural summary of a validated collection.

use serde::{Deserialize, Serialize};

use crate::model::layout::CollectionLayout;

/// Metadata the pipeline records for every validated collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionMetadata {
    pub n_cases: usize,
    pub n_channels: usize,
    pub min_length: usize,
    pub max_length: usize,
    pub has_missing: bool,
    /// Layout the input was detected as.
    pub layout: CollectionLayout,
}

impl CollectionMetadata {
    pub fn is_equal_length(&self) -> bool {
        self.min_length == self.max_length
    }

    pub fn is_univariate(&self) -> bool {
        self.n_channels == 1
    }
}

/// Lifecycle phase a collection is validated for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase<'a> {
    Fit,
    /// Predict or transform, checked against the metadata recorded at fit.
    Apply { fitted: &'a CollectionMetadata },
}

impl<'a> Phase<'a> {
    pub fn is_fit(&self) -> bool {
        matches!(self, Phase::Fit)
    }
}
