//! Pipeline configuration types.

use serde::{Deserialize, Serialize};

/// Default tolerance on probability row sums.
pub const DEFAULT_PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Configuration shared by the validation pipeline and the role façades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Allowed deviation of a probability row sum from 1.0 (default: 1e-6).
    pub probability_tolerance: f64,
    /// Whether `fit` may be called again on a fitted estimator (default: true).
    pub allow_refit: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            probability_tolerance: DEFAULT_PROBABILITY_TOLERANCE,
            allow_refit: true,
        }
    }
}

impl PipelineConfig {
    pub fn new(probability_tolerance: f64, allow_refit: bool) -> Self {
        Self {
            probability_tolerance,
            allow_refit,
        }
    }

    /// Default configuration with refitting disabled.
    pub fn fit_once() -> Self {
        Self {
            allow_refit: false,
            ..Self::default()
        }
    }
}

/// Builder for PipelineConfig.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    probability_tolerance: Option<f64>,
    allow_refit: Option<bool>,
}

impl PipelineConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the probability row-sum tolerance.
    pub fn probability_tolerance(mut self, tolerance: f64) -> Self {
        self.probability_tolerance = Some(tolerance);
        self
    }

    /// Allow or forbid refitting.
    pub fn allow_refit(mut self, allow: bool) -> Self {
        self.allow_refit = Some(allow);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<PipelineConfig, &'static str> {
        let defaults = PipelineConfig::default();
        let probability_tolerance = self
            .probability_tolerance
            .unwrap_or(defaults.probability_tolerance);
        if !probability_tolerance.is_finite() || probability_tolerance < 0.0 {
            return Err("probability_tolerance must be a finite, non-negative number");
        }
        Ok(PipelineConfig {
            probability_tolerance,
            allow_refit: self.allow_refit.unwrap_or(defaults.allow_refit),
        })
    }
}
