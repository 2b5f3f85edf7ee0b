//! Collection validation and conversion pipeline.
//!
//! Sits between user data and algorithm hooks. Every check runs before any
//! conversion and the first failure aborts:
//!
//! 1. layout detection and structural checks (shape, channel consistency)
//! 2. channel count against the fitted count, predict/transform only
//! 3. layout permission, possibly through a lossless conversion
//! 4. multivariate, unequal-length and missing-value capabilities
//!
//! The accepted input is then converted into the estimator's canonical
//! layout.

mod checks;
mod convert;
mod detect;
mod output;
mod permission;
mod summary;
mod target;

use estimator_api::PipelineConfig;
use estimator_spi::{
    CanonicalCollection, CanonicalTarget, CollectionMetadata, Output, Phase, RawCollection,
    RawOutput, Result, Target,
};

use crate::registry::TagRegistry;

pub use convert::{convert, ragged_from_channels};
pub use detect::{detect, detect_layout, inspect, Detected};
pub use output::{convert_output, OutputContext};
pub use permission::is_reachable;
pub use summary::{
    has_missing, is_equal_length, is_univariate, metadata, n_cases, n_channels, n_timepoints,
};
pub use target::{validate_target, TargetKind};

/// Canonical input plus the metadata recorded while validating it.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    pub canonical: CanonicalCollection,
    pub metadata: CollectionMetadata,
}

/// Validates inputs and outputs for one estimator instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionPipeline {
    config: PipelineConfig,
}

impl CollectionPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Validate `raw` against the registry's tags and convert it into the
    /// canonical layout.
    pub fn validate_and_convert(
        &self,
        raw: &RawCollection,
        registry: &TagRegistry,
        phase: Phase<'_>,
    ) -> Result<Validated> {
        let name = registry.name();
        let tags = registry.tags();

        let Detected {
            collection,
            metadata,
        } = detect(raw)?;
        checks::check_phase(&metadata, phase)?;
        let accepted = permission::resolve_layout(&metadata, tags, name)?;
        checks::check_capabilities(&metadata, tags, name)?;

        let canonical_layout = registry.canonical_layout();
        tracing::debug!(
            estimator = name,
            detected = %metadata.layout,
            accepted = %accepted,
            canonical = %canonical_layout,
            fit = phase.is_fit(),
            "input validated"
        );
        let canonical = convert::to_canonical(collection, canonical_layout)?;
        Ok(Validated {
            canonical,
            metadata,
        })
    }

    pub fn validate_target(
        &self,
        y: Option<&Target>,
        n_instances: usize,
        registry: &TagRegistry,
        kind: TargetKind,
    ) -> Result<Option<CanonicalTarget>> {
        validate_target(y, n_instances, registry.tags(), kind, registry.name())
    }

    pub fn convert_output(
        &self,
        raw: RawOutput,
        registry: &TagRegistry,
        n_instances: usize,
        classes: Option<&[String]>,
    ) -> Result<Output> {
        let context = OutputContext {
            n_instances,
            classes,
            tolerance: self.config.probability_tolerance,
        };
        convert_output(raw, registry.tags(), &context)
    }
}
