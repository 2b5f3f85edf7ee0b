//! Estimator API
//!
//! Configuration types and builders for collection estimators.

mod config;
mod tags;

// Re-export SPI types
pub use estimator_spi::{
    CollectionLayout, EstimatorError, EstimatorTags, LayoutSet, OutputContract, Result, TagKey,
    TagValue,
};

pub use config::{PipelineConfig, PipelineConfigBuilder, DEFAULT_PROBABILITY_TOLERANCE};
pub use tags::{tag_value_from_json, tags_from_json, tags_to_json, EstimatorTagsBuilder};
