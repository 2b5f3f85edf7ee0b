//! Estimator Service Provider Interface
//!
//! Defines the contracts, data model and error type for estimators over
//! collections of time series.
//!
//! - [`Taggable`] / [`Fittable`]: tag access and fit-before-use lifecycle
//! - [`Classifiable`], [`Regressable`], [`Clusterable`], [`Transformable`]: role interfaces
//! - [`ClassifierAlgorithm`] and friends: hooks implemented by concrete algorithms
//! - [`EstimatorError`]: Standardized error type for all estimator operations
//! - [`Result`]: Convenient result type alias

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{
    Algorithm, Classifiable, ClassifierAlgorithm, Clusterable, ClustererAlgorithm, Fittable,
    Regressable, RegressorAlgorithm, Taggable, Transformable, TransformerAlgorithm,
};
pub use error::{ErrorCategory, EstimatorError, Result};
pub use model::{
    CanonicalCollection, CanonicalTarget, Capability, ClassLabel, Collection, CollectionLayout,
    CollectionMetadata, DenseCollection, EncodedLabels, EstimatorTags, FittedParamMap,
    InstanceView, LayoutSet, Output, OutputContract, Phase, ProbabilityMatrix, RaggedCollection,
    RawCollection, RawOutput, Series, TabularCollection, TabularRow, TagKey, TagValue, Target,
    MISSING,
};
