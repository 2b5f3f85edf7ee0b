//! Estimator Core Implementations
//!
//! Machinery shared by every collection estimator:
//!
//! - [`TagRegistry`]: per-instance tags layered over class defaults
//! - [`FittedGuard`]: fitted/unfitted lifecycle and fitted state
//! - [`pipeline`]: input validation, layout conversion and output checks
//! - [`roles`]: classifier, regressor, clusterer and transformer façades
//! - [`estimators`]: baseline algorithms and series transformers
//!
//! ## Example
//!
//! ```rust
//! use estimator_core::prelude::*;
//!
//! let x = RawCollection::univariate(vec![vec![1.0, 2.0], vec![3.0, 4.0, 5.0]]);
//! let y = Target::labels(["a", "b"]);
//! let mut clf = Classifier::new(PriorClassifier::new()).unwrap();
//! clf.fit(&x, &y).unwrap();
//! assert_eq!(clf.predict(&x).unwrap(), vec!["a".to_string(), "a".to_string()]);
//! ```

pub mod estimators;
mod guard;
pub mod pipeline;
mod registry;
pub mod roles;

// Re-export from SPI
pub use estimator_spi::{EstimatorError, Result};

// Re-export implementations for convenience
pub use estimators::*;
pub use guard::{FitState, FittedGuard, FittedState};
pub use pipeline::{CollectionPipeline, Validated};
pub use registry::TagRegistry;
pub use roles::*;

/// Prelude module for convenient imports
pub mod prelude {
    // Role interfaces
    pub use estimator_spi::{
        Classifiable, Clusterable, Fittable, Regressable, Taggable, Transformable,
    };
    // Algorithm hooks
    pub use estimator_spi::{
        Algorithm, ClassifierAlgorithm, ClustererAlgorithm, RegressorAlgorithm,
        TransformerAlgorithm,
    };
    // Data model
    pub use estimator_spi::{
        CanonicalCollection, Collection, CollectionLayout, EncodedLabels, EstimatorTags,
        ProbabilityMatrix, RawCollection, Series, TagKey, TagValue, Target,
    };
    // Configuration
    pub use estimator_api::{EstimatorTagsBuilder, PipelineConfig};
    // Façades and estimators
    pub use crate::estimators::{
        EqualWidthClusterer, MeanRegressor, Normalizer, Padder, PriorClassifier,
    };
    pub use crate::roles::{Classifier, Clusterer, CollectionTransformer, Regressor};
    // Error types
    pub use estimator_spi::{EstimatorError, Result};
}
