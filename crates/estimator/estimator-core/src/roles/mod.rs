//! Role façades.
//!
//! One generic struct per role. Each composes a tag registry, a fitted-state
//! guard and a collection pipeline around an algorithm hook.

mod base;
mod classifier;
mod clusterer;
mod regressor;
mod transformer;

pub use base::{EstimatorBase, Role};
pub use classifier::Classifier;
pub use clusterer::Clusterer;
pub use regressor::Regressor;
pub use transformer::CollectionTransformer;
