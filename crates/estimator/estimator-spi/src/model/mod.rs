//! Data models for collection estimators.
//!
//! Layouts, tags, collections in every recognized layout, targets and
//! outputs shared by the whole estimator stack.

mod collection;
mod layout;
mod metadata;
mod output;
mod raw;
mod tags;
mod target;

pub use collection::{
    CanonicalCollection, Collection, DenseCollection, InstanceView, RaggedCollection, Series,
    TabularCollection, TabularRow, MISSING,
};
pub use layout::{Capability, CollectionLayout, LayoutSet};
pub use metadata::{CollectionMetadata, Phase};
pub use output::{FittedParamMap, Output, ProbabilityMatrix, RawOutput};
pub use raw::RawCollection;
pub use tags::{EstimatorTags, OutputContract, TagKey, TagValue};
pub use target::{CanonicalTarget, ClassLabel, EncodedLabels, Target};
