//! Concrete estimators built on the role façades.
//!
//! - Baselines: [`PriorClassifier`], [`MeanRegressor`], [`EqualWidthClusterer`]
//! - Transformers: [`Padder`], [`Normalizer`]

mod dummy;
mod transforms;

pub use dummy::{
    BinParams, EqualWidthClusterer, MeanParams, MeanRegressor, PriorClassifier, PriorParams,
};
pub use transforms::{Normalizer, PadParams, Padder};
