//! Contract definitions for collection estimators.
//!
//! This module contains the algorithm hook traits that concrete algorithms
//! implement and the role traits that callers program against.

mod algorithm;
mod role;
mod taggable;

pub use algorithm::{
    Algorithm, ClassifierAlgorithm, ClustererAlgorithm, RegressorAlgorithm, TransformerAlgorithm,
};
pub use role::{Classifiable, Clusterable, Regressable, Transformable};
pub use taggable::{Fittable, Taggable};
