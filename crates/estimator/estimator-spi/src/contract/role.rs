//! Role interfaces
//!
//! What callers program against. Each role composes [`Taggable`] and
//! [`Fittable`]; the core crate provides one generic façade per role.

use crate::contract::taggable::{Fittable, Taggable};
use crate::error::Result;
use crate::model::{ClassLabel, Collection, ProbabilityMatrix, RawCollection, Target};

/// Predicts one class label per instance.
pub trait Classifiable: Taggable + Fittable {
    fn fit(&mut self, x: &RawCollection, y: &Target) -> Result<()>;

    fn predict(&self, x: &RawCollection) -> Result<Vec<ClassLabel>>;

    /// Rows are instances, columns are the fitted classes in sorted order.
    fn predict_proba(&self, x: &RawCollection) -> Result<ProbabilityMatrix>;
}

/// Predicts one real value per instance.
pub trait Regressable: Taggable + Fittable {
    fn fit(&mut self, x: &RawCollection, y: &Target) -> Result<()>;

    fn predict(&self, x: &RawCollection) -> Result<Vec<f64>>;
}

/// Assigns instances to clusters without a target.
pub trait Clusterable: Taggable + Fittable {
    fn fit(&mut self, x: &RawCollection) -> Result<()>;

    fn predict(&self, x: &RawCollection) -> Result<Vec<usize>>;

    fn predict_proba(&self, x: &RawCollection) -> Result<ProbabilityMatrix>;
}

/// Maps a collection to a new collection.
pub trait Transformable: Taggable + Fittable {
    fn fit(&mut self, x: &RawCollection, y: Option<&Target>) -> Result<()>;

    fn transform(&self, x: &RawCollection) -> Result<Collection>;

    /// Fit then transform the same data.
    fn fit_transform(&mut self, x: &RawCollection, y: Option<&Target>) -> Result<Collection> {
        self.fit(x, y)?;
        self.transform(x)
    }
}
