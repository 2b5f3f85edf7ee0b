//! Targets for supervised fitting.

use serde::{Deserialize, Serialize};

/// Class label as given by the caller.
pub type ClassLabel = String;

/// One label or value per instance, order-aligned with the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Labels(Vec<ClassLabel>),
    Values(Vec<f64>),
}

impl Target {
    pub fn labels<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Self {
        Target::Labels(labels.into_iter().map(Into::into).collect())
    }

    pub fn values(values: impl Into<Vec<f64>>) -> Self {
        Target::Values(values.into())
    }

    pub fn len(&self) -> usize {
        match self {
            Target::Labels(l) => l.len(),
            Target::Values(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Class labels encoded as indices into the sorted, deduplicated class list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedLabels {
    pub classes: Vec<ClassLabel>,
    pub indices: Vec<usize>,
}

impl EncodedLabels {
    pub fn encode(labels: &[ClassLabel]) -> Self {
        let mut classes = labels.to_vec();
        classes.sort();
        classes.dedup();
        let indices = labels
            .iter()
            .map(|label| classes.binary_search(label).unwrap_or_default())
            .collect();
        Self { classes, indices }
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Occurrences of each class, aligned with `classes`.
    pub fn counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.classes.len()];
        for &index in &self.indices {
            counts[index] += 1;
        }
        counts
    }
}

/// Validated target handed to algorithm hooks.
#[derive(Debug, Clone, PartialEq)]
pub enum CanonicalTarget {
    Labels(EncodedLabels),
    Values(Vec<f64>),
}

impl CanonicalTarget {
    pub fn as_labels(&self) -> Option<&EncodedLabels> {
        match self {
            CanonicalTarget::Labels(l) => Some(l),
            CanonicalTarget::Values(_) => None,
        }
    }

    pub fn as_values(&self) -> Option<&[f64]> {
        match self {
            CanonicalTarget::Values(v) => Some(v),
            CanonicalTarget::Labels(_) => None,
        }
    }
}
