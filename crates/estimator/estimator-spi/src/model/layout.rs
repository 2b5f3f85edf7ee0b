//! Collection layouts and capability names.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The three recognized in-memory layouts of a collection of time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollectionLayout {
    /// One 3-axis block: instances x channels x time points.
    EqualLengthDense,
    /// One 2-axis block (channels x time points) per instance.
    Ragged,
    /// Flat table indexed by (instance id, channel id), one column per time point.
    LabeledTabular,
}

impl CollectionLayout {
    /// All layouts, in preference order for conversion targets.
    pub const ALL: [CollectionLayout; 3] = [
        CollectionLayout::Ragged,
        CollectionLayout::EqualLengthDense,
        CollectionLayout::LabeledTabular,
    ];

    /// Stable name used in messages and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionLayout::EqualLengthDense => "equal-length-dense",
            CollectionLayout::Ragged => "ragged",
            CollectionLayout::LabeledTabular => "labeled-tabular",
        }
    }

    /// Whether this layout can hold instances of different lengths.
    pub fn holds_unequal_length(&self) -> bool {
        matches!(self, CollectionLayout::Ragged)
    }
}

impl fmt::Display for CollectionLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of layouts an estimator accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutSet(BTreeSet<CollectionLayout>);

impl LayoutSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every layout.
    pub fn all() -> Self {
        CollectionLayout::ALL.into_iter().collect()
    }

    pub fn only(layout: CollectionLayout) -> Self {
        std::iter::once(layout).collect()
    }

    pub fn with(mut self, layout: CollectionLayout) -> Self {
        self.0.insert(layout);
        self
    }

    pub fn insert(&mut self, layout: CollectionLayout) -> bool {
        self.0.insert(layout)
    }

    pub fn contains(&self, layout: CollectionLayout) -> bool {
        self.0.contains(&layout)
    }

    pub fn is_subset(&self, other: &LayoutSet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = CollectionLayout> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<CollectionLayout> for LayoutSet {
    fn from_iter<I: IntoIterator<Item = CollectionLayout>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for LayoutSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|l| l.as_str()).collect();
        f.write_str(&names.join(", "))
    }
}

/// Capabilities an input can demand from an estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Multivariate,
    UnequalLength,
    MissingValues,
    ProbabilityOutput,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Capability::Multivariate => "multivariate input",
            Capability::UnequalLength => "unequal length series",
            Capability::MissingValues => "missing values",
            Capability::ProbabilityOutput => "probability output",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_names() {
        assert_eq!(CollectionLayout::EqualLengthDense.to_string(), "equal-length-dense");
        assert_eq!(CollectionLayout::Ragged.to_string(), "ragged");
        assert_eq!(CollectionLayout::LabeledTabular.to_string(), "labeled-tabular");
    }

    #[test]
    fn test_layout_serde_names() {
        let json = serde_json::to_string(&CollectionLayout::EqualLengthDense).unwrap();
        assert_eq!(json, "\"equal-length-dense\"");
        let back: CollectionLayout = serde_json::from_str("\"labeled-tabular\"").unwrap();
        assert_eq!(back, CollectionLayout::LabeledTabular);
    }

    #[test]
    fn test_layout_set_subset() {
        let all = LayoutSet::all();
        let dense = LayoutSet::only(CollectionLayout::EqualLengthDense);
        assert!(dense.is_subset(&all));
        assert!(!all.is_subset(&dense));
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_layout_set_display_is_ordered() {
        let set = LayoutSet::new()
            .with(CollectionLayout::LabeledTabular)
            .with(CollectionLayout::EqualLengthDense);
        assert_eq!(set.to_string(), "equal-length-dense, labeled-tabular");
    }
}
