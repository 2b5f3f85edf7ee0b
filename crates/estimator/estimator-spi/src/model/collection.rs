//! Typed collection layouts.

use serde::{Deserialize, Serialize};

use crate::error::{EstimatorError, Result};
use crate::model::layout::CollectionLayout;

/// Missing-value sentinel.
pub const MISSING: f64 = f64::NAN;

/// Borrowed channels x time block of one instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceView<'a> {
    n_channels: usize,
    n_timepoints: usize,
    values: &'a [f64],
}

impl<'a> InstanceView<'a> {
    pub fn n_channels(&self) -> usize {
        self.n_channels
    }

    pub fn n_timepoints(&self) -> usize {
        self.n_timepoints
    }

    /// Channel-major values.
    pub fn values(&self) -> &'a [f64] {
        self.values
    }

    pub fn channel(&self, channel: usize) -> &'a [f64] {
        let start = channel * self.n_timepoints;
        &self.values[start..start + self.n_timepoints]
    }

    pub fn channels(&self) -> impl Iterator<Item = &'a [f64]> + '_ {
        (0..self.n_channels).map(move |c| self.channel(c))
    }

    pub fn has_missing(&self) -> bool {
        self.values.iter().any(|v| v.is_nan())
    }

    pub fn to_series(&self) -> Series {
        Series {
            n_channels: self.n_channels,
            n_timepoints: self.n_timepoints,
            values: self.values.to_vec(),
        }
    }
}

/// Product of a caller-supplied shape, `InvalidInputType` on overflow.
fn buffer_len(shape: &[usize]) -> Result<usize> {
    shape
        .iter()
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
        .ok_or_else(|| {
            EstimatorError::InvalidInputType(format!("shape {:?} overflows the buffer size", shape))
        })
}

/// One owned instance: channels x time points, channel-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SeriesRepr")]
pub struct Series {
    n_channels: usize,
    n_timepoints: usize,
    values: Vec<f64>,
}

impl Series {
    pub fn new(n_channels: usize, n_timepoints: usize, values: Vec<f64>) -> Result<Self> {
        let expected = buffer_len(&[n_channels, n_timepoints])?;
        if values.len() != expected {
            return Err(EstimatorError::InvalidInputType(format!(
                "series buffer holds {} values but shape ({}, {}) needs {}",
                values.len(),
                n_channels,
                n_timepoints,
                expected
            )));
        }
        Ok(Self {
            n_channels,
            n_timepoints,
            values,
        })
    }

    /// Build from one vector per channel; every channel must have the same length.
    pub fn from_channels(channels: Vec<Vec<f64>>) -> Result<Self> {
        let n_timepoints = channels.first().map_or(0, Vec::len);
        if let Some(pos) = channels.iter().position(|c| c.len() != n_timepoints) {
            return Err(EstimatorError::InvalidInputType(format!(
                "not a 2D block: channel {} has {} time points, channel 0 has {}",
                pos,
                channels[pos].len(),
                n_timepoints
            )));
        }
        let n_channels = channels.len();
        let values = channels.into_iter().flatten().collect();
        Ok(Self {
            n_channels,
            n_timepoints,
            values,
        })
    }

    pub fn univariate(values: Vec<f64>) -> Self {
        Self {
            n_channels: 1,
            n_timepoints: values.len(),
            values,
        }
    }

    pub fn n_channels(&self) -> usize {
        self.n_channels
    }

    pub fn n_timepoints(&self) -> usize {
        self.n_timepoints
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn channel(&self, channel: usize) -> &[f64] {
        self.view().channel(channel)
    }

    pub fn view(&self) -> InstanceView<'_> {
        InstanceView {
            n_channels: self.n_channels,
            n_timepoints: self.n_timepoints,
            values: &self.values,
        }
    }
}

#[derive(Deserialize)]
struct SeriesRepr {
    n_channels: usize,
    n_timepoints: usize,
    values: Vec<f64>,
}

impl TryFrom<SeriesRepr> for Series {
    type Error = EstimatorError;

    fn try_from(repr: SeriesRepr) -> Result<Self> {
        Series::new(repr.n_channels, repr.n_timepoints, repr.values)
    }
}

/// Equal-length collection stored as one instances x channels x time block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DenseRepr")]
pub struct DenseCollection {
    n_cases: usize,
    n_channels: usize,
    n_timepoints: usize,
    values: Vec<f64>,
}

impl DenseCollection {
    pub fn new(
        n_cases: usize,
        n_channels: usize,
        n_timepoints: usize,
        values: Vec<f64>,
    ) -> Result<Self> {
        let expected = buffer_len(&[n_cases, n_channels, n_timepoints])?;
        if values.len() != expected {
            return Err(EstimatorError::InvalidInputType(format!(
                "3D buffer holds {} values but shape ({}, {}, {}) needs {}",
                values.len(),
                n_cases,
                n_channels,
                n_timepoints,
                expected
            )));
        }
        Ok(Self {
            n_cases,
            n_channels,
            n_timepoints,
            values,
        })
    }

    /// (instances, channels, time points)
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.n_cases, self.n_channels, self.n_timepoints)
    }

    pub fn n_cases(&self) -> usize {
        self.n_cases
    }

    pub fn n_channels(&self) -> usize {
        self.n_channels
    }

    pub fn n_timepoints(&self) -> usize {
        self.n_timepoints
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn instance(&self, index: usize) -> InstanceView<'_> {
        let block = self.n_channels * self.n_timepoints;
        InstanceView {
            n_channels: self.n_channels,
            n_timepoints: self.n_timepoints,
            values: &self.values[index * block..(index + 1) * block],
        }
    }

    pub fn instances(&self) -> impl Iterator<Item = InstanceView<'_>> + '_ {
        (0..self.n_cases).map(move |i| self.instance(i))
    }
}

#[derive(Deserialize)]
struct DenseRepr {
    n_cases: usize,
    n_channels: usize,
    n_timepoints: usize,
    values: Vec<f64>,
}

impl TryFrom<DenseRepr> for DenseCollection {
    type Error = EstimatorError;

    fn try_from(repr: DenseRepr) -> Result<Self> {
        DenseCollection::new(repr.n_cases, repr.n_channels, repr.n_timepoints, repr.values)
    }
}

/// Collection stored as one 2-axis block per instance; lengths may differ.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RaggedCollection {
    instances: Vec<Series>,
}

impl RaggedCollection {
    pub fn new(instances: Vec<Series>) -> Self {
        Self { instances }
    }

    pub fn n_cases(&self) -> usize {
        self.instances.len()
    }

    /// Channel count of the first instance.
    pub fn n_channels(&self) -> usize {
        self.instances.first().map_or(0, Series::n_channels)
    }

    pub fn lengths(&self) -> Vec<usize> {
        self.instances.iter().map(Series::n_timepoints).collect()
    }

    pub fn series(&self) -> &[Series] {
        &self.instances
    }

    pub fn into_series(self) -> Vec<Series> {
        self.instances
    }

    pub fn instance(&self, index: usize) -> InstanceView<'_> {
        self.instances[index].view()
    }

    pub fn instances(&self) -> impl Iterator<Item = InstanceView<'_>> + '_ {
        self.instances.iter().map(Series::view)
    }
}

/// One row of a labeled table: the values of one channel of one instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabularRow {
    pub instance: String,
    pub channel: String,
    pub values: Vec<f64>,
}

impl TabularRow {
    pub fn new(instance: impl Into<String>, channel: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            instance: instance.into(),
            channel: channel.into(),
            values,
        }
    }
}

/// Flat table with a (instance id, channel id) index and one column per time point.
///
/// Instance order is the order of first appearance; channel order is the
/// order in which the first instance lists its channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabularCollection {
    n_timepoints: usize,
    rows: Vec<TabularRow>,
}

impl TabularCollection {
    pub fn new(n_timepoints: usize, rows: Vec<TabularRow>) -> Self {
        Self { n_timepoints, rows }
    }

    /// Number of value columns.
    pub fn n_timepoints(&self) -> usize {
        self.n_timepoints
    }

    pub fn rows(&self) -> &[TabularRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<TabularRow> {
        self.rows
    }
}

/// A collection in one of the three recognized layouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "kebab-case")]
pub enum Collection {
    Dense(DenseCollection),
    Ragged(RaggedCollection),
    Tabular(TabularCollection),
}

impl Collection {
    pub fn layout(&self) -> CollectionLayout {
        match self {
            Collection::Dense(_) => CollectionLayout::EqualLengthDense,
            Collection::Ragged(_) => CollectionLayout::Ragged,
            Collection::Tabular(_) => CollectionLayout::LabeledTabular,
        }
    }
}

impl From<DenseCollection> for Collection {
    fn from(value: DenseCollection) -> Self {
        Collection::Dense(value)
    }
}

impl From<RaggedCollection> for Collection {
    fn from(value: RaggedCollection) -> Self {
        Collection::Ragged(value)
    }
}

impl From<TabularCollection> for Collection {
    fn from(value: TabularCollection) -> Self {
        Collection::Tabular(value)
    }
}

/// The representation handed to algorithm hooks: ragged or dense, never tabular.
#[derive(Debug, Clone, PartialEq)]
pub enum CanonicalCollection {
    Dense(DenseCollection),
    Ragged(RaggedCollection),
}

impl CanonicalCollection {
    pub fn layout(&self) -> CollectionLayout {
        match self {
            CanonicalCollection::Dense(_) => CollectionLayout::EqualLengthDense,
            CanonicalCollection::Ragged(_) => CollectionLayout::Ragged,
        }
    }

    pub fn n_cases(&self) -> usize {
        match self {
            CanonicalCollection::Dense(d) => d.n_cases(),
            CanonicalCollection::Ragged(r) => r.n_cases(),
        }
    }

    pub fn n_channels(&self) -> usize {
        match self {
            CanonicalCollection::Dense(d) => d.n_channels(),
            CanonicalCollection::Ragged(r) => r.n_channels(),
        }
    }

    pub fn instance(&self, index: usize) -> InstanceView<'_> {
        match self {
            CanonicalCollection::Dense(d) => d.instance(index),
            CanonicalCollection::Ragged(r) => r.instance(index),
        }
    }

    pub fn instances(&self) -> impl Iterator<Item = InstanceView<'_>> + '_ {
        (0..self.n_cases()).map(move |i| self.instance(i))
    }

    pub fn as_dense(&self) -> Option<&DenseCollection> {
        match self {
            CanonicalCollection::Dense(d) => Some(d),
            CanonicalCollection::Ragged(_) => None,
        }
    }

    pub fn as_ragged(&self) -> Option<&RaggedCollection> {
        match self {
            CanonicalCollection::Ragged(r) => Some(r),
            CanonicalCollection::Dense(_) => None,
        }
    }

    pub fn into_collection(self) -> Collection {
        match self {
            CanonicalCollection::Dense(d) => Collection::Dense(d),
            CanonicalCollection::Ragged(r) => Collection::Ragged(r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_from_channels() {
        let series = Series::from_channels(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(series.n_channels(), 2);
        assert_eq!(series.n_timepoints(), 3);
        assert_eq!(series.channel(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_series_from_unequal_channels() {
        let err = Series::from_channels(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, EstimatorError::InvalidInputType(_)));
    }

    #[test]
    fn test_dense_buffer_mismatch() {
        let err = DenseCollection::new(2, 2, 3, vec![0.0; 11]).unwrap_err();
        assert!(matches!(err, EstimatorError::InvalidInputType(_)));
    }

    #[test]
    fn test_dense_shape_overflow() {
        let err = DenseCollection::new(usize::MAX, 2, 1, Vec::new()).unwrap_err();
        assert!(matches!(err, EstimatorError::InvalidInputType(_)));
        let err = Series::new(usize::MAX, 2, Vec::new()).unwrap_err();
        assert!(matches!(err, EstimatorError::InvalidInputType(_)));
    }

    #[test]
    fn test_deserialize_checks_buffer_length() {
        let dense = r#"{"n_cases":3,"n_channels":1,"n_timepoints":4,"values":[1.0]}"#;
        assert!(serde_json::from_str::<DenseCollection>(dense).is_err());
        let series = r#"{"n_channels":2,"n_timepoints":2,"values":[1.0,2.0,3.0]}"#;
        assert!(serde_json::from_str::<Series>(series).is_err());

        let ok = r#"{"n_cases":1,"n_channels":1,"n_timepoints":2,"values":[1.0,2.0]}"#;
        let dense: DenseCollection = serde_json::from_str(ok).unwrap();
        assert_eq!(dense.shape(), (1, 1, 2));
    }

    #[test]
    fn test_dense_instance_view() {
        let values: Vec<f64> = (0..12).map(|v| v as f64).collect();
        let dense = DenseCollection::new(2, 2, 3, values).unwrap();
        let second = dense.instance(1);
        assert_eq!(second.channel(0), &[6.0, 7.0, 8.0]);
        assert_eq!(second.channel(1), &[9.0, 10.0, 11.0]);
        assert_eq!(dense.instances().count(), 2);
    }

    #[test]
    fn test_zero_length_channels_iterate() {
        let series = Series::new(2, 0, vec![]).unwrap();
        assert_eq!(series.view().channels().count(), 2);
    }

    #[test]
    fn test_instance_view_missing() {
        let series = Series::univariate(vec![1.0, MISSING, 3.0]);
        assert!(series.view().has_missing());
    }

    #[test]
    fn test_ragged_lengths() {
        let ragged = RaggedCollection::new(vec![
            Series::univariate(vec![1.0; 8]),
            Series::univariate(vec![1.0; 12]),
        ]);
        assert_eq!(ragged.lengths(), vec![8, 12]);
        assert_eq!(ragged.n_channels(), 1);
    }

    #[test]
    fn test_canonical_accessors() {
        let dense = DenseCollection::new(1, 1, 2, vec![1.0, 2.0]).unwrap();
        let canonical = CanonicalCollection::Dense(dense);
        assert!(canonical.as_dense().is_some());
        assert!(canonical.as_ragged().is_none());
        assert_eq!(canonical.layout(), CollectionLayout::EqualLengthDense);
        assert_eq!(canonical.into_collection().layout(), CollectionLayout::EqualLengthDense);
    }
}
