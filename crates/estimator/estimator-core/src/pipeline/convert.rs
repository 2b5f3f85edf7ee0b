//! Lossless conversions between layouts.

use estimator_spi::{
    CanonicalCollection, Collection, CollectionLayout, DenseCollection, EstimatorError,
    InstanceView, RaggedCollection, Result, Series, TabularCollection, TabularRow,
};

use super::detect::group_table;

/// Convert a collection into `to`.
///
/// Ragged collections convert to the dense and tabular layouts only when
/// every instance has the same length; otherwise this fails with
/// `InvalidInputShape`.
pub fn convert(collection: Collection, to: CollectionLayout) -> Result<Collection> {
    let from = collection.layout();
    if from == to {
        return Ok(collection);
    }
    tracing::debug!(%from, %to, "converting collection layout");
    let converted = match (collection, to) {
        (Collection::Dense(dense), CollectionLayout::Ragged) => {
            Collection::Ragged(dense_to_ragged(&dense))
        }
        (Collection::Dense(dense), CollectionLayout::LabeledTabular) => {
            Collection::Tabular(to_table(dense.n_timepoints(), dense.instances()))
        }
        (Collection::Ragged(ragged), CollectionLayout::EqualLengthDense) => {
            Collection::Dense(ragged_to_dense(&ragged)?)
        }
        (Collection::Ragged(ragged), CollectionLayout::LabeledTabular) => {
            let n_timepoints = common_length(&ragged)?;
            Collection::Tabular(to_table(n_timepoints, ragged.instances()))
        }
        (Collection::Tabular(table), CollectionLayout::Ragged) => {
            Collection::Ragged(group_table(&table)?)
        }
        (Collection::Tabular(table), CollectionLayout::EqualLengthDense) => {
            Collection::Dense(ragged_to_dense(&group_table(&table)?)?)
        }
        (same, _) => same,
    };
    Ok(converted)
}

/// Convert into the ragged or dense representation algorithms consume.
pub(crate) fn to_canonical(
    collection: Collection,
    canonical: CollectionLayout,
) -> Result<CanonicalCollection> {
    match convert(collection, canonical)? {
        Collection::Dense(dense) => Ok(CanonicalCollection::Dense(dense)),
        Collection::Ragged(ragged) => Ok(CanonicalCollection::Ragged(ragged)),
        Collection::Tabular(_) => Err(EstimatorError::InvalidTags(
            "labeled-tabular cannot be a canonical layout".to_string(),
        )),
    }
}

fn dense_to_ragged(dense: &DenseCollection) -> RaggedCollection {
    RaggedCollection::new(dense.instances().map(|i| i.to_series()).collect())
}

fn common_length(ragged: &RaggedCollection) -> Result<usize> {
    let lengths = ragged.lengths();
    let first = lengths.first().copied().unwrap_or(0);
    match lengths.iter().find(|&&length| length != first) {
        None => Ok(first),
        Some(other) => Err(EstimatorError::shape(
            "equal-length instances",
            format!("lengths {} and {}", first, other),
        )),
    }
}

fn ragged_to_dense(ragged: &RaggedCollection) -> Result<DenseCollection> {
    let n_timepoints = common_length(ragged)?;
    let n_channels = ragged.n_channels();
    if let Some((index, series)) = ragged
        .series()
        .iter()
        .enumerate()
        .find(|(_, s)| s.n_channels() != n_channels)
    {
        return Err(EstimatorError::shape(
            format!("{} channel(s) per instance", n_channels),
            format!("{} channel(s) in instance {}", series.n_channels(), index),
        ));
    }
    let values = ragged
        .series()
        .iter()
        .flat_map(|s| s.values().iter().copied())
        .collect();
    DenseCollection::new(ragged.n_cases(), n_channels, n_timepoints, values)
}

fn to_table<'a>(
    n_timepoints: usize,
    instances: impl Iterator<Item = InstanceView<'a>>,
) -> TabularCollection {
    let rows = instances
        .enumerate()
        .flat_map(|(i, instance)| {
            instance
                .channels()
                .enumerate()
                .map(|(c, values)| TabularRow::new(i.to_string(), c.to_string(), values.to_vec()))
                .collect::<Vec<_>>()
        })
        .collect();
    TabularCollection::new(n_timepoints, rows)
}

/// Wrap per-instance channel vectors into a ragged collection.
pub fn ragged_from_channels(instances: Vec<Vec<Vec<f64>>>) -> Result<RaggedCollection> {
    instances
        .into_iter()
        .map(Series::from_channels)
        .collect::<Result<Vec<_>>>()
        .map(RaggedCollection::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::detect::inspect;

    fn dense() -> DenseCollection {
        let values = (0..12).map(|v| v as f64).collect();
        DenseCollection::new(2, 2, 3, values).unwrap()
    }

    #[test]
    fn test_dense_ragged_dense() {
        let ragged = convert(dense().into(), CollectionLayout::Ragged).unwrap();
        assert_eq!(ragged.layout(), CollectionLayout::Ragged);
        let back = convert(ragged, CollectionLayout::EqualLengthDense).unwrap();
        assert_eq!(back, Collection::Dense(dense()));
    }

    #[test]
    fn test_dense_tabular_dense() {
        let table = convert(dense().into(), CollectionLayout::LabeledTabular).unwrap();
        match &table {
            Collection::Tabular(t) => {
                assert_eq!(t.rows().len(), 4);
                assert_eq!(t.rows()[3].instance, "1");
                assert_eq!(t.rows()[3].channel, "1");
                assert_eq!(t.rows()[3].values, vec![9.0, 10.0, 11.0]);
            }
            other => panic!("Expected tabular, got {:?}", other.layout()),
        }
        let back = convert(table, CollectionLayout::EqualLengthDense).unwrap();
        assert_eq!(back, Collection::Dense(dense()));
    }

    #[test]
    fn test_unequal_ragged_to_dense_fails() {
        let ragged = ragged_from_channels(vec![vec![vec![1.0; 8]], vec![vec![1.0; 12]]]).unwrap();
        let err = convert(ragged.clone().into(), CollectionLayout::EqualLengthDense).unwrap_err();
        assert!(matches!(err, EstimatorError::InvalidInputShape { .. }));
        let err = convert(ragged.into(), CollectionLayout::LabeledTabular).unwrap_err();
        assert!(matches!(err, EstimatorError::InvalidInputShape { .. }));
    }

    #[test]
    fn test_conversion_preserves_metadata() {
        let original = inspect(&dense().into()).unwrap();
        let ragged = convert(dense().into(), CollectionLayout::Ragged).unwrap();
        let converted = inspect(&ragged).unwrap();
        assert_eq!(converted.n_cases, original.n_cases);
        assert_eq!(converted.n_channels, original.n_channels);
        assert_eq!(converted.max_length, original.max_length);
    }

    #[test]
    fn test_to_canonical_ragged() {
        let canonical = to_canonical(dense().into(), CollectionLayout::Ragged).unwrap();
        assert_eq!(canonical.layout(), CollectionLayout::Ragged);
        assert_eq!(canonical.instance(1).channel(0), &[6.0, 7.0, 8.0]);
    }
}
