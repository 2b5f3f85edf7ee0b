//! Collection queries.
//!
//! Each query validates the collection structurally first, so a malformed
//! collection yields the same error it would in `fit`.

use estimator_spi::{Collection, CollectionMetadata, Result};

use super::detect::inspect;

pub fn metadata(collection: &Collection) -> Result<CollectionMetadata> {
    inspect(collection)
}

pub fn n_cases(collection: &Collection) -> Result<usize> {
    Ok(inspect(collection)?.n_cases)
}

pub fn n_channels(collection: &Collection) -> Result<usize> {
    Ok(inspect(collection)?.n_channels)
}

/// Length of the first instance.
pub fn n_timepoints(collection: &Collection) -> Result<usize> {
    inspect(collection)?;
    let length = match collection {
        Collection::Dense(dense) => dense.n_timepoints(),
        Collection::Ragged(ragged) => ragged.instance(0).n_timepoints(),
        Collection::Tabular(table) => table.n_timepoints(),
    };
    Ok(length)
}

pub fn has_missing(collection: &Collection) -> Result<bool> {
    Ok(inspect(collection)?.has_missing)
}

pub fn is_univariate(collection: &Collection) -> Result<bool> {
    Ok(inspect(collection)?.is_univariate())
}

pub fn is_equal_length(collection: &Collection) -> Result<bool> {
    Ok(inspect(collection)?.is_equal_length())
}

#[cfg(test)]
mod tests {
    use super::*;
    use estimator_spi::{
        DenseCollection, EstimatorError, RaggedCollection, Series, TabularCollection, TabularRow,
    };

    fn ragged() -> Collection {
        Collection::Ragged(RaggedCollection::new(vec![
            Series::univariate(vec![1.0, 2.0, 3.0]),
            Series::univariate(vec![1.0, f64::NAN]),
        ]))
    }

    #[test]
    fn test_ragged_queries() {
        let c = ragged();
        assert_eq!(n_cases(&c).unwrap(), 2);
        assert_eq!(n_channels(&c).unwrap(), 1);
        assert_eq!(n_timepoints(&c).unwrap(), 3);
        assert!(has_missing(&c).unwrap());
        assert!(is_univariate(&c).unwrap());
        assert!(!is_equal_length(&c).unwrap());
    }

    #[test]
    fn test_dense_queries() {
        let c = Collection::Dense(DenseCollection::new(2, 3, 4, vec![0.0; 24]).unwrap());
        assert_eq!(n_channels(&c).unwrap(), 3);
        assert_eq!(n_timepoints(&c).unwrap(), 4);
        assert!(!is_univariate(&c).unwrap());
        assert!(is_equal_length(&c).unwrap());
    }

    #[test]
    fn test_tabular_queries() {
        let c = Collection::Tabular(TabularCollection::new(
            2,
            vec![
                TabularRow::new("s1", "x", vec![1.0, 2.0]),
                TabularRow::new("s2", "x", vec![3.0, 4.0]),
            ],
        ));
        assert_eq!(n_cases(&c).unwrap(), 2);
        assert_eq!(n_timepoints(&c).unwrap(), 2);
    }

    #[test]
    fn test_inconsistent_channels() {
        let c = Collection::Ragged(RaggedCollection::new(vec![
            Series::univariate(vec![1.0]),
            Series::new(2, 1, vec![1.0, 2.0]).unwrap(),
        ]));
        assert!(matches!(
            n_channels(&c),
            Err(EstimatorError::InvalidInputShape { .. })
        ));
    }
}
