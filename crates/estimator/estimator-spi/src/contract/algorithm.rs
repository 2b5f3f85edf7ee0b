//! Algorithm hook traits
//!
//! Concrete algorithms implement one hook trait per role. Hooks only ever see
//! validated, canonical data: the role façades in the core crate run every
//! tag, shape and lifecycle check before a hook is called and check the
//! hook's output afterwards.

use std::fmt::Debug;

use serde::Serialize;

use crate::error::{EstimatorError, Result};
use crate::model::{
    CanonicalCollection, CanonicalTarget, Capability, Collection, EncodedLabels, EstimatorTags,
};

/// Type-level identity shared by all hooks.
pub trait Algorithm {
    /// Name used in errors and log spans.
    const NAME: &'static str;

    /// Capability tags of the algorithm type.
    fn class_tags() -> EstimatorTags;
}

fn probabilities_unsupported(name: &str) -> EstimatorError {
    EstimatorError::NotSupported {
        estimator: name.to_string(),
        capability: Capability::ProbabilityOutput,
        detail: "algorithm does not implement predict_proba".to_string(),
    }
}

/// Hooks of a collection classifier.
///
/// # Example
///
/// ```rust,ignore
/// use estimator_spi::{Algorithm, ClassifierAlgorithm};
///
/// struct MajorityClass;
///
/// impl ClassifierAlgorithm for MajorityClass {
///     type Params = usize;
///
///     fn fit(&self, _x: &CanonicalCollection, y: &EncodedLabels) -> Result<usize> {
///         let counts = y.counts();
///         Ok((0..counts.len()).max_by_key(|&i| counts[i]).unwrap_or(0))
///     }
///
///     fn predict(&self, class: &usize, x: &CanonicalCollection) -> Result<Vec<usize>> {
///         Ok(vec![*class; x.n_cases()])
///     }
/// }
/// ```
pub trait ClassifierAlgorithm: Algorithm {
    /// Learned state.
    type Params: Serialize + Clone + Debug;

    fn fit(&self, x: &CanonicalCollection, y: &EncodedLabels) -> Result<Self::Params>;

    /// Class indices, one per instance.
    fn predict(&self, params: &Self::Params, x: &CanonicalCollection) -> Result<Vec<usize>>;

    /// One probability row per instance, one column per fitted class.
    fn predict_proba(
        &self,
        _params: &Self::Params,
        _x: &CanonicalCollection,
    ) -> Result<Vec<Vec<f64>>> {
        Err(probabilities_unsupported(Self::NAME))
    }
}

/// Hooks of a collection regressor.
pub trait RegressorAlgorithm: Algorithm {
    type Params: Serialize + Clone + Debug;

    fn fit(&self, x: &CanonicalCollection, y: &[f64]) -> Result<Self::Params>;

    fn predict(&self, params: &Self::Params, x: &CanonicalCollection) -> Result<Vec<f64>>;
}

/// Hooks of a collection clusterer.
pub trait ClustererAlgorithm: Algorithm {
    type Params: Serialize + Clone + Debug;

    fn fit(&self, x: &CanonicalCollection) -> Result<Self::Params>;

    /// Cluster id per instance.
    fn predict(&self, params: &Self::Params, x: &CanonicalCollection) -> Result<Vec<usize>>;

    /// One membership row per instance, one column per cluster.
    fn predict_proba(
        &self,
        _params: &Self::Params,
        _x: &CanonicalCollection,
    ) -> Result<Vec<Vec<f64>>> {
        Err(probabilities_unsupported(Self::NAME))
    }
}

/// Hooks of a collection-to-collection transformer.
pub trait TransformerAlgorithm: Algorithm {
    type Params: Serialize + Clone + Debug;

    /// `y` is present only when the caller supplied one.
    fn fit(&self, x: &CanonicalCollection, y: Option<&CanonicalTarget>) -> Result<Self::Params>;

    /// Transformed collection in any layout; one instance out per instance in.
    fn transform(&self, params: &Self::Params, x: &CanonicalCollection) -> Result<Collection>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        CollectionLayout, DenseCollection, LayoutSet, OutputContract, RaggedCollection, Series,
    };

    // ==========================================================================
    // Mock Implementations for Testing Trait Definitions
    // ==========================================================================

    /// Predicts the most frequent fitted class for every instance
    struct MockMajorityClassifier;

    impl Algorithm for MockMajorityClassifier {
        const NAME: &'static str = "MockMajorityClassifier";

        fn class_tags() -> EstimatorTags {
            EstimatorTags::new(
                LayoutSet::only(CollectionLayout::EqualLengthDense),
                OutputContract::Labels,
            )
        }
    }

    impl ClassifierAlgorithm for MockMajorityClassifier {
        type Params = usize;

        fn fit(&self, _x: &CanonicalCollection, y: &EncodedLabels) -> Result<usize> {
            let counts = y.counts();
            (0..counts.len())
                .max_by_key(|&i| counts[i])
                .ok_or_else(|| EstimatorError::Algorithm("no classes".to_string()))
        }

        fn predict(&self, class: &usize, x: &CanonicalCollection) -> Result<Vec<usize>> {
            Ok(vec![*class; x.n_cases()])
        }
    }

    /// Reverses every channel of every instance
    struct MockReverser;

    impl Algorithm for MockReverser {
        const NAME: &'static str = "MockReverser";

        fn class_tags() -> EstimatorTags {
            EstimatorTags::new(LayoutSet::all(), OutputContract::TransformedCollection)
        }
    }

    impl TransformerAlgorithm for MockReverser {
        type Params = ();

        fn fit(&self, _x: &CanonicalCollection, _y: Option<&CanonicalTarget>) -> Result<()> {
            Ok(())
        }

        fn transform(&self, _params: &(), x: &CanonicalCollection) -> Result<Collection> {
            let series = x
                .instances()
                .map(|instance| {
                    let channels = instance
                        .channels()
                        .map(|c| c.iter().rev().copied().collect())
                        .collect();
                    Series::from_channels(channels)
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Collection::Ragged(RaggedCollection::new(series)))
        }
    }

    fn dense(n_cases: usize) -> CanonicalCollection {
        let values = (0..n_cases * 3).map(|v| v as f64).collect();
        CanonicalCollection::Dense(DenseCollection::new(n_cases, 1, 3, values).unwrap())
    }

    // ==========================================================================
    // ClassifierAlgorithm Tests
    // ==========================================================================

    #[test]
    fn test_classifier_hooks() {
        let labels: Vec<String> = ["b", "a", "b"].iter().map(|s| s.to_string()).collect();
        let y = EncodedLabels::encode(&labels);
        let clf = MockMajorityClassifier;

        let params = clf.fit(&dense(3), &y).unwrap();
        assert_eq!(y.classes[params], "b");
        assert_eq!(clf.predict(&params, &dense(2)).unwrap(), vec![1, 1]);
    }

    #[test]
    fn test_default_predict_proba_not_supported() {
        let clf = MockMajorityClassifier;
        let err = clf.predict_proba(&0, &dense(1)).unwrap_err();
        match err {
            EstimatorError::NotSupported {
                estimator,
                capability,
                ..
            } => {
                assert_eq!(estimator, "MockMajorityClassifier");
                assert_eq!(capability, Capability::ProbabilityOutput);
            }
            other => panic!("Expected NotSupported, got {:?}", other),
        }
    }

    // ==========================================================================
    // TransformerAlgorithm Tests
    // ==========================================================================

    #[test]
    fn test_transformer_hooks() {
        let reverser = MockReverser;
        let x = dense(2);
        reverser.fit(&x, None).unwrap();

        let out = reverser.transform(&(), &x).unwrap();
        assert_eq!(out.layout(), CollectionLayout::Ragged);
        match out {
            Collection::Ragged(r) => assert_eq!(r.instance(1).channel(0), &[5.0, 4.0, 3.0]),
            other => panic!("Expected ragged output, got {:?}", other.layout()),
        }
    }

    #[test]
    fn test_class_tags_are_type_level() {
        assert!(MockReverser::class_tags().validate().is_ok());
        assert_eq!(
            MockMajorityClassifier::class_tags().canonical_layout(),
            CollectionLayout::EqualLengthDense
        );
    }
}
