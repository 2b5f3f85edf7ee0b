//! Collection-transformer façade.

use estimator_api::PipelineConfig;
use estimator_spi::{
    Collection, EstimatorTags, Fittable, FittedParamMap, Output, RawCollection, RawOutput,
    Result, TagKey, TagValue, Taggable, Target, Transformable, TransformerAlgorithm,
};

use super::base::{unexpected_output, EstimatorBase, Role};
use crate::guard::FittedState;
use crate::pipeline::TargetKind;

/// Wraps a [`TransformerAlgorithm`].
///
/// Output is returned in whatever layout the algorithm produced, after the
/// same structural validation applied to inputs.
#[derive(Debug, Clone)]
pub struct CollectionTransformer<A: TransformerAlgorithm> {
    algorithm: A,
    base: EstimatorBase<A::Params>,
}

impl<A: TransformerAlgorithm> CollectionTransformer<A> {
    pub fn new(algorithm: A) -> Result<Self> {
        Self::with_config(algorithm, PipelineConfig::default())
    }

    pub fn with_config(algorithm: A, config: PipelineConfig) -> Result<Self> {
        Ok(Self {
            base: EstimatorBase::new(Role::Transformer, A::NAME, A::class_tags(), config)?,
            algorithm,
        })
    }

    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    pub fn fitted_state(&self) -> Result<&FittedState<A::Params>> {
        self.base.require_fitted()
    }

    pub fn clone_unfitted(&self) -> Self
    where
        A: Clone,
    {
        Self {
            algorithm: self.algorithm.clone(),
            base: self.base.clone_unfitted(),
        }
    }
}

impl<A: TransformerAlgorithm> Transformable for CollectionTransformer<A> {
    fn fit(&mut self, x: &RawCollection, y: Option<&Target>) -> Result<()> {
        let _span = tracing::debug_span!("fit", estimator = A::NAME).entered();
        let validated = self.base.validate_fit(x)?;
        let target = self
            .base
            .validate_target(y, validated.metadata.n_cases, TargetKind::Any)?;
        let params = self.algorithm.fit(&validated.canonical, target.as_ref())?;
        self.base.mark_fitted(FittedState {
            params,
            input: validated.metadata,
            classes: None,
        });
        Ok(())
    }

    fn transform(&self, x: &RawCollection) -> Result<Collection> {
        let _span = tracing::debug_span!("transform", estimator = A::NAME).entered();
        let state = self.base.require_fitted()?;
        let validated = self.base.validate_apply(state, x)?;
        let transformed = self
            .algorithm
            .transform(&state.params, &validated.canonical)?;
        match self.base.convert_output(
            RawOutput::Collection(transformed),
            validated.metadata.n_cases,
            None,
        )? {
            Output::Collection(collection) => Ok(collection),
            _ => Err(unexpected_output("a collection")),
        }
    }
}

impl<A: TransformerAlgorithm> Taggable for CollectionTransformer<A> {
    fn estimator_name(&self) -> &str {
        self.base.name()
    }

    fn get_class_tags(&self) -> &EstimatorTags {
        self.base.registry().class_tags()
    }

    fn get_tags(&self) -> &EstimatorTags {
        self.base.registry().tags()
    }

    fn set_tag(&mut self, key: TagKey, value: TagValue) -> Result<()> {
        self.base.set_tag(key, value)
    }

    fn override_tag(&mut self, key: TagKey, value: TagValue) -> Result<()> {
        self.base.override_tag(key, value)
    }

    fn set_tags(&mut self, tags: EstimatorTags) -> Result<()> {
        self.base.set_tags(tags)
    }
}

impl<A: TransformerAlgorithm> Fittable for CollectionTransformer<A> {
    fn is_fitted(&self) -> bool {
        self.base.is_fitted()
    }

    fn check_is_fitted(&self) -> Result<()> {
        self.base.require_fitted().map(|_| ())
    }

    fn get_fitted_params(&self) -> Result<FittedParamMap> {
        self.base.fitted_params()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estimator_api::EstimatorTagsBuilder;
    use estimator_spi::{
        Algorithm, CanonicalCollection, CanonicalTarget, CollectionLayout, EstimatorError,
        LayoutSet, RaggedCollection, Series,
    };

    /// Keeps the first `n` time points, where `n` is learned as the
    /// shortest fitted length; `drop_one` loses the last instance
    #[derive(Debug, Clone)]
    struct MockTruncate {
        drop_one: bool,
    }

    impl Algorithm for MockTruncate {
        const NAME: &'static str = "MockTruncate";

        fn class_tags() -> EstimatorTags {
            EstimatorTagsBuilder::transformer()
                .layouts(LayoutSet::all())
                .unequal_length(true)
                .build()
                .unwrap()
        }
    }

    impl TransformerAlgorithm for MockTruncate {
        type Params = usize;

        fn fit(&self, x: &CanonicalCollection, _y: Option<&CanonicalTarget>) -> Result<usize> {
            Ok(x.instances().map(|i| i.n_timepoints()).min().unwrap_or(0))
        }

        fn transform(&self, n: &usize, x: &CanonicalCollection) -> Result<Collection> {
            let keep = if self.drop_one {
                x.n_cases().saturating_sub(1)
            } else {
                x.n_cases()
            };
            let series = x
                .instances()
                .take(keep)
                .map(|i| {
                    let length = (*n).min(i.n_timepoints());
                    Series::from_channels(i.channels().map(|c| c[..length].to_vec()).collect())
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Collection::Ragged(RaggedCollection::new(series)))
        }
    }

    fn ragged() -> RawCollection {
        RawCollection::univariate(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0]])
    }

    #[test]
    fn test_fit_transform() {
        let mut tr = CollectionTransformer::new(MockTruncate { drop_one: false }).unwrap();
        let out = tr.fit_transform(&ragged(), None).unwrap();
        assert!(tr.is_fitted());
        assert_eq!(out.layout(), CollectionLayout::Ragged);
        match out {
            Collection::Ragged(r) => assert_eq!(r.lengths(), vec![2, 2]),
            other => panic!("Expected ragged output, got {:?}", other.layout()),
        }
    }

    #[test]
    fn test_fit_transform_equals_fit_then_transform() {
        let mut a = CollectionTransformer::new(MockTruncate { drop_one: false }).unwrap();
        let mut b = a.clone_unfitted();
        let composed = a.fit_transform(&ragged(), None).unwrap();
        b.fit(&ragged(), None).unwrap();
        assert_eq!(composed, b.transform(&ragged()).unwrap());
    }

    #[test]
    fn test_lost_instance_is_output_violation() {
        let mut tr = CollectionTransformer::new(MockTruncate { drop_one: true }).unwrap();
        let err = tr.fit_transform(&ragged(), None).unwrap_err();
        assert!(matches!(err, EstimatorError::OutputContract(_)));
    }

    #[test]
    fn test_optional_target_checked() {
        let mut tr = CollectionTransformer::new(MockTruncate { drop_one: false }).unwrap();
        let err = tr
            .fit(&ragged(), Some(&Target::labels(["a"])))
            .unwrap_err();
        assert_eq!(err, EstimatorError::TargetLength { expected: 2, got: 1 });
    }
}
