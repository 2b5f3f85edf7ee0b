//! Clusterer façade.

use estimator_api::PipelineConfig;
use estimator_spi::{
    Clusterable, ClustererAlgorithm, EstimatorTags, Fittable, FittedParamMap, Output,
    ProbabilityMatrix, RawCollection, RawOutput, Result, TagKey, TagValue, Taggable,
};

use super::base::{unexpected_output, EstimatorBase, Role};
use crate::guard::FittedState;
use crate::pipeline::TargetKind;

/// Wraps a [`ClustererAlgorithm`]. Fitting takes no target.
#[derive(Debug, Clone)]
pub struct Clusterer<A: ClustererAlgorithm> {
    algorithm: A,
    base: EstimatorBase<A::Params>,
}

impl<A: ClustererAlgorithm> Clusterer<A> {
    pub fn new(algorithm: A) -> Result<Self> {
        Self::with_config(algorithm, PipelineConfig::default())
    }

    pub fn with_config(algorithm: A, config: PipelineConfig) -> Result<Self> {
        Ok(Self {
            base: EstimatorBase::new(Role::Clusterer, A::NAME, A::class_tags(), config)?,
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

impl<A: ClustererAlgorithm> Clusterable for Clusterer<A> {
    fn fit(&mut self, x: &RawCollection) -> Result<()> {
        let _span = tracing::debug_span!("fit", estimator = A::NAME).entered();
        let validated = self.base.validate_fit(x)?;
        self.base
            .validate_target(None, validated.metadata.n_cases, TargetKind::Any)?;
        let params = self.algorithm.fit(&validated.canonical)?;
        self.base.mark_fitted(FittedState {
            params,
            input: validated.metadata,
            classes: None,
        });
        Ok(())
    }

    fn predict(&self, x: &RawCollection) -> Result<Vec<usize>> {
        let _span = tracing::debug_span!("predict", estimator = A::NAME).entered();
        let state = self.base.require_fitted()?;
        let validated = self.base.validate_apply(state, x)?;
        let ids = self.algorithm.predict(&state.params, &validated.canonical)?;
        match self
            .base
            .convert_output(RawOutput::ClusterIds(ids), validated.metadata.n_cases, None)?
        {
            Output::Clusters(ids) => Ok(ids),
            _ => Err(unexpected_output("cluster ids")),
        }
    }

    /// Columns are cluster ids rendered as strings.
    fn predict_proba(&self, x: &RawCollection) -> Result<ProbabilityMatrix> {
        let _span = tracing::debug_span!("predict_proba", estimator = A::NAME).entered();
        let state = self.base.require_fitted()?;
        self.base.require_probabilities()?;
        let validated = self.base.validate_apply(state, x)?;
        let rows = self
            .algorithm
            .predict_proba(&state.params, &validated.canonical)?;
        match self.base.convert_output(
            RawOutput::Probabilities(rows),
            validated.metadata.n_cases,
            None,
        )? {
            Output::Probabilities(matrix) => Ok(matrix),
            _ => Err(unexpected_output("probabilities")),
        }
    }
}

impl<A: ClustererAlgorithm> Taggable for Clusterer<A> {
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

impl<A: ClustererAlgorithm> Fittable for Clusterer<A> {
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
