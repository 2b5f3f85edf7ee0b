//! Regressor façade.

use estimator_api::PipelineConfig;
use estimator_spi::{
    CanonicalTarget, EstimatorError, EstimatorTags, Fittable, FittedParamMap, Output,
    RawCollection, RawOutput, Regressable, RegressorAlgorithm, Result, TagKey, TagValue,
    Taggable, Target,
};

use super::base::{unexpected_output, EstimatorBase, Role};
use crate::guard::FittedState;
use crate::pipeline::TargetKind;

/// Wraps a [`RegressorAlgorithm`].
#[derive(Debug, Clone)]
pub struct Regressor<A: RegressorAlgorithm> {
    algorithm: A,
    base: EstimatorBase<A::Params>,
}

impl<A: RegressorAlgorithm> Regressor<A> {
    pub fn new(algorithm: A) -> Result<Self> {
        Self::with_config(algorithm, PipelineConfig::default())
    }

    pub fn with_config(algorithm: A, config: PipelineConfig) -> Result<Self> {
        Ok(Self {
            base: EstimatorBase::new(Role::Regressor, A::NAME, A::class_tags(), config)?,
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

impl<A: RegressorAlgorithm> Regressable for Regressor<A> {
    fn fit(&mut self, x: &RawCollection, y: &Target) -> Result<()> {
        let _span = tracing::debug_span!("fit", estimator = A::NAME).entered();
        let validated = self.base.validate_fit(x)?;
        let values = match self.base.validate_target(
            Some(y),
            validated.metadata.n_cases,
            TargetKind::Values,
        )? {
            Some(CanonicalTarget::Values(values)) => values,
            _ => {
                return Err(EstimatorError::InvalidTarget(
                    "regressor targets must be numeric".to_string(),
                ))
            }
        };
        let params = self.algorithm.fit(&validated.canonical, &values)?;
        self.base.mark_fitted(FittedState {
            params,
            input: validated.metadata,
            classes: None,
        });
        Ok(())
    }

    fn predict(&self, x: &RawCollection) -> Result<Vec<f64>> {
        let _span = tracing::debug_span!("predict", estimator = A::NAME).entered();
        let state = self.base.require_fitted()?;
        let validated = self.base.validate_apply(state, x)?;
        let values = self.algorithm.predict(&state.params, &validated.canonical)?;
        match self
            .base
            .convert_output(RawOutput::Values(values), validated.metadata.n_cases, None)?
        {
            Output::Values(values) => Ok(values),
            _ => Err(unexpected_output("values")),
        }
    }
}

impl<A: RegressorAlgorithm> Taggable for Regressor<A> {
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

impl<A: RegressorAlgorithm> Fittable for Regressor<A> {
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
