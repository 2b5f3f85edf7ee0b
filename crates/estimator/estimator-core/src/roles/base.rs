//! State shared by every role façade.

use std::fmt;

use estimator_api::PipelineConfig;
use estimator_spi::{
    CanonicalTarget, EstimatorError, EstimatorTags, FittedParamMap, Output, OutputContract,
    Phase, RawCollection, RawOutput, Result, Target, TagKey, TagValue, Capability,
};
use serde::Serialize;

use crate::guard::{FittedGuard, FittedState};
use crate::pipeline::{CollectionPipeline, TargetKind, Validated};
use crate::registry::TagRegistry;

/// Estimator role, used to check that tags fit the façade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Classifier,
    Regressor,
    Clusterer,
    Transformer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Classifier => "classifier",
            Role::Regressor => "regressor",
            Role::Clusterer => "clusterer",
            Role::Transformer => "transformer",
        }
    }

    /// `InvalidTags` unless `tags` suit this role.
    pub fn check(&self, tags: &EstimatorTags, estimator: &str) -> Result<()> {
        let contract = tags.output_contract;
        let (contract_ok, y_ok) = match self {
            Role::Classifier => (
                matches!(
                    contract,
                    OutputContract::Labels | OutputContract::ProbabilitiesAndLabels
                ),
                tags.fit_requires_y,
            ),
            Role::Regressor => (contract == OutputContract::Labels, tags.fit_requires_y),
            Role::Clusterer => (
                contract != OutputContract::TransformedCollection,
                !tags.fit_requires_y,
            ),
            Role::Transformer => (contract == OutputContract::TransformedCollection, true),
        };
        if !contract_ok {
            return Err(EstimatorError::InvalidTags(format!(
                "{} cannot be a {} with output contract {}",
                estimator, self, contract
            )));
        }
        if !y_ok {
            return Err(EstimatorError::InvalidTags(format!(
                "{} as a {} must set fit_requires_y to {}",
                estimator,
                self,
                !tags.fit_requires_y
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag registry, fitted guard and pipeline of one façade.
#[derive(Debug, Clone)]
pub struct EstimatorBase<P> {
    role: Role,
    registry: TagRegistry,
    guard: FittedGuard<FittedState<P>>,
    pipeline: CollectionPipeline,
}

impl<P> EstimatorBase<P> {
    pub fn new(
        role: Role,
        name: &str,
        class_tags: EstimatorTags,
        config: PipelineConfig,
    ) -> Result<Self> {
        role.check(&class_tags, name)?;
        Ok(Self {
            role,
            registry: TagRegistry::new(name, class_tags)?,
            guard: FittedGuard::new(name),
            pipeline: CollectionPipeline::new(config),
        })
    }

    pub fn name(&self) -> &str {
        self.registry.name()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    pub fn config(&self) -> &PipelineConfig {
        self.pipeline.config()
    }

    pub fn is_fitted(&self) -> bool {
        self.guard.is_fitted()
    }

    pub fn require_fitted(&self) -> Result<&FittedState<P>> {
        self.guard.require_fitted()
    }

    /// Refit permission, then fit-phase validation of `x`.
    pub fn validate_fit(&self, x: &RawCollection) -> Result<Validated> {
        self.guard.check_refit(self.config().allow_refit)?;
        self.pipeline
            .validate_and_convert(x, &self.registry, Phase::Fit)
    }

    /// Predict/transform validation of `x` against the fitted state.
    pub fn validate_apply(&self, state: &FittedState<P>, x: &RawCollection) -> Result<Validated> {
        self.pipeline.validate_and_convert(
            x,
            &self.registry,
            Phase::Apply {
                fitted: &state.input,
            },
        )
    }

    pub fn validate_target(
        &self,
        y: Option<&Target>,
        n_instances: usize,
        kind: TargetKind,
    ) -> Result<Option<CanonicalTarget>> {
        self.pipeline
            .validate_target(y, n_instances, &self.registry, kind)
    }

    pub fn convert_output(
        &self,
        raw: RawOutput,
        n_instances: usize,
        classes: Option<&[String]>,
    ) -> Result<Output> {
        self.pipeline
            .convert_output(raw, &self.registry, n_instances, classes)
    }

    /// `NotSupported` unless the tags promise probabilities.
    pub fn require_probabilities(&self) -> Result<()> {
        if self.registry.tags().output_contract != OutputContract::ProbabilitiesAndLabels {
            return Err(EstimatorError::NotSupported {
                estimator: self.name().to_string(),
                capability: Capability::ProbabilityOutput,
                detail: format!(
                    "output contract is {}",
                    self.registry.tags().output_contract
                ),
            });
        }
        Ok(())
    }

    pub fn mark_fitted(&mut self, state: FittedState<P>) {
        self.guard.mark_fitted(state);
    }

    pub fn set_tag(&mut self, key: TagKey, value: TagValue) -> Result<()> {
        let fitted = self.is_fitted();
        self.update_registry(|registry| registry.set(key, value, fitted))
    }

    pub fn override_tag(&mut self, key: TagKey, value: TagValue) -> Result<()> {
        let fitted = self.is_fitted();
        self.update_registry(|registry| registry.override_tag(key, value, fitted))
    }

    pub fn set_tags(&mut self, tags: EstimatorTags) -> Result<()> {
        let fitted = self.is_fitted();
        self.update_registry(|registry| registry.set_all(tags, fitted))
    }

    fn update_registry(
        &mut self,
        change: impl FnOnce(&mut TagRegistry) -> Result<()>,
    ) -> Result<()> {
        let mut next = self.registry.clone();
        change(&mut next)?;
        self.role.check(next.tags(), next.name())?;
        self.registry = next;
        Ok(())
    }

    /// Same tags and configuration, no fitted state.
    pub fn clone_unfitted(&self) -> Self {
        Self {
            role: self.role,
            registry: self.registry.clone(),
            guard: FittedGuard::new(self.name()),
            pipeline: self.pipeline.clone(),
        }
    }
}

impl<P: Serialize> EstimatorBase<P> {
    pub fn fitted_params(&self) -> Result<FittedParamMap> {
        self.require_fitted()?.to_param_map()
    }
}

/// Error for a pipeline output of the wrong kind.
pub(crate) fn unexpected_output(expected: &str) -> EstimatorError {
    EstimatorError::OutputContract(format!("expected {} from the pipeline", expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use estimator_api::EstimatorTagsBuilder;

    #[test]
    fn test_role_pairing() {
        let classifier = EstimatorTagsBuilder::classifier().build().unwrap();
        let clusterer = EstimatorTagsBuilder::clusterer().build().unwrap();
        let transformer = EstimatorTagsBuilder::transformer().build().unwrap();

        assert!(Role::Classifier.check(&classifier, "Clf").is_ok());
        assert!(Role::Clusterer.check(&clusterer, "Clu").is_ok());
        assert!(Role::Transformer.check(&transformer, "Tr").is_ok());

        assert!(matches!(
            Role::Classifier.check(&clusterer, "Clu"),
            Err(EstimatorError::InvalidTags(_))
        ));
        assert!(matches!(
            Role::Regressor.check(&classifier, "Clf"),
            Err(EstimatorError::InvalidTags(_))
        ));
        assert!(matches!(
            Role::Clusterer.check(&transformer, "Tr"),
            Err(EstimatorError::InvalidTags(_))
        ));
    }

    #[test]
    fn test_set_tag_keeps_role_pairing() {
        let tags = EstimatorTagsBuilder::classifier().build().unwrap();
        let mut base: EstimatorBase<()> =
            EstimatorBase::new(Role::Classifier, "Clf", tags, PipelineConfig::default()).unwrap();
        let err = base
            .set_tag(TagKey::FitRequiresY, TagValue::Bool(false))
            .unwrap_err();
        assert!(matches!(err, EstimatorError::InvalidTags(_)));
        assert!(base.registry().tags().fit_requires_y);
    }

    #[test]
    fn test_set_tags_keeps_role_pairing() {
        let tags = EstimatorTagsBuilder::classifier().build().unwrap();
        let mut base: EstimatorBase<()> =
            EstimatorBase::new(Role::Classifier, "Clf", tags, PipelineConfig::default()).unwrap();
        let mut next = base.registry().tags().clone();
        next.multivariate_supported = true;
        next.output_contract = OutputContract::TransformedCollection;
        let err = base.set_tags(next).unwrap_err();
        assert!(matches!(err, EstimatorError::InvalidTags(_)));
        assert!(!base.registry().tags().multivariate_supported);
    }

    #[test]
    fn test_require_probabilities() {
        let tags = EstimatorTagsBuilder::regressor().build().unwrap();
        let base: EstimatorBase<()> =
            EstimatorBase::new(Role::Regressor, "Reg", tags, PipelineConfig::default()).unwrap();
        assert!(matches!(
            base.require_probabilities(),
            Err(EstimatorError::NotSupported {
                capability: Capability::ProbabilityOutput,
                ..
            })
        ));
    }
}
