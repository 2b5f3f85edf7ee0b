//! Classifier façade.

use estimator_api::PipelineConfig;
use estimator_spi::{
    CanonicalTarget, ClassLabel, Classifiable, ClassifierAlgorithm, EstimatorError,
    EstimatorTags, Fittable, FittedParamMap, Output, ProbabilityMatrix, RawCollection,
    RawOutput, Result, TagKey, TagValue, Taggable, Target,
};

use super::base::{unexpected_output, EstimatorBase, Role};
use crate::guard::FittedState;
use crate::pipeline::TargetKind;

/// Wraps a [`ClassifierAlgorithm`] with tag checks, input validation and the
/// fit-before-predict lifecycle.
///
/// # Example
///
/// ```rust,ignore
/// use estimator_core::{Classifier, PriorClassifier};
/// use estimator_spi::{Classifiable, RawCollection, Target};
///
/// let mut clf = Classifier::new(PriorClassifier::new())?;
/// clf.fit(&RawCollection::array2(3, 4, vec![0.0; 12]), &Target::labels(["a", "b", "a"]))?;
/// let labels = clf.predict(&RawCollection::array2(1, 4, vec![0.0; 4]))?;
/// ```
#[derive(Debug, Clone)]
pub struct Classifier<A: ClassifierAlgorithm> {
    algorithm: A,
    base: EstimatorBase<A::Params>,
}

impl<A: ClassifierAlgorithm> Classifier<A> {
    pub fn new(algorithm: A) -> Result<Self> {
        Self::with_config(algorithm, PipelineConfig::default())
    }

    /// Fails with `InvalidTags` when the algorithm's tags do not describe a
    /// classifier.
    pub fn with_config(algorithm: A, config: PipelineConfig) -> Result<Self> {
        Ok(Self {
            base: EstimatorBase::new(Role::Classifier, A::NAME, A::class_tags(), config)?,
            algorithm,
        })
    }

    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    pub fn config(&self) -> &PipelineConfig {
        self.base.config()
    }

    /// Sorted classes seen in fit.
    pub fn classes(&self) -> Result<&[ClassLabel]> {
        let state = self.base.require_fitted()?;
        Ok(state.classes.as_deref().unwrap_or_default())
    }

    pub fn fitted_state(&self) -> Result<&FittedState<A::Params>> {
        self.base.require_fitted()
    }

    /// New unfitted instance with the same algorithm settings and tags.
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

impl<A: ClassifierAlgorithm> Classifiable for Classifier<A> {
    fn fit(&mut self, x: &RawCollection, y: &Target) -> Result<()> {
        let _span = tracing::debug_span!("fit", estimator = A::NAME).entered();
        let validated = self.base.validate_fit(x)?;
        let labels = match self.base.validate_target(
            Some(y),
            validated.metadata.n_cases,
            TargetKind::Labels,
        )? {
            Some(CanonicalTarget::Labels(labels)) => labels,
            _ => {
                return Err(EstimatorError::InvalidTarget(
                    "classifier targets must be class labels".to_string(),
                ))
            }
        };
        let params = self.algorithm.fit(&validated.canonical, &labels)?;
        self.base.mark_fitted(FittedState {
            params,
            input: validated.metadata,
            classes: Some(labels.classes),
        });
        Ok(())
    }

    fn predict(&self, x: &RawCollection) -> Result<Vec<ClassLabel>> {
        let _span = tracing::debug_span!("predict", estimator = A::NAME).entered();
        let state = self.base.require_fitted()?;
        let validated = self.base.validate_apply(state, x)?;
        let indices = self.algorithm.predict(&state.params, &validated.canonical)?;
        match self.base.convert_output(
            RawOutput::ClassIndices(indices),
            validated.metadata.n_cases,
            state.classes.as_deref(),
        )? {
            Output::Labels(labels) => Ok(labels),
            _ => Err(unexpected_output("labels")),
        }
    }

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
            state.classes.as_deref(),
        )? {
            Output::Probabilities(matrix) => Ok(matrix),
            _ => Err(unexpected_output("probabilities")),
        }
    }
}

impl<A: ClassifierAlgorithm> Taggable for Classifier<A> {
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

impl<A: ClassifierAlgorithm> Fittable for Classifier<A> {
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
