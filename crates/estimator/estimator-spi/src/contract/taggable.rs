//! Tag and lifecycle traits shared by every estimator role.

use crate::error::Result;
use crate::model::{EstimatorTags, FittedParamMap, TagKey, TagValue};

/// Access to an estimator's capability tags.
///
/// # Example
///
/// ```rust,ignore
/// use estimator_spi::{Taggable, TagKey, TagValue};
///
/// fn accepts_multivariate<T: Taggable>(estimator: &T) -> bool {
///     estimator.has_capability(TagKey::MultivariateSupported, &TagValue::Bool(true))
/// }
/// ```
pub trait Taggable {
    /// Name used in error messages and log spans.
    fn estimator_name(&self) -> &str;

    /// Type-level tags, without instance overrides.
    fn get_class_tags(&self) -> &EstimatorTags;

    /// Effective tags, including instance overrides.
    fn get_tags(&self) -> &EstimatorTags;

    /// Set a tag on an unfitted estimator.
    ///
    /// # Returns
    ///
    /// `Err(TagsFrozen)` once the estimator is fitted, `Err(TagTypeMismatch)`
    /// for a value of the wrong kind, `Err(InvalidTags)` if the result is
    /// inconsistent.
    fn set_tag(&mut self, key: TagKey, value: TagValue) -> Result<()>;

    /// Set a tag regardless of fitted state.
    ///
    /// Overriding a fitted estimator may invalidate the contracts it was
    /// fitted under.
    fn override_tag(&mut self, key: TagKey, value: TagValue) -> Result<()>;

    /// Replace the effective tags of an unfitted estimator in one step.
    ///
    /// On error the previous tags are kept.
    fn set_tags(&mut self, tags: EstimatorTags) -> Result<()>;

    fn get_tag(&self, key: TagKey) -> TagValue {
        self.get_tags().get(key)
    }

    /// Look up a tag by its string name.
    fn get_tag_by_name(&self, name: &str) -> Result<TagValue> {
        Ok(self.get_tag(name.parse()?))
    }

    fn has_capability(&self, key: TagKey, required: &TagValue) -> bool {
        self.get_tags().satisfies(key, required)
    }

    /// Copy tags from another estimator; every key when `keys` is `None`.
    ///
    /// The copied keys are applied together: a rejected result leaves the
    /// tags untouched.
    fn clone_tags(&mut self, other: &dyn Taggable, keys: Option<&[TagKey]>) -> Result<()> {
        let keys = keys.unwrap_or(&TagKey::ALL[..]);
        let mut next = self.get_tags().clone();
        for &key in keys {
            next.set(key, other.get_tag(key))?;
        }
        self.set_tags(next)
    }
}

/// Fit-before-use lifecycle.
pub trait Fittable {
    fn is_fitted(&self) -> bool;

    /// `Err(NotFitted)` unless fitted.
    fn check_is_fitted(&self) -> Result<()>;

    /// Fitted parameters as a string-keyed map.
    fn get_fitted_params(&self) -> Result<FittedParamMap>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EstimatorError;
    use crate::model::{CollectionLayout, LayoutSet, OutputContract};

    // ==========================================================================
    // Mock Implementations for Testing Trait Definitions
    // ==========================================================================

    struct MockEstimator {
        class_tags: EstimatorTags,
        tags: EstimatorTags,
        fitted: bool,
    }

    impl MockEstimator {
        fn new() -> Self {
            let tags = EstimatorTags::new(
                LayoutSet::only(CollectionLayout::EqualLengthDense),
                OutputContract::Labels,
            );
            Self {
                class_tags: tags.clone(),
                tags,
                fitted: false,
            }
        }
    }

    impl Taggable for MockEstimator {
        fn estimator_name(&self) -> &str {
            "MockEstimator"
        }

        fn get_class_tags(&self) -> &EstimatorTags {
            &self.class_tags
        }

        fn get_tags(&self) -> &EstimatorTags {
            &self.tags
        }

        fn set_tag(&mut self, key: TagKey, value: TagValue) -> Result<()> {
            if self.fitted {
                return Err(EstimatorError::TagsFrozen(key));
            }
            self.override_tag(key, value)
        }

        fn override_tag(&mut self, key: TagKey, value: TagValue) -> Result<()> {
            let mut next = self.tags.clone();
            next.set(key, value)?;
            next.validate()?;
            self.tags = next;
            Ok(())
        }

        fn set_tags(&mut self, tags: EstimatorTags) -> Result<()> {
            if self.fitted && tags != self.tags {
                return Err(EstimatorError::TagsFrozen(TagKey::InputLayoutsSupported));
            }
            tags.validate()?;
            self.tags = tags;
            Ok(())
        }
    }

    impl Fittable for MockEstimator {
        fn is_fitted(&self) -> bool {
            self.fitted
        }

        fn check_is_fitted(&self) -> Result<()> {
            if self.fitted {
                Ok(())
            } else {
                Err(EstimatorError::NotFitted(self.estimator_name().to_string()))
            }
        }

        fn get_fitted_params(&self) -> Result<FittedParamMap> {
            self.check_is_fitted()?;
            let mut params = FittedParamMap::new();
            params.insert("fitted".to_string(), serde_json::Value::Bool(true));
            Ok(params)
        }
    }

    // ==========================================================================
    // Taggable Trait Tests
    // ==========================================================================

    #[test]
    fn test_get_tag_by_name() {
        let estimator = MockEstimator::new();
        let value = estimator.get_tag_by_name("fit_requires_y").unwrap();
        assert_eq!(value, TagValue::Bool(false));
    }

    #[test]
    fn test_get_tag_by_unknown_name() {
        let estimator = MockEstimator::new();
        let err = estimator.get_tag_by_name("capability:teleport").unwrap_err();
        assert_eq!(err, EstimatorError::UnknownTag("capability:teleport".to_string()));
    }

    #[test]
    fn test_set_tag_keeps_class_tags() {
        let mut estimator = MockEstimator::new();
        estimator
            .set_tag(TagKey::MissingValuesSupported, TagValue::Bool(true))
            .unwrap();
        assert!(estimator.get_tags().missing_values_supported);
        assert!(!estimator.get_class_tags().missing_values_supported);
    }

    #[test]
    fn test_set_tag_after_fit_is_frozen() {
        let mut estimator = MockEstimator::new();
        estimator.fitted = true;
        let err = estimator
            .set_tag(TagKey::MultivariateSupported, TagValue::Bool(true))
            .unwrap_err();
        assert_eq!(err, EstimatorError::TagsFrozen(TagKey::MultivariateSupported));
        assert!(estimator
            .override_tag(TagKey::MultivariateSupported, TagValue::Bool(true))
            .is_ok());
    }

    #[test]
    fn test_has_capability() {
        let estimator = MockEstimator::new();
        let dense = TagValue::Layouts(LayoutSet::only(CollectionLayout::EqualLengthDense));
        let ragged = TagValue::Layouts(LayoutSet::only(CollectionLayout::Ragged));
        assert!(estimator.has_capability(TagKey::InputLayoutsSupported, &dense));
        assert!(!estimator.has_capability(TagKey::InputLayoutsSupported, &ragged));
    }

    #[test]
    fn test_clone_tags_subset() {
        let mut source = MockEstimator::new();
        source
            .set_tag(TagKey::NonDeterministic, TagValue::Bool(true))
            .unwrap();
        source
            .set_tag(TagKey::MultivariateSupported, TagValue::Bool(true))
            .unwrap();

        let mut target = MockEstimator::new();
        target
            .clone_tags(&source, Some(&[TagKey::NonDeterministic]))
            .unwrap();
        assert!(target.get_tags().non_deterministic);
        assert!(!target.get_tags().multivariate_supported);
    }

    #[test]
    fn test_clone_tags_failure_keeps_tags() {
        let mut source = MockEstimator::new();
        source.tags.input_layouts_supported = LayoutSet::all();
        source.tags.unequal_length_supported = true;
        source.tags.missing_values_supported = true;

        let mut target = MockEstimator::new();
        let before = target.get_tags().clone();
        let err = target
            .clone_tags(
                &source,
                Some(&[TagKey::MissingValuesSupported, TagKey::UnequalLengthSupported]),
            )
            .unwrap_err();
        assert!(matches!(err, EstimatorError::InvalidTags(_)));
        assert_eq!(target.get_tags(), &before);
    }

    // ==========================================================================
    // Fittable Trait Tests
    // ==========================================================================

    #[test]
    fn test_fitted_params_require_fit() {
        let mut estimator = MockEstimator::new();
        assert!(matches!(
            estimator.get_fitted_params(),
            Err(EstimatorError::NotFitted(_))
        ));
        estimator.fitted = true;
        assert_eq!(estimator.get_fitted_params().unwrap().len(), 1);
    }
}
