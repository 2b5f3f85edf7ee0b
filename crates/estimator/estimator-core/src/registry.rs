//! Per-instance tag registry.

use estimator_spi::{
    CollectionLayout, EstimatorError, EstimatorTags, Result, TagKey, TagValue,
};

/// Class tags of an estimator type plus the instance's effective tags.
///
/// The canonical layout is fixed from the class tags at construction and
/// every later change must keep it supported.
#[derive(Debug, Clone, PartialEq)]
pub struct TagRegistry {
    name: String,
    class_tags: EstimatorTags,
    tags: EstimatorTags,
    canonical: CollectionLayout,
}

impl TagRegistry {
    pub fn new(name: impl Into<String>, class_tags: EstimatorTags) -> Result<Self> {
        class_tags.validate()?;
        let canonical = class_tags.canonical_layout();
        Ok(Self {
            name: name.into(),
            tags: class_tags.clone(),
            class_tags,
            canonical,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class_tags(&self) -> &EstimatorTags {
        &self.class_tags
    }

    /// Effective tags.
    pub fn tags(&self) -> &EstimatorTags {
        &self.tags
    }

    pub fn canonical_layout(&self) -> CollectionLayout {
        self.canonical
    }

    pub fn get(&self, key: TagKey) -> TagValue {
        self.tags.get(key)
    }

    pub fn has_capability(&self, key: TagKey, required: &TagValue) -> bool {
        self.tags.satisfies(key, required)
    }

    /// Set a tag on an unfitted estimator.
    pub fn set(&mut self, key: TagKey, value: TagValue, fitted: bool) -> Result<()> {
        if fitted {
            return Err(EstimatorError::TagsFrozen(key));
        }
        self.apply(key, value)
    }

    /// Set a tag regardless of fitted state.
    pub fn override_tag(&mut self, key: TagKey, value: TagValue, fitted: bool) -> Result<()> {
        if fitted {
            tracing::warn!(
                estimator = %self.name,
                tag = %key,
                "overriding tag on a fitted estimator; fitted contracts may no longer hold"
            );
        }
        self.apply(key, value)
    }

    /// Replace the effective tags of an unfitted estimator in one step.
    ///
    /// Either every key takes its new value or none does.
    pub fn set_all(&mut self, tags: EstimatorTags, fitted: bool) -> Result<()> {
        let changed: Vec<TagKey> = TagKey::ALL
            .into_iter()
            .filter(|&key| tags.get(key) != self.tags.get(key))
            .collect();
        if let Some(&key) = changed.first() {
            if fitted {
                return Err(EstimatorError::TagsFrozen(key));
            }
        }
        self.commit(tags)?;
        tracing::trace!(estimator = %self.name, changed = changed.len(), "tags replaced");
        Ok(())
    }

    fn apply(&mut self, key: TagKey, value: TagValue) -> Result<()> {
        let mut next = self.tags.clone();
        next.set(key, value)?;
        self.commit(next)?;
        tracing::trace!(estimator = %self.name, tag = %key, "tag updated");
        Ok(())
    }

    fn commit(&mut self, next: EstimatorTags) -> Result<()> {
        next.validate()?;
        if !next.supports_layout(self.canonical) {
            return Err(EstimatorError::InvalidTags(format!(
                "{} must keep supporting its canonical layout {}",
                self.name, self.canonical
            )));
        }
        self.tags = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estimator_spi::{LayoutSet, OutputContract};

    fn registry() -> TagRegistry {
        let tags = EstimatorTags::new(
            LayoutSet::only(CollectionLayout::EqualLengthDense),
            OutputContract::Labels,
        );
        TagRegistry::new("DenseOnly", tags).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_class_tags() {
        let tags = EstimatorTags::new(LayoutSet::new(), OutputContract::Labels);
        assert!(matches!(
            TagRegistry::new("Broken", tags),
            Err(EstimatorError::InvalidTags(_))
        ));
    }

    #[test]
    fn test_set_before_fit() {
        let mut registry = registry();
        registry
            .set(TagKey::MultivariateSupported, TagValue::Bool(true), false)
            .unwrap();
        assert_eq!(registry.get(TagKey::MultivariateSupported), TagValue::Bool(true));
        assert!(!registry.class_tags().multivariate_supported);
    }

    #[test]
    fn test_set_after_fit_frozen() {
        let mut registry = registry();
        let err = registry
            .set(TagKey::MultivariateSupported, TagValue::Bool(true), true)
            .unwrap_err();
        assert_eq!(err, EstimatorError::TagsFrozen(TagKey::MultivariateSupported));
    }

    #[test]
    fn test_override_after_fit() {
        let mut registry = registry();
        registry
            .override_tag(TagKey::MissingValuesSupported, TagValue::Bool(true), true)
            .unwrap();
        assert!(registry.tags().missing_values_supported);
    }

    #[test]
    fn test_override_cannot_drop_canonical_layout() {
        let mut registry = registry();
        let tabular_and_ragged = LayoutSet::only(CollectionLayout::Ragged)
            .with(CollectionLayout::LabeledTabular);
        let err = registry
            .override_tag(TagKey::InputLayoutsSupported, tabular_and_ragged.into(), false)
            .unwrap_err();
        assert!(matches!(err, EstimatorError::InvalidTags(_)));
        assert_eq!(registry.tags(), registry.class_tags());
    }

    #[test]
    fn test_failed_set_keeps_tags() {
        let mut registry = registry();
        let err = registry
            .set(TagKey::UnequalLengthSupported, TagValue::Bool(true), false)
            .unwrap_err();
        assert!(matches!(err, EstimatorError::InvalidTags(_)));
        assert!(!registry.tags().unequal_length_supported);
    }

    #[test]
    fn test_set_all_is_atomic() {
        let mut registry = registry();
        let mut next = registry.tags().clone();
        next.multivariate_supported = true;
        next.unequal_length_supported = true;
        let err = registry.set_all(next.clone(), false).unwrap_err();
        assert!(matches!(err, EstimatorError::InvalidTags(_)));
        assert_eq!(registry.tags(), registry.class_tags());

        next.unequal_length_supported = false;
        registry.set_all(next, false).unwrap();
        assert!(registry.tags().multivariate_supported);
    }

    #[test]
    fn test_set_all_after_fit() {
        let mut registry = registry();
        let same = registry.tags().clone();
        assert!(registry.set_all(same, true).is_ok());

        let mut next = registry.tags().clone();
        next.non_deterministic = true;
        let err = registry.set_all(next, true).unwrap_err();
        assert_eq!(err, EstimatorError::TagsFrozen(TagKey::NonDeterministic));
    }
}
