//! Fitted-state guard.

use estimator_spi::{
    ClassLabel, CollectionMetadata, EstimatorError, FittedParamMap, Result,
};
use serde::Serialize;
use serde_json::Value;

/// Lifecycle state of one estimator instance.
#[derive(Debug, Clone, PartialEq)]
pub enum FitState<S> {
    Unfitted,
    Fitted(S),
}

/// Everything an instance learns in a successful fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedState<P> {
    /// Opaque algorithm parameters.
    pub params: P,
    /// Metadata of the fit input.
    pub input: CollectionMetadata,
    /// Observed classes, sorted; classifiers only.
    pub classes: Option<Vec<ClassLabel>>,
}

impl<P: Serialize> FittedState<P> {
    /// Flatten into a string-keyed map.
    ///
    /// Struct parameters contribute one entry per field, anything else is
    /// stored under `params`.
    pub fn to_param_map(&self) -> Result<FittedParamMap> {
        let params = serde_json::to_value(&self.params).map_err(|e| {
            EstimatorError::Algorithm(format!("fitted parameters are not serializable: {}", e))
        })?;
        let mut map = FittedParamMap::new();
        match params {
            Value::Object(fields) => map.extend(fields),
            Value::Null => {}
            other => {
                map.insert("params".to_string(), other);
            }
        }
        map.insert("n_cases".to_string(), Value::from(self.input.n_cases));
        map.insert("n_channels".to_string(), Value::from(self.input.n_channels));
        if let Some(classes) = &self.classes {
            map.insert("classes".to_string(), Value::from(classes.clone()));
        }
        Ok(map)
    }
}

/// Gates fitted-only operations.
#[derive(Debug, Clone)]
pub struct FittedGuard<S> {
    name: String,
    state: FitState<S>,
}

impl<S> FittedGuard<S> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: FitState::Unfitted,
        }
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self.state, FitState::Fitted(_))
    }

    /// Fitted state, or `NotFitted`.
    pub fn require_fitted(&self) -> Result<&S> {
        match &self.state {
            FitState::Fitted(state) => Ok(state),
            FitState::Unfitted => Err(EstimatorError::NotFitted(self.name.clone())),
        }
    }

    /// Fails with `AlreadyFitted` when fitted and refitting is off.
    pub fn check_refit(&self, allow_refit: bool) -> Result<()> {
        if self.is_fitted() && !allow_refit {
            return Err(EstimatorError::AlreadyFitted(self.name.clone()));
        }
        Ok(())
    }

    /// Replace the state in one step.
    pub fn mark_fitted(&mut self, state: S) {
        let refit = self.is_fitted();
        self.state = FitState::Fitted(state);
        tracing::debug!(estimator = %self.name, refit, "estimator fitted");
    }

    pub fn state(&self) -> &FitState<S> {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estimator_spi::CollectionLayout;

    fn metadata() -> CollectionMetadata {
        CollectionMetadata {
            n_cases: 3,
            n_channels: 2,
            min_length: 10,
            max_length: 10,
            has_missing: false,
            layout: CollectionLayout::EqualLengthDense,
        }
    }

    #[derive(Serialize)]
    struct Means {
        means: Vec<f64>,
    }

    #[test]
    fn test_require_fitted_before_fit() {
        let guard: FittedGuard<u8> = FittedGuard::new("DummyClusterer");
        let err = guard.require_fitted().unwrap_err();
        assert_eq!(err, EstimatorError::NotFitted("DummyClusterer".to_string()));
        assert!(!guard.is_fitted());
    }

    #[test]
    fn test_mark_fitted() {
        let mut guard = FittedGuard::new("Model");
        guard.mark_fitted(7u8);
        assert!(guard.is_fitted());
        assert_eq!(*guard.require_fitted().unwrap(), 7);
        guard.mark_fitted(9u8);
        assert_eq!(guard.state(), &FitState::Fitted(9));
    }

    #[test]
    fn test_refit_disabled() {
        let mut guard = FittedGuard::new("Model");
        assert!(guard.check_refit(false).is_ok());
        guard.mark_fitted(());
        assert!(guard.check_refit(true).is_ok());
        assert_eq!(
            guard.check_refit(false).unwrap_err(),
            EstimatorError::AlreadyFitted("Model".to_string())
        );
    }

    #[test]
    fn test_param_map_struct_params() {
        let state = FittedState {
            params: Means {
                means: vec![1.0, 2.0],
            },
            input: metadata(),
            classes: Some(vec!["a".to_string(), "b".to_string()]),
        };
        let map = state.to_param_map().unwrap();
        assert_eq!(map["means"], serde_json::json!([1.0, 2.0]));
        assert_eq!(map["n_channels"], serde_json::json!(2));
        assert_eq!(map["classes"], serde_json::json!(["a", "b"]));
    }

    #[test]
    fn test_param_map_scalar_params() {
        let state = FittedState {
            params: 4.5f64,
            input: metadata(),
            classes: None,
        };
        let map = state.to_param_map().unwrap();
        assert_eq!(map["params"], serde_json::json!(4.5));
        assert!(!map.contains_key("classes"));
    }
}
