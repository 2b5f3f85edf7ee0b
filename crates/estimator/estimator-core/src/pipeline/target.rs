//! Target validation.

use estimator_spi::{
    CanonicalTarget, EncodedLabels, EstimatorError, EstimatorTags, Result, Target,
};

/// Kind of target a role consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Class labels, encoded against the sorted class list.
    Labels,
    /// Finite real values.
    Values,
    /// Whatever the caller passes.
    Any,
}

/// Validate `y` against the instance count and the estimator's tags.
///
/// Returns `None` only when no target was given and none is required.
pub fn validate_target(
    y: Option<&Target>,
    n_instances: usize,
    tags: &EstimatorTags,
    kind: TargetKind,
    estimator: &str,
) -> Result<Option<CanonicalTarget>> {
    let y = match y {
        Some(y) => y,
        None if tags.fit_requires_y => {
            return Err(EstimatorError::TargetRequired(estimator.to_string()))
        }
        None => return Ok(None),
    };
    if y.len() != n_instances {
        return Err(EstimatorError::TargetLength {
            expected: n_instances,
            got: y.len(),
        });
    }
    let canonical = match (y, kind) {
        (Target::Labels(labels), TargetKind::Labels | TargetKind::Any) => {
            let encoded = EncodedLabels::encode(labels);
            tracing::trace!(estimator, n_classes = encoded.n_classes(), "labels encoded");
            CanonicalTarget::Labels(encoded)
        }
        (Target::Values(values), TargetKind::Values) => {
            if let Some((index, value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                return Err(EstimatorError::InvalidTarget(format!(
                    "regression target {} at index {} is not finite",
                    value, index
                )));
            }
            CanonicalTarget::Values(values.clone())
        }
        (Target::Values(values), TargetKind::Any) => CanonicalTarget::Values(values.clone()),
        (Target::Values(_), TargetKind::Labels) => {
            return Err(EstimatorError::InvalidTarget(format!(
                "{} expects class labels, got numeric values",
                estimator
            )))
        }
        (Target::Labels(_), TargetKind::Values) => {
            return Err(EstimatorError::InvalidTarget(format!(
                "{} expects numeric values, got class labels",
                estimator
            )))
        }
    };
    Ok(Some(canonical))
}
