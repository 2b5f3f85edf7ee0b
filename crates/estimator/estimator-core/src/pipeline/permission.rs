//! Layout permission.

use estimator_spi::{
    Capability, CollectionLayout, CollectionMetadata, EstimatorError, EstimatorTags, Result,
};

/// Whether `from` converts to `to` without losing data.
pub fn is_reachable(from: CollectionLayout, to: CollectionLayout, equal_length: bool) -> bool {
    match from {
        _ if from == to => true,
        CollectionLayout::EqualLengthDense | CollectionLayout::LabeledTabular => true,
        CollectionLayout::Ragged => equal_length,
    }
}

/// Pick the supported layout the input is accepted as.
///
/// The detected layout wins when supported; otherwise the first reachable
/// supported layout in [`CollectionLayout::ALL`] order.
pub(crate) fn resolve_layout(
    metadata: &CollectionMetadata,
    tags: &EstimatorTags,
    estimator: &str,
) -> Result<CollectionLayout> {
    let detected = metadata.layout;
    if tags.supports_layout(detected) {
        return Ok(detected);
    }
    let equal_length = metadata.is_equal_length();
    if let Some(target) = CollectionLayout::ALL
        .into_iter()
        .find(|&to| tags.supports_layout(to) && is_reachable(detected, to, equal_length))
    {
        tracing::trace!(%detected, %target, "input accepted through layout conversion");
        return Ok(target);
    }
    if !equal_length && !tags.unequal_length_supported {
        return Err(EstimatorError::NotSupported {
            estimator: estimator.to_string(),
            capability: Capability::UnequalLength,
            detail: format!(
                "{} input with lengths {} to {} has no equal-length form",
                detected, metadata.min_length, metadata.max_length
            ),
        });
    }
    Err(EstimatorError::UnsupportedInputType {
        got: detected,
        supported: tags.input_layouts_supported.to_string(),
    })
}
