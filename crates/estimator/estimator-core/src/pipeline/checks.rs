//! Phase and capability checks on validated metadata.

use estimator_spi::{
    Capability, CollectionMetadata, EstimatorError, EstimatorTags, Phase, Result,
};

/// Predict/transform input must have the channel count seen in fit.
pub(crate) fn check_phase(metadata: &CollectionMetadata, phase: Phase<'_>) -> Result<()> {
    if let Phase::Apply { fitted } = phase {
        if metadata.n_channels != fitted.n_channels {
            return Err(EstimatorError::ChannelMismatch {
                expected: fitted.n_channels,
                got: metadata.n_channels,
            });
        }
    }
    Ok(())
}

/// Multivariate, unequal-length and missing-value checks, in that order.
pub(crate) fn check_capabilities(
    metadata: &CollectionMetadata,
    tags: &EstimatorTags,
    estimator: &str,
) -> Result<()> {
    let not_supported = |capability, detail: String| EstimatorError::NotSupported {
        estimator: estimator.to_string(),
        capability,
        detail,
    };
    if metadata.n_channels > 1 && !tags.multivariate_supported {
        return Err(not_supported(
            Capability::Multivariate,
            format!("input has {} channels", metadata.n_channels),
        ));
    }
    tracing::trace!(estimator, n_channels = metadata.n_channels, "channel check passed");
    if !metadata.is_equal_length() && !tags.unequal_length_supported {
        return Err(not_supported(
            Capability::UnequalLength,
            format!(
                "instance lengths range from {} to {}",
                metadata.min_length, metadata.max_length
            ),
        ));
    }
    if metadata.has_missing && !tags.missing_values_supported {
        return Err(not_supported(
            Capability::MissingValues,
            "input contains NaN".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use estimator_spi::{CollectionLayout, LayoutSet, OutputContract};

    fn metadata(n_channels: usize, max_length: usize, has_missing: bool) -> CollectionMetadata {
        CollectionMetadata {
            n_cases: 4,
            n_channels,
            min_length: 8,
            max_length,
            has_missing,
            layout: CollectionLayout::Ragged,
        }
    }

    fn capability_of(err: EstimatorError) -> Capability {
        match err {
            EstimatorError::NotSupported { capability, .. } => capability,
            other => panic!("Expected NotSupported, got {:?}", other),
        }
    }

    #[test]
    fn test_channel_mismatch() {
        let fitted = metadata(2, 8, false);
        let err = check_phase(&metadata(3, 8, false), Phase::Apply { fitted: &fitted }).unwrap_err();
        assert_eq!(err, EstimatorError::ChannelMismatch { expected: 2, got: 3 });
        assert!(check_phase(&metadata(3, 8, false), Phase::Fit).is_ok());
    }

    #[test]
    fn test_check_order() {
        let tags = EstimatorTags::new(LayoutSet::all(), OutputContract::Labels);
        let err = check_capabilities(&metadata(2, 12, true), &tags, "Est").unwrap_err();
        assert_eq!(capability_of(err), Capability::Multivariate);
        let err = check_capabilities(&metadata(1, 12, true), &tags, "Est").unwrap_err();
        assert_eq!(capability_of(err), Capability::UnequalLength);
        let err = check_capabilities(&metadata(1, 8, true), &tags, "Est").unwrap_err();
        assert_eq!(capability_of(err), Capability::MissingValues);
        assert!(check_capabilities(&metadata(1, 8, false), &tags, "Est").is_ok());
    }

    #[test]
    fn test_capable_estimator_accepts_everything() {
        let mut tags = EstimatorTags::new(LayoutSet::all(), OutputContract::Labels);
        tags.multivariate_supported = true;
        tags.unequal_length_supported = true;
        tags.missing_values_supported = true;
        assert!(check_capabilities(&metadata(5, 20, true), &tags, "Est").is_ok());
    }
}
