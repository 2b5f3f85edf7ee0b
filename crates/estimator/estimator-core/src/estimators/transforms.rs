//! Series-to-series transformers.

use estimator_api::EstimatorTagsBuilder;
use estimator_spi::{
    Algorithm, CanonicalCollection, CanonicalTarget, Collection, CollectionLayout,
    DenseCollection, EstimatorError, EstimatorTags, LayoutSet, RaggedCollection, Result, Series,
    TransformerAlgorithm,
};
use serde::Serialize;

// ============================================================================
// Padder
// ============================================================================

/// Pads every channel to a common length so unequal-length input can reach
/// estimators that only take dense collections.
///
/// Without a `target_length` the pad length is the longest instance seen in
/// fit. Instances longer than the pad length are rejected.
#[derive(Debug, Clone)]
pub struct Padder {
    fill_value: f64,
    target_length: Option<usize>,
}

impl Padder {
    pub fn new() -> Self {
        Self {
            fill_value: 0.0,
            target_length: None,
        }
    }

    pub fn with_fill_value(mut self, fill_value: f64) -> Self {
        self.fill_value = fill_value;
        self
    }

    pub fn with_target_length(mut self, length: usize) -> Self {
        self.target_length = Some(length);
        self
    }

    pub fn fill_value(&self) -> f64 {
        self.fill_value
    }
}

impl Default for Padder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PadParams {
    pub pad_length: usize,
}

impl Algorithm for Padder {
    const NAME: &'static str = "Padder";

    fn class_tags() -> EstimatorTags {
        EstimatorTagsBuilder::transformer()
            .layouts(LayoutSet::all())
            .multivariate(true)
            .unequal_length(true)
            .missing_values(true)
            .algorithm_type("padding")
            .into_tags()
    }
}

impl TransformerAlgorithm for Padder {
    type Params = PadParams;

    fn fit(&self, x: &CanonicalCollection, _y: Option<&CanonicalTarget>) -> Result<PadParams> {
        let longest = x.instances().map(|i| i.n_timepoints()).max().unwrap_or(0);
        let pad_length = match self.target_length {
            Some(length) if length < longest => {
                return Err(EstimatorError::Algorithm(format!(
                    "target length {} is shorter than the longest series ({})",
                    length, longest
                )))
            }
            Some(length) => length,
            None => longest,
        };
        Ok(PadParams { pad_length })
    }

    fn transform(&self, params: &PadParams, x: &CanonicalCollection) -> Result<Collection> {
        let n_channels = x.n_channels();
        let mut values = Vec::with_capacity(x.n_cases() * n_channels * params.pad_length);
        for (index, instance) in x.instances().enumerate() {
            if instance.n_timepoints() > params.pad_length {
                return Err(EstimatorError::Algorithm(format!(
                    "instance {} has {} time points, more than the fitted pad length {}",
                    index,
                    instance.n_timepoints(),
                    params.pad_length
                )));
            }
            for channel in instance.channels() {
                values.extend_from_slice(channel);
                values.resize(values.len() + params.pad_length - channel.len(), self.fill_value);
            }
        }
        let dense = DenseCollection::new(x.n_cases(), n_channels, params.pad_length, values)?;
        Ok(Collection::Dense(dense))
    }
}

// ============================================================================
// Normalizer
// ============================================================================

/// Z-normalizes each channel of each instance independently.
///
/// Stateless: fit only records that the transformer was fitted. Constant
/// channels map to zeros.
#[derive(Debug, Clone, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }
}

fn z_normalize(channel: &[f64]) -> Vec<f64> {
    let n = channel.len() as f64;
    let mean = channel.iter().sum::<f64>() / n;
    let std_dev = (channel.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n).sqrt();
    if std_dev == 0.0 {
        return vec![0.0; channel.len()];
    }
    channel.iter().map(|&x| (x - mean) / std_dev).collect()
}

impl Algorithm for Normalizer {
    const NAME: &'static str = "Normalizer";

    fn class_tags() -> EstimatorTags {
        EstimatorTagsBuilder::transformer()
            .layout(CollectionLayout::Ragged)
            .multivariate(true)
            .unequal_length(true)
            .algorithm_type("normalization")
            .into_tags()
    }
}

impl TransformerAlgorithm for Normalizer {
    type Params = ();

    fn fit(&self, _x: &CanonicalCollection, _y: Option<&CanonicalTarget>) -> Result<()> {
        Ok(())
    }

    fn transform(&self, _params: &(), x: &CanonicalCollection) -> Result<Collection> {
        let series = x
            .instances()
            .map(|instance| Series::from_channels(instance.channels().map(z_normalize).collect()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Collection::Ragged(RaggedCollection::new(series)))
    }
}
