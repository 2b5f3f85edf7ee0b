//! Baseline estimators that ignore the series shape.

use estimator_api::EstimatorTagsBuilder;
use estimator_spi::{
    Algorithm, CanonicalCollection, ClassifierAlgorithm, ClustererAlgorithm,
    EncodedLabels, EstimatorError, EstimatorTags, InstanceView, LayoutSet, OutputContract,
    RegressorAlgorithm, Result,
};
use serde::Serialize;

/// Tags shared by the baselines: every layout and input capability.
fn baseline_tags(builder: EstimatorTagsBuilder) -> EstimatorTags {
    builder
        .layouts(LayoutSet::all())
        .multivariate(true)
        .unequal_length(true)
        .missing_values(true)
        .algorithm_type("dummy")
        .into_tags()
}

/// Mean of the non-missing values of one instance; NaN when all are missing.
fn instance_mean(instance: InstanceView<'_>) -> f64 {
    let (sum, count) = instance
        .values()
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

// ============================================================================
// Prior Classifier
// ============================================================================

/// Predicts the most frequent fitted class; probabilities are the class
/// frequencies.
#[derive(Debug, Clone, Default)]
pub struct PriorClassifier;

impl PriorClassifier {
    pub fn new() -> Self {
        Self
    }
}

/// Class frequencies, aligned with the sorted class list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorParams {
    pub priors: Vec<f64>,
}

impl Algorithm for PriorClassifier {
    const NAME: &'static str = "PriorClassifier";

    fn class_tags() -> EstimatorTags {
        baseline_tags(EstimatorTagsBuilder::classifier())
    }
}

impl ClassifierAlgorithm for PriorClassifier {
    type Params = PriorParams;

    fn fit(&self, _x: &CanonicalCollection, y: &EncodedLabels) -> Result<PriorParams> {
        let total = y.indices.len() as f64;
        let priors = y.counts().into_iter().map(|c| c as f64 / total).collect();
        Ok(PriorParams { priors })
    }

    fn predict(&self, params: &PriorParams, x: &CanonicalCollection) -> Result<Vec<usize>> {
        let majority = params
            .priors
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, &p)| {
                if p > best.1 {
                    (i, p)
                } else {
                    best
                }
            })
            .0;
        Ok(vec![majority; x.n_cases()])
    }

    fn predict_proba(
        &self,
        params: &PriorParams,
        x: &CanonicalCollection,
    ) -> Result<Vec<Vec<f64>>> {
        Ok(vec![params.priors.clone(); x.n_cases()])
    }
}

// ============================================================================
// Mean Regressor
// ============================================================================

/// Predicts the mean fitted target for every instance.
#[derive(Debug, Clone, Default)]
pub struct MeanRegressor;

impl MeanRegressor {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeanParams {
    pub mean: f64,
}

impl Algorithm for MeanRegressor {
    const NAME: &'static str = "MeanRegressor";

    fn class_tags() -> EstimatorTags {
        baseline_tags(EstimatorTagsBuilder::regressor())
    }
}

impl RegressorAlgorithm for MeanRegressor {
    type Params = MeanParams;

    fn fit(&self, _x: &CanonicalCollection, y: &[f64]) -> Result<MeanParams> {
        let mean = y.iter().sum::<f64>() / y.len() as f64;
        Ok(MeanParams { mean })
    }

    fn predict(&self, params: &MeanParams, x: &CanonicalCollection) -> Result<Vec<f64>> {
        Ok(vec![params.mean; x.n_cases()])
    }
}

// ============================================================================
// Equal Width Clusterer
// ============================================================================

/// Bins instances by their mean value into `n_clusters` equal-width bins
/// spanning the fitted range.
#[derive(Debug, Clone)]
pub struct EqualWidthClusterer {
    n_clusters: usize,
}

impl EqualWidthClusterer {
    pub fn new(n_clusters: usize) -> Self {
        Self { n_clusters }
    }

    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }
}

impl Default for EqualWidthClusterer {
    fn default() -> Self {
        Self::new(2)
    }
}

/// Fitted range of instance means.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinParams {
    pub n_clusters: usize,
    pub min: f64,
    pub max: f64,
}

impl BinParams {
    fn assign(&self, mean: f64) -> usize {
        let width = (self.max - self.min) / self.n_clusters as f64;
        if !mean.is_finite() || width <= 0.0 {
            return 0;
        }
        let bin = ((mean - self.min) / width).floor();
        bin.clamp(0.0, (self.n_clusters - 1) as f64) as usize
    }
}

impl Algorithm for EqualWidthClusterer {
    const NAME: &'static str = "EqualWidthClusterer";

    fn class_tags() -> EstimatorTags {
        baseline_tags(
            EstimatorTagsBuilder::clusterer().output_contract(OutputContract::ProbabilitiesAndLabels),
        )
    }
}

impl ClustererAlgorithm for EqualWidthClusterer {
    type Params = BinParams;

    fn fit(&self, x: &CanonicalCollection) -> Result<BinParams> {
        if self.n_clusters == 0 {
            return Err(EstimatorError::Algorithm(
                "n_clusters must be at least 1".to_string(),
            ));
        }
        let (min, max) = x
            .instances()
            .map(instance_mean)
            .filter(|m| m.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), m| {
                (lo.min(m), hi.max(m))
            });
        if min > max {
            return Err(EstimatorError::Algorithm(
                "every instance is entirely missing".to_string(),
            ));
        }
        Ok(BinParams {
            n_clusters: self.n_clusters,
            min,
            max,
        })
    }

    fn predict(&self, params: &BinParams, x: &CanonicalCollection) -> Result<Vec<usize>> {
        Ok(x.instances()
            .map(|instance| params.assign(instance_mean(instance)))
            .collect())
    }

    fn predict_proba(
        &self,
        params: &BinParams,
        x: &CanonicalCollection,
    ) -> Result<Vec<Vec<f64>>> {
        let ids = self.predict(params, x)?;
        Ok(ids
            .into_iter()
            .map(|id| {
                let mut row = vec![0.0; params.n_clusters];
                row[id] = 1.0;
                row
            })
            .collect())
    }
}
