//! Fit and apply each role façade on a small unequal-length collection.
//!
//! Run with `RUST_LOG=estimator_core=debug` to see layout decisions.

use estimator_facade::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "basic=info,estimator_core=info".into()),
        )
        .init();

    let x = RawCollection::univariate(vec![
        vec![0.1, 0.3, 0.2, 0.4],
        vec![0.2, 0.1, 0.3],
        vec![5.1, 5.3, 4.9, 5.0, 5.2],
        vec![4.8, 5.1, 5.0],
    ]);
    let y = Target::labels(["calm", "calm", "busy", "busy"]);

    // Classification
    let mut classifier = Classifier::new(PriorClassifier::new())?;
    classifier.fit(&x, &y)?;
    let labels = classifier.predict(&x)?;
    let proba = classifier.predict_proba(&x)?;
    tracing::info!(?labels, columns = ?proba.columns, "classifier fitted");

    // Regression
    let mut regressor = Regressor::new(MeanRegressor::new())?;
    regressor.fit(&x, &Target::values(vec![1.0, 1.5, 9.0, 8.5]))?;
    tracing::info!(predictions = ?regressor.predict(&x)?, "regressor fitted");

    // Clustering
    let mut clusterer = Clusterer::new(EqualWidthClusterer::new(2))?;
    clusterer.fit(&x)?;
    tracing::info!(clusters = ?clusterer.predict(&x)?, "clusterer fitted");

    // Transformation
    let mut padder = CollectionTransformer::new(Padder::new())?;
    let padded = padder.fit_transform(&x, None)?;
    tracing::info!(layout = %padded.layout(), "collection padded");

    let params = classifier.get_fitted_params()?;
    tracing::info!(?params, "classifier parameters");

    Ok(())
}
