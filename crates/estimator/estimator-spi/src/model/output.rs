//! Algorithm output before and after contract checks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::collection::Collection;
use crate::model::target::ClassLabel;

/// Introspected fitted parameters.
pub type FittedParamMap = BTreeMap<String, serde_json::Value>;

/// What an algorithm hook returns, before output validation.
#[derive(Debug, Clone, PartialEq)]
pub enum RawOutput {
    /// Indices into the observed class list.
    ClassIndices(Vec<usize>),
    Values(Vec<f64>),
    ClusterIds(Vec<usize>),
    /// One row per instance.
    Probabilities(Vec<Vec<f64>>),
    Collection(Collection),
}

impl RawOutput {
    pub fn kind(&self) -> &'static str {
        match self {
            RawOutput::ClassIndices(_) => "class indices",
            RawOutput::Values(_) => "values",
            RawOutput::ClusterIds(_) => "cluster ids",
            RawOutput::Probabilities(_) => "probabilities",
            RawOutput::Collection(_) => "collection",
        }
    }
}

/// Row-stochastic matrix with one named column per class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityMatrix {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl ProbabilityMatrix {
    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    pub fn row(&self, index: usize) -> &[f64] {
        &self.rows[index]
    }

    /// Column with the highest probability per row; ties go to the first column.
    pub fn argmax(&self) -> Vec<usize> {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .fold((0, f64::NEG_INFINITY), |best, (i, &p)| {
                        if p > best.1 {
                            (i, p)
                        } else {
                            best
                        }
                    })
                    .0
            })
            .collect()
    }
}

/// User-facing output of the predict/transform family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Output {
    Labels(Vec<ClassLabel>),
    Values(Vec<f64>),
    Clusters(Vec<usize>),
    Probabilities(ProbabilityMatrix),
    Collection(Collection),
}

impl Output {
    pub fn len(&self) -> usize {
        match self {
            Output::Labels(l) => l.len(),
            Output::Values(v) => v.len(),
            Output::Clusters(c) => c.len(),
            Output::Probabilities(p) => p.rows.len(),
            Output::Collection(Collection::Dense(d)) => d.n_cases(),
            Output::Collection(Collection::Ragged(r)) => r.n_cases(),
            Output::Collection(Collection::Tabular(t)) => {
                let mut seen: Vec<&str> = t.rows().iter().map(|r| r.instance.as_str()).collect();
                seen.sort_unstable();
                seen.dedup();
                seen.len()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
