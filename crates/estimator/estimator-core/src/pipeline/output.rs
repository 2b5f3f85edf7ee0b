//! Output contract checks.

use estimator_spi::{
    ClassLabel, EstimatorError, EstimatorTags, Output, OutputContract, ProbabilityMatrix,
    RawOutput, Result,
};

use super::detect::inspect;

/// What the output of one predict/transform call is checked against.
#[derive(Debug, Clone, Copy)]
pub struct OutputContext<'a> {
    /// Instances in the input.
    pub n_instances: usize,
    /// Fitted classes; probability columns and label decoding use these.
    pub classes: Option<&'a [ClassLabel]>,
    /// Allowed deviation of a row sum from 1.0.
    pub tolerance: f64,
}

fn violation(message: String) -> EstimatorError {
    EstimatorError::OutputContract(message)
}

fn check_len(kind: &str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(violation(format!(
            "{} {} for {} instance(s)",
            got, kind, expected
        )));
    }
    Ok(())
}

/// Check algorithm output against the declared contract and turn it into
/// the user-facing shape.
pub fn convert_output(
    raw: RawOutput,
    tags: &EstimatorTags,
    context: &OutputContext<'_>,
) -> Result<Output> {
    let contract = tags.output_contract;
    let allowed = match (&raw, contract) {
        (RawOutput::Collection(_), OutputContract::TransformedCollection) => true,
        (RawOutput::Collection(_), _) | (_, OutputContract::TransformedCollection) => false,
        (RawOutput::Probabilities(_), OutputContract::Labels) => false,
        _ => true,
    };
    if !allowed {
        return Err(violation(format!(
            "{} returned where the contract is {}",
            raw.kind(),
            contract
        )));
    }

    match raw {
        RawOutput::ClassIndices(indices) => {
            check_len("predictions", indices.len(), context.n_instances)?;
            let classes = context
                .classes
                .ok_or_else(|| violation("class indices without fitted classes".to_string()))?;
            let labels = indices
                .into_iter()
                .map(|index| {
                    classes.get(index).cloned().ok_or_else(|| {
                        violation(format!(
                            "predicted class index {} outside the {} fitted class(es)",
                            index,
                            classes.len()
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Output::Labels(labels))
        }
        RawOutput::Values(values) => {
            check_len("predictions", values.len(), context.n_instances)?;
            Ok(Output::Values(values))
        }
        RawOutput::ClusterIds(ids) => {
            check_len("predictions", ids.len(), context.n_instances)?;
            Ok(Output::Clusters(ids))
        }
        RawOutput::Probabilities(rows) => {
            check_len("probability rows", rows.len(), context.n_instances)?;
            let columns: Vec<String> = match context.classes {
                Some(classes) => classes.to_vec(),
                None => {
                    let width = rows.first().map_or(0, Vec::len);
                    (0..width).map(|c| c.to_string()).collect()
                }
            };
            for (index, row) in rows.iter().enumerate() {
                check_probability_row(index, row, columns.len(), context.tolerance)?;
            }
            Ok(Output::Probabilities(ProbabilityMatrix { columns, rows }))
        }
        RawOutput::Collection(collection) => {
            let metadata = inspect(&collection)
                .map_err(|e| violation(format!("transformed collection is malformed: {}", e)))?;
            check_len("transformed instances", metadata.n_cases, context.n_instances)?;
            Ok(Output::Collection(collection))
        }
    }
}

fn check_probability_row(index: usize, row: &[f64], width: usize, tolerance: f64) -> Result<()> {
    if row.len() != width {
        return Err(violation(format!(
            "probability row {} has {} column(s), expected {}",
            index,
            row.len(),
            width
        )));
    }
    if let Some(p) = row
        .iter()
        .find(|p| !p.is_finite() || **p < -tolerance || **p > 1.0 + tolerance)
    {
        return Err(violation(format!(
            "probability row {} holds {} outside [0, 1]",
            index, p
        )));
    }
    let sum: f64 = row.iter().sum();
    if (sum - 1.0).abs() > tolerance {
        return Err(violation(format!(
            "probability row {} sums to {}",
            index, sum
        )));
    }
    Ok(())
}
