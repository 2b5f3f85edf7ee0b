//! Unclassified user input.

use serde::{Deserialize, Serialize};

use crate::model::collection::{
    Collection, DenseCollection, RaggedCollection, TabularCollection, TabularRow,
};

/// Collection data as handed in by a caller, before layout detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawCollection {
    /// Flat buffer with shape (instances, channels, time points).
    Array3 { shape: [usize; 3], values: Vec<f64> },
    /// Flat univariate buffer with shape (instances, time points).
    Array2 { shape: [usize; 2], values: Vec<f64> },
    /// One channels x time block per instance.
    Nested { instances: Vec<Vec<Vec<f64>>> },
    /// One time x channels block per instance.
    NestedTimeMajor { instances: Vec<Vec<Vec<f64>>> },
    /// Rows of a labeled table.
    Table {
        n_timepoints: usize,
        rows: Vec<TabularRow>,
    },
    /// Already typed collection; still validated.
    Typed { collection: Collection },
}

impl RawCollection {
    pub fn array3(n_cases: usize, n_channels: usize, n_timepoints: usize, values: Vec<f64>) -> Self {
        RawCollection::Array3 {
            shape: [n_cases, n_channels, n_timepoints],
            values,
        }
    }

    pub fn array2(n_cases: usize, n_timepoints: usize, values: Vec<f64>) -> Self {
        RawCollection::Array2 {
            shape: [n_cases, n_timepoints],
            values,
        }
    }

    pub fn nested(instances: Vec<Vec<Vec<f64>>>) -> Self {
        RawCollection::Nested { instances }
    }

    pub fn nested_time_major(instances: Vec<Vec<Vec<f64>>>) -> Self {
        RawCollection::NestedTimeMajor { instances }
    }

    pub fn table(n_timepoints: usize, rows: Vec<TabularRow>) -> Self {
        RawCollection::Table { n_timepoints, rows }
    }

    /// One univariate series per instance, lengths may differ.
    pub fn univariate(series: Vec<Vec<f64>>) -> Self {
        RawCollection::Nested {
            instances: series.into_iter().map(|s| vec![s]).collect(),
        }
    }

    /// Short name of the input kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            RawCollection::Array3 { .. } => "3D buffer",
            RawCollection::Array2 { .. } => "2D buffer",
            RawCollection::Nested { .. } => "nested list",
            RawCollection::NestedTimeMajor { .. } => "time-major nested list",
            RawCollection::Table { .. } => "table",
            RawCollection::Typed { .. } => "typed collection",
        }
    }
}

impl From<Collection> for RawCollection {
    fn from(collection: Collection) -> Self {
        RawCollection::Typed { collection }
    }
}

impl From<DenseCollection> for RawCollection {
    fn from(value: DenseCollection) -> Self {
        Collection::Dense(value).into()
    }
}

impl From<RaggedCollection> for RawCollection {
    fn from(value: RaggedCollection) -> Self {
        Collection::Ragged(value).into()
    }
}

impl From<TabularCollection> for RawCollection {
    fn from(value: TabularCollection) -> Self {
        Collection::Tabular(value).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_univariate_wraps_one_channel() {
        let raw = RawCollection::univariate(vec![vec![1.0, 2.0], vec![3.0]]);
        match raw {
            RawCollection::Nested { instances } => {
                assert_eq!(instances.len(), 2);
                assert!(instances.iter().all(|i| i.len() == 1));
            }
            other => panic!("Expected nested input, got {}", other.kind()),
        }
    }

    #[test]
    fn test_raw_json_shape() {
        let raw = RawCollection::array2(1, 2, vec![0.5, 1.5]);
        let json = serde_json::to_value(&raw).unwrap();
        assert_eq!(json["kind"], "array2");
        assert_eq!(json["shape"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_typed_json_rejects_short_buffer() {
        let json = r#"{"kind":"typed","collection":{"layout":"dense","n_cases":3,"n_channels":1,"n_timepoints":4,"values":[1.0]}}"#;
        let err = serde_json::from_str::<RawCollection>(json).unwrap_err();
        assert!(err.to_string().contains("needs 12"), "{}", err);
    }

    #[test]
    fn test_typed_json_loads_valid_collection() {
        let json = r#"{"kind":"typed","collection":{"layout":"ragged","instances":[{"n_channels":1,"n_timepoints":2,"values":[1.0,2.0]}]}}"#;
        let raw: RawCollection = serde_json::from_str(json).unwrap();
        assert_eq!(raw.kind(), "typed collection");
    }
}
