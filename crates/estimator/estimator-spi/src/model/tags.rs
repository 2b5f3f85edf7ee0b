//! Capability tags.
//!
//! Tags are declarative metadata attached to an estimator type. They are a
//! typed struct with one field per capability, so typed code cannot ask for a
//! tag that does not exist. [`TagKey`] and [`TagValue`] provide the dynamic
//! view used by `get_tag`/`set_tag` and by configuration files.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EstimatorError, Result};
use crate::model::layout::{CollectionLayout, LayoutSet};

/// What the predict/transform family returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputContract {
    /// One label or value per instance.
    Labels,
    /// Labels plus a row-stochastic probability matrix.
    ProbabilitiesAndLabels,
    /// A new, well-formed collection.
    TransformedCollection,
}

impl fmt::Display for OutputContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutputContract::Labels => "labels",
            OutputContract::ProbabilitiesAndLabels => "probabilities-and-labels",
            OutputContract::TransformedCollection => "transformed-collection",
        };
        f.write_str(s)
    }
}

/// The fixed tag vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKey {
    InputLayoutsSupported,
    MultivariateSupported,
    UnequalLengthSupported,
    MissingValuesSupported,
    OutputContract,
    FitRequiresY,
    MultithreadingSupported,
    NonDeterministic,
    AlgorithmType,
}

impl TagKey {
    pub const ALL: [TagKey; 9] = [
        TagKey::InputLayoutsSupported,
        TagKey::MultivariateSupported,
        TagKey::UnequalLengthSupported,
        TagKey::MissingValuesSupported,
        TagKey::OutputContract,
        TagKey::FitRequiresY,
        TagKey::MultithreadingSupported,
        TagKey::NonDeterministic,
        TagKey::AlgorithmType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TagKey::InputLayoutsSupported => "input_layouts_supported",
            TagKey::MultivariateSupported => "multivariate_supported",
            TagKey::UnequalLengthSupported => "unequal_length_supported",
            TagKey::MissingValuesSupported => "missing_values_supported",
            TagKey::OutputContract => "output_contract",
            TagKey::FitRequiresY => "fit_requires_y",
            TagKey::MultithreadingSupported => "multithreading_supported",
            TagKey::NonDeterministic => "non_deterministic",
            TagKey::AlgorithmType => "algorithm_type",
        }
    }

    /// Name of the value kind this key holds.
    pub fn value_kind(&self) -> &'static str {
        match self {
            TagKey::InputLayoutsSupported => "layout set",
            TagKey::OutputContract => "output contract",
            TagKey::AlgorithmType => "text",
            _ => "bool",
        }
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagKey {
    type Err = EstimatorError;

    fn from_str(s: &str) -> Result<Self> {
        TagKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| EstimatorError::UnknownTag(s.to_string()))
    }
}

/// Dynamic value of a single tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Bool(bool),
    Layouts(LayoutSet),
    Contract(OutputContract),
    Text(Option<String>),
}

impl TagValue {
    fn describe(&self) -> String {
        match self {
            TagValue::Bool(b) => b.to_string(),
            TagValue::Layouts(set) => format!("[{}]", set),
            TagValue::Contract(c) => c.to_string(),
            TagValue::Text(Some(t)) => format!("'{}'", t),
            TagValue::Text(None) => "none".to_string(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TagValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<bool> for TagValue {
    fn from(value: bool) -> Self {
        TagValue::Bool(value)
    }
}

impl From<LayoutSet> for TagValue {
    fn from(value: LayoutSet) -> Self {
        TagValue::Layouts(value)
    }
}

impl From<OutputContract> for TagValue {
    fn from(value: OutputContract) -> Self {
        TagValue::Contract(value)
    }
}

/// Complete tag set of an estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorTags {
    pub input_layouts_supported: LayoutSet,
    pub multivariate_supported: bool,
    pub unequal_length_supported: bool,
    pub missing_values_supported: bool,
    pub output_contract: OutputContract,
    pub fit_requires_y: bool,
    #[serde(default)]
    pub multithreading_supported: bool,
    #[serde(default)]
    pub non_deterministic: bool,
    #[serde(default)]
    pub algorithm_type: Option<String>,
}

impl EstimatorTags {
    /// Tag set with the given layouts and contract and every optional
    /// capability switched off.
    pub fn new(input_layouts_supported: LayoutSet, output_contract: OutputContract) -> Self {
        Self {
            input_layouts_supported,
            multivariate_supported: false,
            unequal_length_supported: false,
            missing_values_supported: false,
            output_contract,
            fit_requires_y: false,
            multithreading_supported: false,
            non_deterministic: false,
            algorithm_type: None,
        }
    }

    pub fn get(&self, key: TagKey) -> TagValue {
        match key {
            TagKey::InputLayoutsSupported => TagValue::Layouts(self.input_layouts_supported.clone()),
            TagKey::MultivariateSupported => TagValue::Bool(self.multivariate_supported),
            TagKey::UnequalLengthSupported => TagValue::Bool(self.unequal_length_supported),
            TagKey::MissingValuesSupported => TagValue::Bool(self.missing_values_supported),
            TagKey::OutputContract => TagValue::Contract(self.output_contract),
            TagKey::FitRequiresY => TagValue::Bool(self.fit_requires_y),
            TagKey::MultithreadingSupported => TagValue::Bool(self.multithreading_supported),
            TagKey::NonDeterministic => TagValue::Bool(self.non_deterministic),
            TagKey::AlgorithmType => TagValue::Text(self.algorithm_type.clone()),
        }
    }

    /// Set one tag, checking only that the value kind matches the key.
    pub fn set(&mut self, key: TagKey, value: TagValue) -> Result<()> {
        match (key, value) {
            (TagKey::InputLayoutsSupported, TagValue::Layouts(set)) => {
                self.input_layouts_supported = set
            }
            (TagKey::MultivariateSupported, TagValue::Bool(b)) => self.multivariate_supported = b,
            (TagKey::UnequalLengthSupported, TagValue::Bool(b)) => {
                self.unequal_length_supported = b
            }
            (TagKey::MissingValuesSupported, TagValue::Bool(b)) => {
                self.missing_values_supported = b
            }
            (TagKey::OutputContract, TagValue::Contract(c)) => self.output_contract = c,
            (TagKey::FitRequiresY, TagValue::Bool(b)) => self.fit_requires_y = b,
            (TagKey::MultithreadingSupported, TagValue::Bool(b)) => {
                self.multithreading_supported = b
            }
            (TagKey::NonDeterministic, TagValue::Bool(b)) => self.non_deterministic = b,
            (TagKey::AlgorithmType, TagValue::Text(t)) => self.algorithm_type = t,
            (key, other) => {
                return Err(EstimatorError::TagTypeMismatch {
                    key,
                    expected: key.value_kind(),
                    got: other.describe(),
                })
            }
        }
        Ok(())
    }

    /// Whether the tag `key` satisfies `required`.
    ///
    /// Layout requirements are satisfied by any superset; every other kind
    /// compares equal.
    pub fn satisfies(&self, key: TagKey, required: &TagValue) -> bool {
        match (self.get(key), required) {
            (TagValue::Layouts(have), TagValue::Layouts(need)) => need.is_subset(&have),
            (have, need) => &have == need,
        }
    }

    pub fn supports_layout(&self, layout: CollectionLayout) -> bool {
        self.input_layouts_supported.contains(layout)
    }

    /// Layout the concrete algorithm is written against.
    ///
    /// Ragged-capable estimators always receive the ragged form.
    pub fn canonical_layout(&self) -> CollectionLayout {
        if self.supports_layout(CollectionLayout::Ragged) {
            CollectionLayout::Ragged
        } else {
            CollectionLayout::EqualLengthDense
        }
    }

    /// Check the tag set for internal consistency.
    pub fn validate(&self) -> Result<()> {
        let layouts = &self.input_layouts_supported;
        if layouts.is_empty() {
            return Err(EstimatorError::InvalidTags(
                "input_layouts_supported must name at least one layout".to_string(),
            ));
        }
        if !layouts.contains(CollectionLayout::Ragged)
            && !layouts.contains(CollectionLayout::EqualLengthDense)
        {
            return Err(EstimatorError::InvalidTags(format!(
                "no canonical layout: [{}] supports neither ragged nor equal-length-dense",
                layouts
            )));
        }
        if self.unequal_length_supported && !layouts.contains(CollectionLayout::Ragged) {
            return Err(EstimatorError::InvalidTags(
                "unequal_length_supported requires ragged in input_layouts_supported".to_string(),
            ));
        }
        Ok(())
    }
}
