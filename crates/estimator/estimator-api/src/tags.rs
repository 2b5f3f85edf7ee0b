//! Tag set construction and JSON loading.

use estimator_spi::{
    CollectionLayout, EstimatorError, EstimatorTags, LayoutSet, OutputContract, Result, TagKey,
    TagValue,
};
use serde_json::Value;

/// Builder for EstimatorTags.
///
/// Starts from the dense layout with every optional capability off, the
/// defaults of a plain collection estimator.
#[derive(Debug, Clone)]
pub struct EstimatorTagsBuilder {
    tags: EstimatorTags,
}

impl EstimatorTagsBuilder {
    pub fn new(output_contract: OutputContract) -> Self {
        Self {
            tags: EstimatorTags::new(
                LayoutSet::only(CollectionLayout::EqualLengthDense),
                output_contract,
            ),
        }
    }

    /// Classifier defaults: target required, probabilities and labels.
    pub fn classifier() -> Self {
        Self::new(OutputContract::ProbabilitiesAndLabels).fit_requires_y(true)
    }

    /// Regressor defaults: target required, one value per instance.
    pub fn regressor() -> Self {
        Self::new(OutputContract::Labels).fit_requires_y(true)
    }

    /// Clusterer defaults: no target, one cluster id per instance.
    pub fn clusterer() -> Self {
        Self::new(OutputContract::Labels)
    }

    pub fn transformer() -> Self {
        Self::new(OutputContract::TransformedCollection)
    }

    /// Replace the supported layouts.
    pub fn layouts(mut self, layouts: LayoutSet) -> Self {
        self.tags.input_layouts_supported = layouts;
        self
    }

    /// Add one supported layout.
    pub fn layout(mut self, layout: CollectionLayout) -> Self {
        self.tags.input_layouts_supported.insert(layout);
        self
    }

    pub fn multivariate(mut self, supported: bool) -> Self {
        self.tags.multivariate_supported = supported;
        self
    }

    pub fn unequal_length(mut self, supported: bool) -> Self {
        self.tags.unequal_length_supported = supported;
        self
    }

    pub fn missing_values(mut self, supported: bool) -> Self {
        self.tags.missing_values_supported = supported;
        self
    }

    pub fn output_contract(mut self, contract: OutputContract) -> Self {
        self.tags.output_contract = contract;
        self
    }

    pub fn fit_requires_y(mut self, required: bool) -> Self {
        self.tags.fit_requires_y = required;
        self
    }

    pub fn multithreading(mut self, supported: bool) -> Self {
        self.tags.multithreading_supported = supported;
        self
    }

    pub fn non_deterministic(mut self, flag: bool) -> Self {
        self.tags.non_deterministic = flag;
        self
    }

    pub fn algorithm_type(mut self, algorithm_type: &str) -> Self {
        self.tags.algorithm_type = Some(algorithm_type.to_string());
        self
    }

    /// The tag set without validation; façades validate on construction.
    pub fn into_tags(self) -> EstimatorTags {
        self.tags
    }

    /// Build and validate the tag set.
    pub fn build(self) -> Result<EstimatorTags> {
        self.tags.validate()?;
        Ok(self.tags)
    }
}

/// Parse the JSON value of one tag, checking its kind against the key.
pub fn tag_value_from_json(key: TagKey, value: &Value) -> Result<TagValue> {
    let mismatch = || EstimatorError::TagTypeMismatch {
        key,
        expected: key.value_kind(),
        got: value.to_string(),
    };
    let parsed = match key {
        TagKey::InputLayoutsSupported => {
            TagValue::Layouts(serde_json::from_value(value.clone()).map_err(|_| mismatch())?)
        }
        TagKey::OutputContract => {
            TagValue::Contract(serde_json::from_value(value.clone()).map_err(|_| mismatch())?)
        }
        TagKey::AlgorithmType => match value {
            Value::Null => TagValue::Text(None),
            Value::String(s) => TagValue::Text(Some(s.clone())),
            _ => return Err(mismatch()),
        },
        _ => TagValue::Bool(value.as_bool().ok_or_else(mismatch)?),
    };
    Ok(parsed)
}

const REQUIRED_KEYS: [TagKey; 6] = [
    TagKey::InputLayoutsSupported,
    TagKey::MultivariateSupported,
    TagKey::UnequalLengthSupported,
    TagKey::MissingValuesSupported,
    TagKey::OutputContract,
    TagKey::FitRequiresY,
];

/// Load a complete tag set from a JSON object.
///
/// Unknown keys fail with `UnknownTag`, values of the wrong kind with
/// `TagTypeMismatch`, missing required keys and inconsistent sets with
/// `InvalidTags`.
pub fn tags_from_json(json: &str) -> Result<EstimatorTags> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| EstimatorError::InvalidTags(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| EstimatorError::InvalidTags("tag set must be a JSON object".to_string()))?;

    let mut entries = Vec::with_capacity(object.len());
    for (name, raw) in object {
        let key: TagKey = name.parse()?;
        entries.push((key, tag_value_from_json(key, raw)?));
    }
    if let Some(missing) = REQUIRED_KEYS
        .iter()
        .find(|required| !entries.iter().any(|(key, _)| key == *required))
    {
        return Err(EstimatorError::InvalidTags(format!(
            "missing required tag '{}'",
            missing
        )));
    }

    let mut tags = EstimatorTags::new(LayoutSet::new(), OutputContract::Labels);
    for (key, value) in entries {
        tags.set(key, value)?;
    }
    tags.validate()?;
    Ok(tags)
}

/// Serialize a tag set to pretty JSON.
pub fn tags_to_json(tags: &EstimatorTags) -> Result<String> {
    serde_json::to_string_pretty(tags).map_err(|e| EstimatorError::InvalidTags(e.to_string()))
}
