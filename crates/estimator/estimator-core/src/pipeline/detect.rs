//! Layout detection and structural validation.

use std::collections::HashMap;

use estimator_spi::{
    Collection, CollectionLayout, CollectionMetadata, DenseCollection, EstimatorError,
    InstanceView, RaggedCollection, RawCollection, Result, Series, TabularCollection,
    TabularRow,
};

/// A raw input classified into one layout, with its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Detected {
    pub collection: Collection,
    pub metadata: CollectionMetadata,
}

/// Classify raw input and check that it is structurally sound.
///
/// Fails with `InvalidInputType` when the input matches no layout and with
/// `InvalidInputShape` when it is empty or its channel counts disagree.
pub fn detect(raw: &RawCollection) -> Result<Detected> {
    let collection = match raw {
        RawCollection::Array3 { shape, values } => Collection::Dense(DenseCollection::new(
            shape[0],
            shape[1],
            shape[2],
            values.clone(),
        )?),
        RawCollection::Array2 { shape, values } => {
            Collection::Dense(DenseCollection::new(shape[0], 1, shape[1], values.clone())?)
        }
        RawCollection::Nested { instances } => Collection::Ragged(from_channel_major(instances)?),
        RawCollection::NestedTimeMajor { instances } => {
            Collection::Ragged(from_time_major(instances)?)
        }
        RawCollection::Table { n_timepoints, rows } => {
            Collection::Tabular(TabularCollection::new(*n_timepoints, rows.clone()))
        }
        RawCollection::Typed { collection } => collection.clone(),
    };
    let metadata = inspect(&collection)?;
    tracing::debug!(
        input = raw.kind(),
        layout = %metadata.layout,
        n_cases = metadata.n_cases,
        n_channels = metadata.n_channels,
        "input layout detected"
    );
    Ok(Detected {
        collection,
        metadata,
    })
}

/// Layout of a raw input.
pub fn detect_layout(raw: &RawCollection) -> Result<CollectionLayout> {
    detect(raw).map(|detected| detected.metadata.layout)
}

/// Structural metadata of a typed collection.
pub fn inspect(collection: &Collection) -> Result<CollectionMetadata> {
    match collection {
        Collection::Dense(dense) => inspect_dense(dense),
        Collection::Ragged(ragged) => {
            inspect_instances(ragged.instances(), CollectionLayout::Ragged)
        }
        Collection::Tabular(table) => {
            let grouped = group_table(table)?;
            inspect_instances(grouped.instances(), CollectionLayout::LabeledTabular)
        }
    }
}

fn empty_collection() -> EstimatorError {
    EstimatorError::shape("at least one instance", "an empty collection")
}

fn inspect_dense(dense: &DenseCollection) -> Result<CollectionMetadata> {
    let (n_cases, n_channels, n_timepoints) = dense.shape();
    if n_cases == 0 {
        return Err(empty_collection());
    }
    if n_channels == 0 {
        return Err(EstimatorError::shape("at least one channel", "0 channels"));
    }
    if n_timepoints == 0 {
        return Err(EstimatorError::shape("at least one time point", "series of length 0"));
    }
    Ok(CollectionMetadata {
        n_cases,
        n_channels,
        min_length: n_timepoints,
        max_length: n_timepoints,
        has_missing: dense.values().iter().any(|v| v.is_nan()),
        layout: CollectionLayout::EqualLengthDense,
    })
}

fn inspect_instances<'a>(
    instances: impl Iterator<Item = InstanceView<'a>>,
    layout: CollectionLayout,
) -> Result<CollectionMetadata> {
    let mut metadata: Option<CollectionMetadata> = None;
    for (index, instance) in instances.enumerate() {
        if instance.n_channels() == 0 {
            return Err(EstimatorError::shape(
                "at least one channel per instance",
                format!("0 channels in instance {}", index),
            ));
        }
        if instance.n_timepoints() == 0 {
            return Err(EstimatorError::shape(
                "at least one time point per instance",
                format!("instance {} has length 0", index),
            ));
        }
        match metadata.as_mut() {
            None => {
                metadata = Some(CollectionMetadata {
                    n_cases: 1,
                    n_channels: instance.n_channels(),
                    min_length: instance.n_timepoints(),
                    max_length: instance.n_timepoints(),
                    has_missing: instance.has_missing(),
                    layout,
                })
            }
            Some(meta) => {
                if instance.n_channels() != meta.n_channels {
                    return Err(EstimatorError::shape(
                        format!("{} channel(s) per instance", meta.n_channels),
                        format!("{} channel(s) in instance {}", instance.n_channels(), index),
                    ));
                }
                meta.n_cases += 1;
                meta.min_length = meta.min_length.min(instance.n_timepoints());
                meta.max_length = meta.max_length.max(instance.n_timepoints());
                meta.has_missing |= instance.has_missing();
            }
        }
    }
    metadata.ok_or_else(empty_collection)
}

fn from_channel_major(instances: &[Vec<Vec<f64>>]) -> Result<RaggedCollection> {
    instances
        .iter()
        .enumerate()
        .map(|(index, channels)| {
            Series::from_channels(channels.clone()).map_err(|_| {
                EstimatorError::InvalidInputType(format!(
                    "instance {} is not a channels x time block: channel lengths differ",
                    index
                ))
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(RaggedCollection::new)
}

fn from_time_major(instances: &[Vec<Vec<f64>>]) -> Result<RaggedCollection> {
    let mut series = Vec::with_capacity(instances.len());
    for (index, rows) in instances.iter().enumerate() {
        if rows.is_empty() {
            return Err(EstimatorError::shape(
                "at least one time point per instance",
                format!("instance {} has length 0", index),
            ));
        }
        let n_channels = rows[0].len();
        if rows.iter().any(|row| row.len() != n_channels) {
            return Err(EstimatorError::InvalidInputType(format!(
                "instance {} is not a time x channels block: row widths differ",
                index
            )));
        }
        let channels = (0..n_channels)
            .map(|c| rows.iter().map(|row| row[c]).collect())
            .collect();
        series.push(Series::from_channels(channels)?);
    }
    Ok(RaggedCollection::new(series))
}

/// Group table rows into one block per instance.
///
/// Instances keep their order of first appearance and channels follow the
/// order of the first instance.
pub(crate) fn group_table(table: &TabularCollection) -> Result<RaggedCollection> {
    if table.rows().is_empty() {
        return Err(empty_collection());
    }
    if table.n_timepoints() == 0 {
        return Err(EstimatorError::shape(
            "at least one time point",
            "a table with 0 value columns",
        ));
    }
    if let Some(row) = table
        .rows()
        .iter()
        .find(|row| row.values.len() != table.n_timepoints())
    {
        return Err(EstimatorError::InvalidInputType(format!(
            "table row ('{}', '{}') has {} values, expected {} columns",
            row.instance,
            row.channel,
            row.values.len(),
            table.n_timepoints()
        )));
    }

    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&TabularRow>> = HashMap::new();
    for row in table.rows() {
        let group = groups.entry(row.instance.as_str()).or_insert_with(|| {
            order.push(row.instance.as_str());
            Vec::new()
        });
        if group.iter().any(|seen| seen.channel == row.channel) {
            return Err(EstimatorError::shape(
                "unique (instance, channel) pairs",
                format!(
                    "channel '{}' repeated in instance '{}'",
                    row.channel, row.instance
                ),
            ));
        }
        group.push(row);
    }

    let channel_order: Vec<&str> = groups[order[0]]
        .iter()
        .map(|row| row.channel.as_str())
        .collect();
    let mut series = Vec::with_capacity(order.len());
    for instance in &order {
        let rows = &groups[instance];
        let mut channels = Vec::with_capacity(channel_order.len());
        for name in &channel_order {
            match rows.iter().find(|row| row.channel == *name) {
                Some(row) => channels.push(row.values.clone()),
                None => break,
            }
        }
        if channels.len() != channel_order.len() || rows.len() != channel_order.len() {
            let found: Vec<&str> = rows.iter().map(|row| row.channel.as_str()).collect();
            return Err(EstimatorError::shape(
                format!("channels [{}] in every instance", channel_order.join(", ")),
                format!("instance '{}' with channels [{}]", instance, found.join(", ")),
            ));
        }
        series.push(Series::from_channels(channels)?);
    }
    Ok(RaggedCollection::new(series))
}
