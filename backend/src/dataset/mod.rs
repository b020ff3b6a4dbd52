//! Input document loading.
//!
//! The dataset is produced by an external ETL step and read once at
//! startup. [`load`] reports failures; [`load_or_empty`] is what the
//! dashboard uses, substituting an empty document so the engine always
//! has well-typed input.

use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::error::{DatasetError, DatasetResult};
use crate::logs::{log_info, log_success, log_warning};
use crate::models::OilDataset;
use crate::validation::validate_dataset;

/// Read, validate and deserialize a dataset file.
pub fn load<P: AsRef<Path>>(path: P) -> DatasetResult<OilDataset> {
    let content = fs::read_to_string(path.as_ref())?;
    parse_dataset(&content)
}

/// Validate and deserialize a dataset from JSON text.
pub fn parse_dataset(content: &str) -> DatasetResult<OilDataset> {
    let value: Value = serde_json::from_str(content)?;
    from_value(value)
}

/// Validate and deserialize an already-parsed document.
pub fn from_value(value: Value) -> DatasetResult<OilDataset> {
    validate_dataset(&value).map_err(|errors| DatasetError::Schema { errors })?;
    Ok(serde_json::from_value(value)?)
}

/// Load a dataset, falling back to [`OilDataset::empty`] on any failure.
pub fn load_or_empty<P: AsRef<Path>>(path: P) -> OilDataset {
    let path = path.as_ref();
    log_info(format!("Loading dataset: {}", path.display()));

    match load(path) {
        Ok(dataset) => {
            log_success(format!(
                "Loaded {} exports, {} producers, {} countries",
                dataset.data.exports.len(),
                dataset.data.producers.len(),
                dataset.countries.len()
            ));
            dataset
        }
        Err(e) => {
            log_warning(format!("Using empty dataset: {}", e));
            OilDataset::empty()
        }
    }
}
