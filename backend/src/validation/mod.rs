//! JSON Schema validation for the input document.
//!
//! The dataset schema is embedded at compile time from
//! `schemas/oil-dataset.json` and checked with JSON Schema Draft 7.
//!
//! Validation checks the document's shape only: tables must be arrays of
//! objects, country names strings, numeric fields numbers or `null`.
//! Missing fields are accepted (they count as 0 downstream).
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use oilboard::validation::{is_valid_dataset, validate_dataset};
//!
//! let doc = json!({
//!     "paises": ["Noruega"],
//!     "datos": { "exportaciones": [{ "pais": "Noruega", "produccion_bbl_d": 1800000 }] }
//! });
//! assert!(is_valid_dataset(&doc));
//!
//! let bad = json!({ "datos": { "productores": "none" } });
//! assert!(validate_dataset(&bad).is_err());
//! ```

use once_cell::sync::Lazy;
use serde_json::Value;

static DATASET_SCHEMA: Lazy<Result<Value, String>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../schemas/oil-dataset.json"))
        .map_err(|e| format!("Invalid embedded schema: {}", e))
});

/// Validate a JSON value against a schema.
///
/// # Returns
/// * `Ok(())` if valid
/// * `Err(Vec<String>)` with every error if invalid
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Quick true/false check against a schema.
pub fn is_valid(schema: &Value, data: &Value) -> bool {
    jsonschema::draft7::is_valid(schema, data)
}

/// The embedded dataset schema.
pub fn dataset_schema() -> Result<&'static Value, String> {
    let schema: &'static Result<Value, String> = &DATASET_SCHEMA;
    schema.as_ref().map_err(|e| e.clone())
}

/// Validate an input document against the dataset schema.
pub fn validate_dataset(data: &Value) -> Result<(), Vec<String>> {
    let schema = dataset_schema().map_err(|e| vec![e])?;
    validate(schema, data)
}

/// Quick check against the dataset schema.
pub fn is_valid_dataset(data: &Value) -> bool {
    dataset_schema().is_ok_and(|schema| is_valid(schema, data))
}
