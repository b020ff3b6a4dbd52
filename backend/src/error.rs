//! Error types for the Oilboard data layer.
//!
//! The filter engine and the lookup tables are total: they never fail.
//! Errors only exist at the boundaries where files are read or written:
//!
//! - [`DatasetError`] - Loading and validating the input document
//! - [`CatalogError`] - Loading a lookup-table override file
//! - [`ExportError`] - Writing engine output as CSV or JSON
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Dataset Errors
// =============================================================================

/// Errors while loading the input document.
///
/// Callers that want the dashboard's "empty document" recovery should use
/// [`crate::dataset::load_or_empty`] instead of handling these.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Failed to read the file.
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON, or does not deserialize.
    #[error("Invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document does not match the dataset schema.
    #[error("Dataset failed schema validation: {errors:?}")]
    Schema { errors: Vec<String> },
}

// =============================================================================
// Catalog Errors
// =============================================================================

/// Errors while loading a catalog override file.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to read the file.
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON.
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The catalog content is inconsistent.
    #[error("Invalid catalog: {0}")]
    Invalid(String),
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors while serializing engine output.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV output was not valid UTF-8.
    #[error("CSV output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for dataset operations.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
