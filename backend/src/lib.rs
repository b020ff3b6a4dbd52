//! # Oilboard - filtering engine for the global oil-production dashboard
//!
//! Oilboard turns a static oil-statistics document (50 countries) into the
//! collections each dashboard chart renders, for whatever filters the user
//! has selected.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────────┐     ┌─────────────┐
//! │  JSON file  │────▶│   Dataset   │────▶│      Engine      │────▶│   Charts    │
//! │ (ETL output)│     │ (validated) │     │ filter/sort/top-N│     │ (external)  │
//! └─────────────┘     └─────────────┘     └──────────────────┘     └─────────────┘
//!                                                  ▲
//!                                         ┌────────┴────────┐
//!                                         │     Catalog     │
//!                                         │ regions, labels │
//!                                         └─────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use oilboard::{dataset, filter_producers, Catalog, FilterCriteria, ProducerSortKey, TopRange};
//!
//! let data = dataset::load_or_empty("public/oil_data.json");
//! let criteria = FilterCriteria::new()
//!     .with_top_range(TopRange::Top10)
//!     .with_regions(["Medio Oriente"]);
//!
//! let top = filter_producers(&data.data.producers, &criteria, ProducerSortKey::ProvenReserves, Catalog::builtin_ref());
//! for p in top {
//!     println!("{}: {:?}", p.country, p.proven_reserves);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Boundary error types
//! - [`models`] - Records, dataset document and filter criteria
//! - [`catalog`] - Region table, category labels, fracking set
//! - [`engine`] - Filter-sort-limit engine and dashboard view
//! - [`dataset`] - Document loading with empty-document fallback
//! - [`validation`] - Dataset JSON Schema validation
//! - [`stats`] - Header statistics, production shares, number formatting
//! - [`export`] - CSV and JSON output
//! - [`config`] - Paths from the environment
//! - [`logs`] - User-facing progress logs

// Core modules
pub mod error;
pub mod models;
pub mod catalog;

// Engine
pub mod engine;

// Input
pub mod dataset;
pub mod validation;

// Output
pub mod export;
pub mod stats;

// Ambient
pub mod config;
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CatalogError, DatasetError, ExportError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    DatasetTables,
    ExportRecord,
    FilterCriteria,
    GdpCategory,
    OilDataset,
    ProducerRecord,
    TopRange,
};

// =============================================================================
// Re-exports - Catalog
// =============================================================================

pub use catalog::{Catalog, CategoryLabel, Region};

// =============================================================================
// Re-exports - Engine
// =============================================================================

pub use engine::{
    apply,
    build_dashboard,
    filter_exports,
    filter_producers,
    fracking_subset,
    DashboardView,
    ExportSortKey,
    ProducerSortKey,
    Record,
};

// =============================================================================
// Re-exports - Stats
// =============================================================================

pub use stats::{
    format_decimal,
    format_number,
    has_missing_data,
    production_shares,
    summarize,
    Share,
    Summary,
    TopProducer,
};

// =============================================================================
// Re-exports - Config & Output
// =============================================================================

pub use config::Config;
pub use export::OutputFormat;
