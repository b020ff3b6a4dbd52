//! Filter-sort-limit engine.
//!
//! - Record: the trait both record shapes implement, and their sort keys
//! - Filter: the generic engine and its per-table entry points
//! - Dashboard: the per-chart invocations bundled into one view

pub mod dashboard;
pub mod filter;
pub mod record;

pub use dashboard::{build as build_dashboard, fracking_subset, DashboardView};
pub use filter::{apply, filter_exports, filter_producers};
pub use record::{ExportSortKey, ProducerSortKey, Record};
