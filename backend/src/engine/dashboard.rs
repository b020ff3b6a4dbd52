//! Per-chart engine invocations bundled into one view.
//!
//! Every chart on the dashboard runs the engine with the same criteria and
//! its own sort key, so Top-N always means "top N for this chart's metric".
//!
//! | Series                   | Table     | Sort key          |
//! |--------------------------|-----------|-------------------|
//! | `exportsByProduction`    | exports   | daily production  |
//! | `exportShares`           | exports   | daily production, as % of the series total |
//! | `exportsByPopulation`    | exports   | population        |
//! | `producersByProduction`  | producers | daily production  |
//! | `producersByReserves`    | producers | proven reserves   |
//! | `fracking`               | producers | daily production, fracking countries only |

use serde::Serialize;

use crate::catalog::Catalog;
use crate::logs::{log_info, log_info_indent, log_warning};
use crate::models::{ExportRecord, FilterCriteria, OilDataset, ProducerRecord};
use crate::stats::{production_shares, Share};

use super::filter::{filter_exports, filter_producers};
use super::record::{ExportSortKey, ProducerSortKey};

/// Everything the chart renderers need for one filter state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView<'a> {
    /// Criteria the series were computed with.
    pub criteria: FilterCriteria,
    pub exports_by_production: Vec<&'a ExportRecord>,
    /// Pie slices over `exports_by_production`.
    pub export_shares: Vec<Share>,
    pub exports_by_population: Vec<&'a ExportRecord>,
    pub producers_by_production: Vec<&'a ProducerRecord>,
    pub producers_by_reserves: Vec<&'a ProducerRecord>,
    /// `producers_by_production` restricted to fracking countries.
    pub fracking: Vec<&'a ProducerRecord>,
}

impl DashboardView<'_> {
    /// True when every series is empty.
    pub fn is_empty(&self) -> bool {
        self.exports_by_production.is_empty()
            && self.exports_by_population.is_empty()
            && self.producers_by_production.is_empty()
            && self.producers_by_reserves.is_empty()
    }
}

/// Recompute every chart series for `criteria`.
pub fn build<'a>(dataset: &'a OilDataset, criteria: &FilterCriteria, catalog: &Catalog) -> DashboardView<'a> {
    let exports = &dataset.data.exports;
    let producers = &dataset.data.producers;

    let exports_by_production = filter_exports(exports, criteria, ExportSortKey::DailyProduction, catalog);
    let export_shares = production_shares(&exports_by_production);
    let producers_by_production = filter_producers(producers, criteria, ProducerSortKey::DailyProduction, catalog);
    let fracking = fracking_subset(&producers_by_production, catalog);

    let view = DashboardView {
        criteria: criteria.clone(),
        exports_by_production,
        export_shares,
        exports_by_population: filter_exports(exports, criteria, ExportSortKey::Population, catalog),
        producers_by_production,
        producers_by_reserves: filter_producers(producers, criteria, ProducerSortKey::ProvenReserves, catalog),
        fracking,
    };

    log_info("Recomputed dashboard series");
    log_info_indent(format!("exports: {}", view.exports_by_production.len()), 1);
    log_info_indent(format!("producers: {}", view.producers_by_production.len()), 1);
    log_info_indent(format!("fracking: {}", view.fracking.len()), 1);
    if view.is_empty() {
        log_warning("No records match the selected filters");
    }

    view
}

/// Keep only fracking countries, preserving order.
pub fn fracking_subset<'a>(records: &[&'a ProducerRecord], catalog: &Catalog) -> Vec<&'a ProducerRecord> {
    records
        .iter()
        .copied()
        .filter(|r| catalog.is_fracking_country(&r.country))
        .collect()
}
