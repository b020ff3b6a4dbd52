//! Headline statistics and per-chart aggregates.
//!
//! - [`summarize`] - The dashboard header numbers
//! - [`production_shares`] - Each record's share of total production (pie chart)
//! - [`has_missing_data`] - Flags rows with no usable production figure

pub mod format;

use serde::{Deserialize, Serialize};

use crate::engine::Record;
use crate::models::{ExportRecord, OilDataset, ProducerRecord};

pub use format::{format_decimal, format_number};

/// Country leading production.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopProducer {
    #[serde(alias = "pais")]
    pub country: String,
    #[serde(default, alias = "valor")]
    pub daily_production: Option<f64>,
}

/// Dashboard header numbers.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub top_producer: Option<TopProducer>,
    /// Sum of producers' daily production, barrels per day.
    pub total_production: f64,
    /// Sum of producers' proven reserves, thousands of millions of barrels.
    pub total_reserves: f64,
    pub country_count: usize,
}

/// Compute the header numbers for a dataset.
///
/// The top producer comes from the precomputed `top10.produccion` list when
/// the document has one, otherwise from the producers table.
pub fn summarize(dataset: &OilDataset) -> Summary {
    let producers = &dataset.data.producers;

    let top_producer = precomputed_top_producer(dataset).or_else(|| {
        producers
            .iter()
            .max_by(|a, b| {
                a.sort_value(ProducerRecord::DAILY_PRODUCTION)
                    .total_cmp(&b.sort_value(ProducerRecord::DAILY_PRODUCTION))
            })
            .map(|p| TopProducer {
                country: p.country.clone(),
                daily_production: p.daily_production,
            })
    });

    Summary {
        top_producer,
        total_production: producers.iter().filter_map(|p| p.daily_production).sum(),
        total_reserves: producers.iter().filter_map(|p| p.proven_reserves).sum(),
        country_count: dataset.countries.len(),
    }
}

fn precomputed_top_producer(dataset: &OilDataset) -> Option<TopProducer> {
    let first = dataset
        .top10
        .get("produccion")
        .or_else(|| dataset.top10.get("production"))?
        .get(0)?;
    serde_json::from_value(first.clone()).ok()
}

/// One slice of the production pie.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Share {
    pub country: String,
    pub value: f64,
    pub population: f64,
    /// Percentage of the collection's total, 0 when the total is 0.
    pub percentage: f64,
}

/// Each record's percentage of the collection's total daily production.
pub fn production_shares(records: &[&ExportRecord]) -> Vec<Share> {
    let total: f64 = records.iter().filter_map(|r| r.daily_production).sum();

    records
        .iter()
        .map(|r| {
            let value = r.daily_production.unwrap_or(0.0);
            Share {
                country: r.country.clone(),
                value,
                population: r.population.unwrap_or(0.0),
                percentage: if total > 0.0 { value / total * 100.0 } else { 0.0 },
            }
        })
        .collect()
}

/// Records without a country name or without a non-zero production figure.
pub fn has_missing_data<R: Record>(record: &R) -> bool {
    record.country().is_empty()
        || record
            .metric(R::DAILY_PRODUCTION)
            .map_or(true, |v| v == 0.0)
}
