//! Domain models for the oil-production dashboard.
//!
//! This module contains the data structures the engine works on:
//!
//! - [`ExportRecord`] - One country's row in the exports table
//! - [`ProducerRecord`] - One country's row in the producers table
//! - [`OilDataset`] - The whole input document
//! - [`FilterCriteria`] - The user's current filter selection
//! - [`TopRange`] - Post-sort truncation (all, top 5, top 10, top 20)
//! - [`GdpCategory`] - The closed set of GDP oil-share category codes
//!
//! Records accept both the source dataset's Spanish field names and the
//! English camelCase names, and always serialize in camelCase. Numeric
//! fields are optional: a missing or `null` value counts as 0 wherever the
//! engine compares numbers.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Records
// =============================================================================

/// A country's export statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "RawExportRecord")]
pub struct ExportRecord {
    /// Rank in the source table.
    pub rank: Option<i64>,
    /// Country name (unique key).
    pub country: String,
    /// Barrels per day.
    pub daily_production: Option<f64>,
    /// Proven reserves, thousands of millions of barrels.
    pub proven_reserves: Option<f64>,
    /// 2024 population, millions.
    pub population: Option<f64>,
    /// GDP oil-share category code (see [`GdpCategory`]).
    pub gdp_oil_category: Option<String>,
}

/// A country's producer statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "RawProducerRecord")]
pub struct ProducerRecord {
    /// Rank in the source table.
    pub rank: Option<i64>,
    /// Country name (unique key).
    pub country: String,
    /// Barrels per day.
    pub daily_production: Option<f64>,
    /// Thousands of barrels per day.
    pub daily_production_thousands: Option<f64>,
    /// Years of production left at the current rate.
    pub years_of_production_remaining: Option<f64>,
    /// Proven reserves, thousands of millions of barrels.
    pub proven_reserves: Option<f64>,
    /// 2024 population, millions.
    pub population: Option<f64>,
    /// Oil exports category, informational only.
    pub oil_exports_category: Option<String>,
}

// -----------------------------------------------------------------------------
// Wire shapes
// -----------------------------------------------------------------------------
//
// Every field is read under both its camelCase and its Spanish name; when a
// record carries both, the camelCase value wins. Ranks and category codes
// that do not parse become `None`.

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawExportRecord {
    #[serde(deserialize_with = "integer_or_none")]
    rank: Option<i64>,
    country: Option<String>,
    pais: Option<String>,
    daily_production: Option<f64>,
    #[serde(rename = "produccion_bbl_d")]
    produccion_bbl_d: Option<f64>,
    proven_reserves: Option<f64>,
    #[serde(rename = "reservas_probadas_MMM_bbl")]
    reservas_probadas: Option<f64>,
    population: Option<f64>,
    #[serde(rename = "poblacion_2024_mm")]
    poblacion: Option<f64>,
    #[serde(deserialize_with = "string_or_number")]
    gdp_oil_category: Option<String>,
    #[serde(rename = "pib_petrolero_categoria", deserialize_with = "string_or_number")]
    pib_petrolero_categoria: Option<String>,
}

impl From<RawExportRecord> for ExportRecord {
    fn from(raw: RawExportRecord) -> Self {
        Self {
            rank: raw.rank,
            country: raw.country.or(raw.pais).unwrap_or_default(),
            daily_production: raw.daily_production.or(raw.produccion_bbl_d),
            proven_reserves: raw.proven_reserves.or(raw.reservas_probadas),
            population: raw.population.or(raw.poblacion),
            gdp_oil_category: raw.gdp_oil_category.or(raw.pib_petrolero_categoria),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawProducerRecord {
    #[serde(deserialize_with = "integer_or_none")]
    rank: Option<i64>,
    country: Option<String>,
    pais: Option<String>,
    daily_production: Option<f64>,
    #[serde(rename = "produccion_bbl_d")]
    produccion_bbl_d: Option<f64>,
    daily_production_thousands: Option<f64>,
    #[serde(rename = "produccion_mbbl_d")]
    produccion_mbbl_d: Option<f64>,
    years_of_production_remaining: Option<f64>,
    #[serde(rename = "anos_produccion")]
    anos_produccion: Option<f64>,
    proven_reserves: Option<f64>,
    #[serde(rename = "reservas_probadas_MMM_bbl")]
    reservas_probadas: Option<f64>,
    population: Option<f64>,
    #[serde(rename = "poblacion_2024_mm")]
    poblacion: Option<f64>,
    #[serde(deserialize_with = "string_or_number")]
    oil_exports_category: Option<String>,
    #[serde(rename = "exportaciones_petroleras_categoria", deserialize_with = "string_or_number")]
    exportaciones_petroleras_categoria: Option<String>,
}

impl From<RawProducerRecord> for ProducerRecord {
    fn from(raw: RawProducerRecord) -> Self {
        Self {
            rank: raw.rank,
            country: raw.country.or(raw.pais).unwrap_or_default(),
            daily_production: raw.daily_production.or(raw.produccion_bbl_d),
            daily_production_thousands: raw.daily_production_thousands.or(raw.produccion_mbbl_d),
            years_of_production_remaining: raw
                .years_of_production_remaining
                .or(raw.anos_produccion),
            proven_reserves: raw.proven_reserves.or(raw.reservas_probadas),
            population: raw.population.or(raw.poblacion),
            oil_exports_category: raw
                .oil_exports_category
                .or(raw.exportaciones_petroleras_categoria),
        }
    }
}

/// Category codes appear both as `"50"` and `50` in the wild.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Ranks appear as `1` or `1.0`; anything else is dropped.
fn integer_or_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        _ => None,
    })
}

// =============================================================================
// Input Document
// =============================================================================

/// The two record tables of the input document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "RawDatasetTables")]
pub struct DatasetTables {
    pub exports: Vec<ExportRecord>,
    pub producers: Vec<ProducerRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDatasetTables {
    exports: Option<Vec<ExportRecord>>,
    exportaciones: Option<Vec<ExportRecord>>,
    producers: Option<Vec<ProducerRecord>>,
    productores: Option<Vec<ProducerRecord>>,
}

impl From<RawDatasetTables> for DatasetTables {
    fn from(raw: RawDatasetTables) -> Self {
        Self {
            exports: raw.exports.or(raw.exportaciones).unwrap_or_default(),
            producers: raw.producers.or(raw.productores).unwrap_or_default(),
        }
    }
}

/// The whole input document, produced by an external ETL step.
///
/// `metadata`, `statistics` and `top10` are carried through untouched for
/// the presentation layer; the engine never reads them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "RawOilDataset")]
pub struct OilDataset {
    pub metadata: Value,
    pub data: DatasetTables,
    pub statistics: Value,
    pub top10: Value,
    pub countries: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawOilDataset {
    metadata: Option<Value>,
    data: Option<DatasetTables>,
    datos: Option<DatasetTables>,
    statistics: Option<Value>,
    estadisticas: Option<Value>,
    top10: Option<Value>,
    countries: Option<Vec<String>>,
    paises: Option<Vec<String>>,
}

impl From<RawOilDataset> for OilDataset {
    fn from(raw: RawOilDataset) -> Self {
        Self {
            metadata: raw.metadata.unwrap_or_else(empty_object),
            data: raw.data.or(raw.datos).unwrap_or_default(),
            statistics: raw
                .statistics
                .or(raw.estadisticas)
                .unwrap_or_else(empty_object),
            top10: raw.top10.unwrap_or_else(empty_object),
            countries: raw.countries.or(raw.paises).unwrap_or_default(),
        }
    }
}

fn empty_object() -> Value {
    json!({})
}

impl OilDataset {
    /// The empty-but-well-typed document substituted when loading fails.
    pub fn empty() -> Self {
        Self {
            metadata: empty_object(),
            data: DatasetTables::default(),
            statistics: empty_object(),
            top10: empty_object(),
            countries: Vec::new(),
        }
    }

    /// True when both record tables are empty.
    pub fn is_empty(&self) -> bool {
        self.data.exports.is_empty() && self.data.producers.is_empty()
    }
}

impl Default for OilDataset {
    fn default() -> Self {
        Self::empty()
    }
}

// =============================================================================
// Top Range
// =============================================================================

/// Truncation applied after sorting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TopRange {
    #[default]
    All,
    Top5,
    Top10,
    Top20,
}

impl TopRange {
    /// Maximum number of records kept, `None` for [`TopRange::All`].
    pub fn limit(self) -> Option<usize> {
        match self {
            Self::All => None,
            Self::Top5 => Some(5),
            Self::Top10 => Some(10),
            Self::Top20 => Some(20),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Top5 => "top5",
            Self::Top10 => "top10",
            Self::Top20 => "top20",
        }
    }
}

impl FromStr for TopRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "todos" => Ok(Self::All),
            "top5" | "5" => Ok(Self::Top5),
            "top10" | "10" => Ok(Self::Top10),
            "top20" | "20" => Ok(Self::Top20),
            other => Err(format!(
                "unknown top range '{}' (expected all, top5, top10 or top20)",
                other
            )),
        }
    }
}

impl fmt::Display for TopRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// GDP Oil Category
// =============================================================================

/// Share of a country's GDP that comes from oil.
///
/// Codes are the midpoint percentage of each bucket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GdpCategory {
    /// `50` - 40–60%
    VeryHigh,
    /// `35` - 30–45%
    High,
    /// `25` - 20–30%
    MediumHigh,
    /// `15` - 10–20%
    Medium,
    /// `7` - 5–10%
    Low,
    /// `3` - under 5%
    VeryLow,
}

impl GdpCategory {
    /// Every category, highest share first.
    pub const ALL: [GdpCategory; 6] = [
        Self::VeryHigh,
        Self::High,
        Self::MediumHigh,
        Self::Medium,
        Self::Low,
        Self::VeryLow,
    ];

    /// Parse a category from its code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "50" => Some(Self::VeryHigh),
            "35" => Some(Self::High),
            "25" => Some(Self::MediumHigh),
            "15" => Some(Self::Medium),
            "7" => Some(Self::Low),
            "3" => Some(Self::VeryLow),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::VeryHigh => "50",
            Self::High => "35",
            Self::MediumHigh => "25",
            Self::Medium => "15",
            Self::Low => "7",
            Self::VeryLow => "3",
        }
    }

    /// Dashboard label.
    pub fn label(self) -> &'static str {
        match self {
            Self::VeryHigh => "Muy alta (40–60%)",
            Self::High => "Alta (30–45%)",
            Self::MediumHigh => "Media-alta (20–30%)",
            Self::Medium => "Media (10–20%)",
            Self::Low => "Baja (5–10%)",
            Self::VeryLow => "Muy baja (<5%)",
        }
    }
}

// =============================================================================
// Filter Criteria
// =============================================================================

/// The user's filter selection, shared by every chart.
///
/// Every empty set means "no constraint". Sets are ordered so that a
/// serialized criteria object is stable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    pub top_range: TopRange,
    #[serde(default, alias = "pibCategories")]
    pub gdp_categories: BTreeSet<String>,
    #[serde(default)]
    pub selected_countries: BTreeSet<String>,
    #[serde(default)]
    pub selected_regions: BTreeSet<String>,
}

impl FilterCriteria {
    /// Criteria with no constraint at all.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_top_range(mut self, top_range: TopRange) -> Self {
        self.top_range = top_range;
        self
    }

    pub fn with_categories<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.gdp_categories.extend(codes.into_iter().map(Into::into));
        self
    }

    pub fn with_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_countries
            .extend(countries.into_iter().map(Into::into));
        self
    }

    pub fn with_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_regions
            .extend(regions.into_iter().map(Into::into));
        self
    }

    /// True when no field constrains the result.
    pub fn is_unconstrained(&self) -> bool {
        self.top_range == TopRange::All
            && self.gdp_categories.is_empty()
            && self.selected_countries.is_empty()
            && self.selected_regions.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_record_spanish_fields() {
        let record: ExportRecord = serde_json::from_value(json!({
            "rank": 1,
            "pais": "Arabia Saudita",
            "produccion_bbl_d": 12000000,
            "reservas_probadas_MMM_bbl": 267.2,
            "poblacion_2024_mm": 36.9,
            "pib_petrolero_categoria": "50"
        }))
        .unwrap();

        assert_eq!(record.country, "Arabia Saudita");
        assert_eq!(record.daily_production, Some(12_000_000.0));
        assert_eq!(record.gdp_oil_category.as_deref(), Some("50"));
    }

    #[test]
    fn test_missing_numbers_are_none() {
        let record: ProducerRecord = serde_json::from_value(json!({
            "pais": "Guyana",
            "produccion_bbl_d": null
        }))
        .unwrap();

        assert_eq!(record.daily_production, None);
        assert_eq!(record.years_of_production_remaining, None);
        assert_eq!(record.rank, None);
    }

    #[test]
    fn test_rank_leniency() {
        let record: ExportRecord =
            serde_json::from_value(json!({ "rank": 3.0, "pais": "Qatar" })).unwrap();
        assert_eq!(record.rank, Some(3));

        let record: ExportRecord =
            serde_json::from_value(json!({ "rank": 2.5, "pais": "Qatar" })).unwrap();
        assert_eq!(record.rank, None);
    }

    #[test]
    fn test_camel_case_wins_over_spanish() {
        let record: ExportRecord = serde_json::from_value(json!({
            "pais": "Irak",
            "country": "Iraq",
            "pib_petrolero_categoria": "35",
            "gdpOilCategory": 50
        }))
        .unwrap();
        assert_eq!(record.country, "Iraq");
        assert_eq!(record.gdp_oil_category.as_deref(), Some("50"));
    }

    #[test]
    fn test_serialized_record_reads_back() {
        let record = ProducerRecord {
            rank: Some(4),
            country: "Canadá".into(),
            daily_production: Some(5_800_000.0),
            oil_exports_category: Some("15".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        let back: ProducerRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_numeric_category_code() {
        let record: ExportRecord =
            serde_json::from_value(json!({ "country": "Omán", "gdpOilCategory": 35 })).unwrap();
        assert_eq!(record.gdp_oil_category.as_deref(), Some("35"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let record = ProducerRecord {
            country: "Noruega".into(),
            years_of_production_remaining: Some(12.5),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["yearsOfProductionRemaining"], 12.5);
        assert!(value.get("anos_produccion").is_none());
    }

    #[test]
    fn test_empty_dataset_shape() {
        let dataset = OilDataset::empty();
        assert!(dataset.is_empty());
        assert!(dataset.metadata.is_object());
        assert!(dataset.countries.is_empty());
    }

    #[test]
    fn test_dataset_defaults_missing_sections() {
        let dataset: OilDataset = serde_json::from_value(json!({ "paises": ["Chad"] })).unwrap();
        assert_eq!(dataset.countries, vec!["Chad"]);
        assert!(dataset.data.exports.is_empty());
        assert!(dataset.top10.is_object());
    }

    #[test]
    fn test_top_range_limits() {
        assert_eq!(TopRange::All.limit(), None);
        assert_eq!(TopRange::Top5.limit(), Some(5));
        assert_eq!(TopRange::Top10.limit(), Some(10));
        assert_eq!(TopRange::Top20.limit(), Some(20));
    }

    #[test]
    fn test_top_range_parse() {
        assert_eq!("top10".parse::<TopRange>(), Ok(TopRange::Top10));
        assert_eq!(" ALL ".parse::<TopRange>(), Ok(TopRange::All));
        assert!("top3".parse::<TopRange>().is_err());
    }

    #[test]
    fn test_gdp_category_codes() {
        for category in GdpCategory::ALL {
            assert_eq!(GdpCategory::from_code(category.code()), Some(category));
        }
        assert_eq!(GdpCategory::from_code("99"), None);
        assert_eq!(GdpCategory::Low.label(), "Baja (5–10%)");
    }

    #[test]
    fn test_criteria_builder() {
        let criteria = FilterCriteria::new()
            .with_top_range(TopRange::Top5)
            .with_regions(["Europa"])
            .with_countries(["Rusia", "Rusia"]);

        assert_eq!(criteria.selected_countries.len(), 1);
        assert!(!criteria.is_unconstrained());
        assert!(FilterCriteria::default().is_unconstrained());
    }

    #[test]
    fn test_criteria_from_dashboard_json() {
        let criteria: FilterCriteria = serde_json::from_value(json!({
            "topRange": "top20",
            "pibCategories": ["50", "35"]
        }))
        .unwrap();
        assert_eq!(criteria.top_range, TopRange::Top20);
        assert!(criteria.gdp_categories.contains("35"));
        assert!(criteria.selected_regions.is_empty());
    }
}
