//! The record abstraction the engine is generic over.
//!
//! Both record shapes expose a country name and a set of numeric fields
//! addressable by a per-shape sort key. Only export records carry a GDP
//! category the engine filters on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::{ExportRecord, ProducerRecord};

/// A row the filter-sort-limit engine can process.
pub trait Record {
    /// Numeric fields this record can be sorted by.
    type SortKey: Copy + fmt::Debug;

    /// Whether the GDP category filter stage applies to this shape.
    const CATEGORY_FILTERED: bool;

    /// Key of the barrels-per-day field.
    const DAILY_PRODUCTION: Self::SortKey;

    fn country(&self) -> &str;

    /// Raw value of a numeric field, `None` when missing.
    fn metric(&self, key: Self::SortKey) -> Option<f64>;

    /// Category code checked by the category filter stage.
    fn category_code(&self) -> Option<&str> {
        None
    }

    /// Value used for ordering: missing and NaN count as 0, `-0.0` as `0.0`.
    fn sort_value(&self, key: Self::SortKey) -> f64 {
        self.metric(key).filter(|v| !v.is_nan()).unwrap_or(0.0) + 0.0
    }
}

/// Lowercase and drop separators so `daily-production`, `dailyProduction`
/// and `daily_production` compare equal.
fn normalize_key(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

// =============================================================================
// Export records
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum ExportSortKey {
    #[default]
    DailyProduction,
    ProvenReserves,
    Population,
}

impl FromStr for ExportSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "dailyproduction" | "production" | "produccionbbld" => Ok(Self::DailyProduction),
            "provenreserves" | "reserves" | "reservasprobadasmmmbbl" => Ok(Self::ProvenReserves),
            "population" | "poblacion2024mm" => Ok(Self::Population),
            _ => Err(format!(
                "unknown export sort key '{}' (expected daily-production, proven-reserves or population)",
                s
            )),
        }
    }
}

impl Record for ExportRecord {
    type SortKey = ExportSortKey;
    const CATEGORY_FILTERED: bool = true;
    const DAILY_PRODUCTION: ExportSortKey = ExportSortKey::DailyProduction;

    fn country(&self) -> &str {
        &self.country
    }

    fn metric(&self, key: ExportSortKey) -> Option<f64> {
        match key {
            ExportSortKey::DailyProduction => self.daily_production,
            ExportSortKey::ProvenReserves => self.proven_reserves,
            ExportSortKey::Population => self.population,
        }
    }

    fn category_code(&self) -> Option<&str> {
        self.gdp_oil_category.as_deref()
    }
}

// =============================================================================
// Producer records
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum ProducerSortKey {
    #[default]
    DailyProduction,
    DailyProductionThousands,
    YearsOfProductionRemaining,
    ProvenReserves,
    Population,
}

impl FromStr for ProducerSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "dailyproduction" | "production" | "produccionbbld" => Ok(Self::DailyProduction),
            "dailyproductionthousands" | "produccionmbbld" => Ok(Self::DailyProductionThousands),
            "yearsofproductionremaining" | "years" | "anosproduccion" => {
                Ok(Self::YearsOfProductionRemaining)
            }
            "provenreserves" | "reserves" | "reservasprobadasmmmbbl" => Ok(Self::ProvenReserves),
            "population" | "poblacion2024mm" => Ok(Self::Population),
            _ => Err(format!(
                "unknown producer sort key '{}' (expected daily-production, daily-production-thousands, \
                 years-of-production-remaining, proven-reserves or population)",
                s
            )),
        }
    }
}

// The category filter never applies to producers; `oil_exports_category`
// is informational.
impl Record for ProducerRecord {
    type SortKey = ProducerSortKey;
    const CATEGORY_FILTERED: bool = false;
    const DAILY_PRODUCTION: ProducerSortKey = ProducerSortKey::DailyProduction;

    fn country(&self) -> &str {
        &self.country
    }

    fn metric(&self, key: ProducerSortKey) -> Option<f64> {
        match key {
            ProducerSortKey::DailyProduction => self.daily_production,
            ProducerSortKey::DailyProductionThousands => self.daily_production_thousands,
            ProducerSortKey::YearsOfProductionRemaining => self.years_of_production_remaining,
            ProducerSortKey::ProvenReserves => self.proven_reserves,
            ProducerSortKey::Population => self.population,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_aliases() {
        assert_eq!("daily-production".parse::<ExportSortKey>(), Ok(ExportSortKey::DailyProduction));
        assert_eq!("dailyProduction".parse::<ExportSortKey>(), Ok(ExportSortKey::DailyProduction));
        assert_eq!("poblacion_2024_mm".parse::<ExportSortKey>(), Ok(ExportSortKey::Population));
        assert_eq!(
            "anos_produccion".parse::<ProducerSortKey>(),
            Ok(ProducerSortKey::YearsOfProductionRemaining)
        );
        assert_eq!("Proven Reserves".parse::<ProducerSortKey>(), Ok(ProducerSortKey::ProvenReserves));
    }

    #[test]
    fn test_export_has_no_years_key() {
        assert!("years".parse::<ExportSortKey>().is_err());
    }

    #[test]
    fn test_sort_value_coerces_missing() {
        let record = ProducerRecord {
            country: "Chad".into(),
            proven_reserves: Some(1.5),
            population: Some(f64::NAN),
            ..Default::default()
        };
        assert_eq!(record.sort_value(ProducerSortKey::ProvenReserves), 1.5);
        assert_eq!(record.sort_value(ProducerSortKey::DailyProduction), 0.0);
        assert_eq!(record.sort_value(ProducerSortKey::Population), 0.0);
    }

    #[test]
    fn test_negative_zero_sorts_as_zero() {
        let record = ExportRecord {
            daily_production: Some(-0.0),
            ..Default::default()
        };
        let value = record.sort_value(ExportSortKey::DailyProduction);
        assert!(value.is_sign_positive());
        assert_eq!(value.total_cmp(&0.0), std::cmp::Ordering::Equal);
    }

    #[test]
    fn test_category_only_on_exports() {
        let export = ExportRecord {
            gdp_oil_category: Some("7".into()),
            ..Default::default()
        };
        let producer = ProducerRecord {
            oil_exports_category: Some("7".into()),
            ..Default::default()
        };
        assert_eq!(export.category_code(), Some("7"));
        assert_eq!(producer.category_code(), None);
        assert!(ExportRecord::CATEGORY_FILTERED);
        assert!(!ProducerRecord::CATEGORY_FILTERED);
    }
}
