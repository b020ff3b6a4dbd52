//! Filter-sort-limit engine.
//!
//! Derives a chart's collection from a record table in five fixed stages:
//!
//! ```text
//! records ─▶ category ─▶ region ─▶ country ─▶ sort (desc) ─▶ top-N ─▶ output
//!            (exports)
//! ```
//!
//! Top-N runs last so it reflects the final ranking for the chart's sort
//! key, not the ranking of the source table. The input slice is never
//! reordered; the output holds references into it.

use crate::catalog::Catalog;
use crate::models::{ExportRecord, FilterCriteria, ProducerRecord};

use super::record::{ExportSortKey, ProducerSortKey, Record};

/// Apply `criteria` to `records`, sorted descending by `sort_key`.
///
/// Never fails: an empty input, a fully filtered-out result or unknown
/// region names all yield an empty (or smaller) collection. Records with
/// equal sort values keep their input order.
pub fn apply<'a, R: Record>(
    records: &'a [R],
    criteria: &FilterCriteria,
    sort_key: R::SortKey,
    catalog: &Catalog,
) -> Vec<&'a R> {
    let mut selected: Vec<&R> = records.iter().collect();

    if R::CATEGORY_FILTERED && !criteria.gdp_categories.is_empty() {
        selected.retain(|r| {
            r.category_code()
                .is_some_and(|code| criteria.gdp_categories.contains(code))
        });
    }

    if !criteria.selected_regions.is_empty() {
        let members = catalog.resolve_regions(criteria.selected_regions.iter().map(String::as_str));
        selected.retain(|r| members.contains(r.country()));
    }

    if !criteria.selected_countries.is_empty() {
        selected.retain(|r| criteria.selected_countries.contains(r.country()));
    }

    // `sort_by` is stable.
    selected.sort_by(|a, b| b.sort_value(sort_key).total_cmp(&a.sort_value(sort_key)));

    if let Some(limit) = criteria.top_range.limit() {
        selected.truncate(limit);
    }

    log::debug!(
        "filtered {} of {} records by {:?} ({})",
        selected.len(),
        records.len(),
        sort_key,
        criteria.top_range
    );

    selected
}

/// [`apply`] for the exports table.
pub fn filter_exports<'a>(
    records: &'a [ExportRecord],
    criteria: &FilterCriteria,
    sort_key: ExportSortKey,
    catalog: &Catalog,
) -> Vec<&'a ExportRecord> {
    apply(records, criteria, sort_key, catalog)
}

/// [`apply`] for the producers table. The category filter is not applied.
pub fn filter_producers<'a>(
    records: &'a [ProducerRecord],
    criteria: &FilterCriteria,
    sort_key: ProducerSortKey,
    catalog: &Catalog,
) -> Vec<&'a ProducerRecord> {
    apply(records, criteria, sort_key, catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TopRange;

    fn export(country: &str, production: Option<f64>, category: &str) -> ExportRecord {
        ExportRecord {
            country: country.into(),
            daily_production: production,
            gdp_oil_category: Some(category.into()),
            ..Default::default()
        }
    }

    fn producer(country: &str, production: f64, reserves: f64) -> ProducerRecord {
        ProducerRecord {
            country: country.into(),
            daily_production: Some(production),
            proven_reserves: Some(reserves),
            ..Default::default()
        }
    }

    fn countries<R: Record>(records: &[&R]) -> Vec<String> {
        records.iter().map(|r| r.country().to_string()).collect()
    }

    #[test]
    fn test_sorts_descending_with_fewer_than_top_n() {
        let records = vec![
            export("Estados Unidos", Some(13_000_000.0), "3"),
            export("Rusia", Some(11_000_000.0), "15"),
            export("Arabia Saudita", Some(12_000_000.0), "50"),
        ];
        let criteria = FilterCriteria::new().with_top_range(TopRange::Top5);

        let out = filter_exports(&records, &criteria, ExportSortKey::DailyProduction, &Catalog::builtin());

        assert_eq!(countries(&out), vec!["Estados Unidos", "Arabia Saudita", "Rusia"]);
    }

    #[test]
    fn test_region_excludes_other_regions() {
        let records = vec![
            export("Canadá", Some(4.0), "7"),
            export("Estados Unidos", Some(13.0), "3"),
            export("México", Some(2.0), "7"),
            export("Rusia", Some(11.0), "15"),
        ];
        let criteria = FilterCriteria::new().with_regions(["Norte América"]);

        let out = filter_exports(&records, &criteria, ExportSortKey::DailyProduction, &Catalog::builtin());

        assert_eq!(countries(&out), vec!["Estados Unidos", "Canadá", "México"]);
    }

    #[test]
    fn test_empty_input() {
        let criteria = FilterCriteria::new()
            .with_top_range(TopRange::Top10)
            .with_categories(["50"])
            .with_regions(["Europa"]);
        let out = filter_producers(&[], &criteria, ProducerSortKey::ProvenReserves, &Catalog::builtin());
        assert!(out.is_empty());
    }

    #[test]
    fn test_category_filter_on_exports() {
        let records = vec![
            export("Kuwait", Some(2.5), "50"),
            export("Noruega", Some(1.8), "15"),
            export("Irak", Some(4.3), "50"),
        ];
        let criteria = FilterCriteria::new().with_categories(["50"]);

        let out = filter_exports(&records, &criteria, ExportSortKey::DailyProduction, &Catalog::builtin());

        assert_eq!(countries(&out), vec!["Irak", "Kuwait"]);
    }

    #[test]
    fn test_category_filter_skips_producers() {
        let records = vec![producer("Kuwait", 2.5, 101.5), producer("Noruega", 1.8, 8.1)];
        let criteria = FilterCriteria::new().with_categories(["50"]);

        let out = filter_producers(&records, &criteria, ProducerSortKey::DailyProduction, &Catalog::builtin());

        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_missing_category_is_excluded_by_category_filter() {
        let mut record = export("Ghana", Some(0.2), "3");
        record.gdp_oil_category = None;
        let criteria = FilterCriteria::new().with_categories(["3"]);

        let out = filter_exports(
            std::slice::from_ref(&record),
            &criteria,
            ExportSortKey::DailyProduction,
            &Catalog::builtin(),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_value_sorts_as_zero() {
        let records = vec![
            export("Chad", None, "25"),
            export("Gabón", Some(0.2), "25"),
            export("Sudán", Some(-0.0), "25"),
        ];
        let out = filter_exports(
            &records,
            &FilterCriteria::new(),
            ExportSortKey::DailyProduction,
            &Catalog::builtin(),
        );
        assert_eq!(countries(&out)[0], "Gabón");
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_stable_for_equal_keys() {
        let records = vec![
            producer("Perú", 1.0, 0.0),
            producer("Colombia", 1.0, 0.0),
            producer("Ecuador", 1.0, 0.0),
            producer("Brasil", 3.0, 0.0),
        ];
        let out = filter_producers(
            &records,
            &FilterCriteria::new(),
            ProducerSortKey::DailyProduction,
            &Catalog::builtin(),
        );
        assert_eq!(countries(&out), vec!["Brasil", "Perú", "Colombia", "Ecuador"]);
    }

    #[test]
    fn test_negative_zero_ties_with_missing() {
        let records = vec![
            export("Siria", Some(-0.0), "5"),
            export("Chad", None, "5"),
            export("Sudán", Some(0.0), "5"),
        ];
        let out = filter_exports(
            &records,
            &FilterCriteria::new(),
            ExportSortKey::DailyProduction,
            &Catalog::builtin(),
        );
        assert_eq!(countries(&out), vec!["Siria", "Chad", "Sudán"]);
    }

    #[test]
    fn test_top_n_after_sort_per_key() {
        let records = vec![
            producer("Venezuela", 0.9, 303.0),
            producer("Estados Unidos", 13.0, 44.0),
            producer("Arabia Saudita", 12.0, 267.0),
            producer("Canadá", 4.9, 168.0),
            producer("Irán", 3.9, 208.0),
            producer("Irak", 4.3, 145.0),
        ];
        let criteria = FilterCriteria::new().with_top_range(TopRange::Top5);
        let catalog = Catalog::builtin();

        let by_production = filter_producers(&records, &criteria, ProducerSortKey::DailyProduction, &catalog);
        let by_reserves = filter_producers(&records, &criteria, ProducerSortKey::ProvenReserves, &catalog);

        assert!(!countries(&by_production).contains(&"Venezuela".to_string()));
        assert_eq!(countries(&by_reserves)[0], "Venezuela");
        assert!(!countries(&by_reserves).contains(&"Estados Unidos".to_string()));
    }

    #[test]
    fn test_country_and_region_intersect() {
        let records = vec![
            producer("Noruega", 1.8, 8.1),
            producer("Rusia", 10.8, 80.0),
            producer("China", 4.2, 26.0),
        ];
        let criteria = FilterCriteria::new()
            .with_regions(["Europa"])
            .with_countries(["Rusia", "China"]);

        let out = filter_producers(&records, &criteria, ProducerSortKey::DailyProduction, &Catalog::builtin());

        assert_eq!(countries(&out), vec!["Rusia"]);
    }

    #[test]
    fn test_unknown_region_filters_everything() {
        let records = vec![producer("Noruega", 1.8, 8.1)];
        let criteria = FilterCriteria::new().with_regions(["Antártida"]);

        let out = filter_producers(&records, &criteria, ProducerSortKey::DailyProduction, &Catalog::builtin());

        assert!(out.is_empty());
    }

    #[test]
    fn test_input_order_untouched() {
        let records = vec![producer("A", 1.0, 0.0), producer("B", 2.0, 0.0)];
        let _ = filter_producers(
            &records,
            &FilterCriteria::new(),
            ProducerSortKey::DailyProduction,
            &Catalog::builtin(),
        );
        assert_eq!(records[0].country, "A");
    }
}
