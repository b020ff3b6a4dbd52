//! Static lookup tables: regions, category labels and the fracking set.
//!
//! A [`Catalog`] is built once at startup and then only borrowed. The
//! engine and the region resolver take `&Catalog`; nothing mutates it
//! after construction.
//!
//! The built-in tables are available through [`Catalog::builtin`]. A JSON
//! file can replace any section:
//!
//! ```json
//! {
//!   "regions": [{ "name": "Norte América", "countries": ["Canadá", "México"] }],
//!   "categoryLabels": [{ "code": "50", "label": "Muy alta (40–60%)" }],
//!   "frackingCountries": ["Estados Unidos"]
//! }
//! ```
//!
//! Sections left out of the file keep their built-in content.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::path::Path;

use crate::error::{CatalogError, CatalogResult};
use crate::models::GdpCategory;

/// Built-in region table, in display order.
const REGIONS: &[(&str, &[&str])] = &[
    (
        "Sur América",
        &["Argentina", "Brasil", "Colombia", "Ecuador", "Guyana", "Perú", "Venezuela"],
    ),
    ("Norte América", &["Canadá", "Estados Unidos", "México"]),
    (
        "Medio Oriente",
        &[
            "Arabia Saudita",
            "Bahréin",
            "Emiratos Árabes Unidos",
            "Irak",
            "Irán",
            "Kuwait",
            "Omán",
            "Qatar",
            "Siria",
        ],
    ),
    (
        "África",
        &[
            "Angola",
            "Argelia",
            "Chad",
            "Congo (Rep. del Congo)",
            "Egipto",
            "Gabón",
            "Ghana",
            "Libia",
            "Nigeria",
            "Sudáfrica",
            "Sudán",
            "Sudán del Sur",
        ],
    ),
    (
        "Asia",
        &[
            "Azerbaiyán",
            "Brunéi",
            "China",
            "India",
            "Indonesia",
            "Kazajistán",
            "Malasia",
            "Pakistán",
            "Tailandia",
            "Turkmenistán",
            "Vietnam",
        ],
    ),
    (
        "Europa",
        &["Alemania", "Francia", "Italia", "Noruega", "Reino Unido", "Rusia", "Turquía"],
    ),
    ("Oceanía", &["Australia"]),
];

/// Countries where fracking is a major extraction method.
const FRACKING_COUNTRIES: &[&str] = &["Estados Unidos", "Canadá", "China", "Argentina", "Rusia"];

static BUILTIN: Lazy<Catalog> = Lazy::new(Catalog::builtin);

// =============================================================================
// Table Entries
// =============================================================================

/// A geographic region and its member countries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Region {
    pub name: String,
    pub countries: Vec<String>,
}

impl Region {
    pub fn contains(&self, country: &str) -> bool {
        self.countries.iter().any(|c| c == country)
    }
}

/// A category code and its display label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryLabel {
    pub code: String,
    pub label: String,
}

/// On-disk shape of a catalog override file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFile {
    regions: Option<Vec<Region>>,
    category_labels: Option<Vec<CategoryLabel>>,
    fracking_countries: Option<Vec<String>>,
}

// =============================================================================
// Catalog
// =============================================================================

/// Immutable lookup tables shared by the engine and the presentation layer.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    regions: Vec<Region>,
    category_labels: Vec<CategoryLabel>,
    fracking_countries: BTreeSet<String>,
}

impl Catalog {
    /// The dashboard's built-in tables.
    pub fn builtin() -> Self {
        let regions = REGIONS
            .iter()
            .map(|(name, countries)| Region {
                name: name.to_string(),
                countries: countries.iter().map(|c| c.to_string()).collect(),
            })
            .collect();

        let category_labels = GdpCategory::ALL
            .iter()
            .map(|c| CategoryLabel {
                code: c.code().to_string(),
                label: c.label().to_string(),
            })
            .collect();

        Self {
            regions,
            category_labels,
            fracking_countries: FRACKING_COUNTRIES.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Shared instance of the built-in tables.
    pub fn builtin_ref() -> &'static Catalog {
        &BUILTIN
    }

    /// Load a catalog override file.
    pub fn from_file(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Parse a catalog override document.
    pub fn from_json(content: &str) -> CatalogResult<Self> {
        let file: CatalogFile = serde_json::from_str(content)?;
        let mut catalog = Self::builtin();

        if let Some(regions) = file.regions {
            if let Some(region) = regions.iter().find(|r| r.name.trim().is_empty()) {
                return Err(CatalogError::Invalid(format!(
                    "region with empty name ({} countries)",
                    region.countries.len()
                )));
            }
            catalog.regions = regions;
        }
        if let Some(labels) = file.category_labels {
            catalog.category_labels = labels;
        }
        if let Some(fracking) = file.fracking_countries {
            catalog.fracking_countries = fracking.into_iter().collect();
        }

        Ok(catalog)
    }

    // -------------------------------------------------------------------------
    // Region resolver
    // -------------------------------------------------------------------------

    /// All regions, in table order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Region names, in table order.
    pub fn region_names(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|r| r.name.as_str())
    }

    /// Name of the first region (in table order) listing `country`.
    pub fn region_of(&self, country: &str) -> Option<&str> {
        self.regions
            .iter()
            .find(|r| r.contains(country))
            .map(|r| r.name.as_str())
    }

    /// Member countries of a region, `None` for an unknown region.
    pub fn countries_of(&self, region: &str) -> Option<&[String]> {
        self.regions
            .iter()
            .find(|r| r.name == region)
            .map(|r| r.countries.as_slice())
    }

    /// Union of the member countries of every named region.
    ///
    /// Unknown region names contribute nothing.
    pub fn resolve_regions<'a, I>(&self, regions: I) -> HashSet<&str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        regions
            .into_iter()
            .filter_map(|name| self.countries_of(name))
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// Countries listed in more than one region, with the regions listing them.
    ///
    /// The table is expected to partition countries; [`Catalog::region_of`]
    /// picks the first region for any country reported here.
    pub fn overlapping_countries(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut seen: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for region in &self.regions {
            for country in &region.countries {
                seen.entry(country.as_str()).or_default().push(region.name.as_str());
            }
        }
        seen.retain(|_, regions| regions.len() > 1);
        seen
    }

    // -------------------------------------------------------------------------
    // Category labels
    // -------------------------------------------------------------------------

    /// Category entries, in display order.
    pub fn category_labels(&self) -> &[CategoryLabel] {
        &self.category_labels
    }

    /// Label for a category code; the code itself when unmapped.
    pub fn label_of<'a>(&'a self, code: &'a str) -> &'a str {
        self.category_labels
            .iter()
            .find(|c| c.code == code)
            .map(|c| c.label.as_str())
            .unwrap_or(code)
    }

    // -------------------------------------------------------------------------
    // Fracking
    // -------------------------------------------------------------------------

    pub fn is_fracking_country(&self, country: &str) -> bool {
        self.fracking_countries.contains(country)
    }

    pub fn fracking_countries(&self) -> impl Iterator<Item = &str> {
        self.fracking_countries.iter().map(String::as_str)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_tables() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.regions().len(), 7);
        assert_eq!(catalog.category_labels().len(), 6);
        assert_eq!(catalog.fracking_countries().count(), 5);
        assert_eq!(catalog.region_names().next(), Some("Sur América"));
    }

    #[test]
    fn test_builtin_is_a_partition() {
        assert!(Catalog::builtin().overlapping_countries().is_empty());
    }

    #[test]
    fn test_region_of() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.region_of("México"), Some("Norte América"));
        assert_eq!(catalog.region_of("Rusia"), Some("Europa"));
        assert_eq!(catalog.region_of("Atlántida"), None);
    }

    #[test]
    fn test_countries_of() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.countries_of("Oceanía"), Some(&["Australia".to_string()][..]));
        assert_eq!(catalog.countries_of("Antártida"), None);
    }

    #[test]
    fn test_resolve_regions_union() {
        let catalog = Catalog::builtin();
        let members = catalog.resolve_regions(["Norte América", "Oceanía", "Unknown"]);
        assert_eq!(members.len(), 4);
        assert!(members.contains("Canadá"));
        assert!(members.contains("Australia"));
    }

    #[test]
    fn test_label_fallback() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.label_of("25"), "Media-alta (20–30%)");
        assert_eq!(catalog.label_of("42"), "42");
    }

    #[test]
    fn test_fracking_membership() {
        let catalog = Catalog::builtin();
        assert!(catalog.is_fracking_country("Argentina"));
        assert!(!catalog.is_fracking_country("Noruega"));
    }

    #[test]
    fn test_override_keeps_missing_sections() {
        let catalog = Catalog::from_json(
            r#"{ "regions": [
                { "name": "Eurasia", "countries": ["Rusia", "Kazajistán"] },
                { "name": "Europa", "countries": ["Noruega", "Rusia"] }
            ] }"#,
        )
        .unwrap();

        assert_eq!(catalog.regions().len(), 2);
        assert_eq!(catalog.region_of("Rusia"), Some("Eurasia"));
        assert_eq!(catalog.overlapping_countries()["Rusia"], vec!["Eurasia", "Europa"]);
        assert_eq!(catalog.category_labels().len(), 6);
        assert!(catalog.is_fracking_country("China"));
    }

    #[test]
    fn test_override_rejects_unnamed_region() {
        let result = Catalog::from_json(r#"{ "regions": [{ "name": " ", "countries": [] }] }"#);
        assert!(matches!(result, Err(CatalogError::Invalid(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "frackingCountries": ["Noruega"] }}"#).unwrap();

        let catalog = Catalog::from_file(file.path()).unwrap();
        assert!(catalog.is_fracking_country("Noruega"));
        assert!(!catalog.is_fracking_country("China"));
    }

    #[test]
    fn test_builtin_ref_matches_builtin() {
        assert_eq!(Catalog::builtin_ref(), &Catalog::builtin());
    }
}
