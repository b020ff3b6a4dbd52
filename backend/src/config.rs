//! Application configuration.
//!
//! Defaults are compiled in. The environment (optionally via a `.env`
//! file loaded by the binary) overrides them, and command-line flags
//! override the environment.

use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::error::CatalogResult;

/// Default dataset location, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "public/oil_data.json";

/// Environment variable holding the dataset path.
pub const DATA_PATH_ENV: &str = "OILBOARD_DATA";

/// Environment variable holding an optional catalog override file.
pub const CATALOG_PATH_ENV: &str = "OILBOARD_CATALOG";

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Input document.
    pub data_path: PathBuf,
    /// Catalog override file; built-in tables when `None`.
    pub catalog_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            catalog_path: None,
        }
    }
}

impl Config {
    /// Read the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from);

        Self {
            data_path: get(DATA_PATH_ENV).unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            catalog_path: get(CATALOG_PATH_ENV),
        }
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, data_path: Option<PathBuf>, catalog_path: Option<PathBuf>) -> Self {
        if let Some(path) = data_path {
            self.data_path = path;
        }
        if let Some(path) = catalog_path {
            self.catalog_path = Some(path);
        }
        self
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// The catalog to run with: the override file when configured,
    /// the built-in tables otherwise.
    pub fn load_catalog(&self) -> CatalogResult<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::from_file(path),
            None => Ok(Catalog::builtin()),
        }
    }
}
