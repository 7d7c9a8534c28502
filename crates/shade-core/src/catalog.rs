//! Foundation shade catalog.
//!
//! Maps `"<depth>_<undertone>"` keys to curated shade lists. The built-in
//! catalog is embedded at compile time from `contrib/catalog/shades.toml`
//! and parsed once per process. Alternative catalogs can be loaded from
//! TOML for tests or deployments with a different product line.

use crate::types::{catalog_key, Depth, Undertone};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use thiserror::Error;

/// Compile-time embedded built-in catalog.
const BUILTIN_CATALOG: &str = include_str!("../../../contrib/catalog/shades.toml");

static DEFAULT_CATALOG: OnceLock<Arc<ShadeCatalog>> = OnceLock::new();

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level catalog file structure.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    shades: BTreeMap<String, Vec<String>>,
}

/// Read-only shade table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShadeCatalog {
    entries: BTreeMap<String, Vec<String>>,
}

impl ShadeCatalog {
    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into_iter().map(Into::into).collect()))
                .collect(),
        }
    }

    /// Parse a catalog from TOML text with a `[shades]` table.
    pub fn from_toml_str(src: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(src)?;
        Ok(Self { entries: file.shades })
    }

    /// Load a catalog file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_toml_str(&src)?;
        tracing::info!(path = %path.display(), entries = catalog.len(), "loaded shade catalog");
        Ok(catalog)
    }

    /// Shades for a raw key, in presentation order.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Shades for a depth/undertone pair. Empty when uncataloged.
    pub fn shades_for(&self, depth: Depth, undertone: Undertone) -> &[String] {
        self.get(&catalog_key(depth, undertone)).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Depth/undertone keys that are absent or have no shades.
    pub fn missing_keys(&self) -> Vec<String> {
        Depth::ALL
            .into_iter()
            .flat_map(|depth| Undertone::ALL.into_iter().map(move |undertone| catalog_key(depth, undertone)))
            .filter(|key| self.get(key).map_or(true, |shades| shades.is_empty()))
            .collect()
    }

    /// Keys that no classification can ever produce.
    pub fn unknown_keys(&self) -> Vec<&str> {
        self.entries
            .keys()
            .filter(|key| !is_known_key(key))
            .map(String::as_str)
            .collect()
    }
}

fn is_known_key(key: &str) -> bool {
    key.split_once('_').is_some_and(|(depth, undertone)| {
        depth.parse::<Depth>().is_ok() && undertone.parse::<Undertone>().is_ok()
    })
}

/// The built-in catalog, parsed on first use.
pub fn default_catalog() -> Arc<ShadeCatalog> {
    DEFAULT_CATALOG
        .get_or_init(|| match ShadeCatalog::from_toml_str(BUILTIN_CATALOG) {
            Ok(catalog) => Arc::new(catalog),
            Err(e) => {
                tracing::error!(error = %e, "built-in shade catalog is invalid; recommendations will be empty");
                Arc::new(ShadeCatalog::default())
            }
        })
        .clone()
}
