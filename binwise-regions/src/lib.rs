//! Built-in region catalogs, embedded at compile time and validated on load.
//!
//! Each region lives in its own JSON document under `data/`. Bins are listed
//! in match priority order, so specific bins (glass banks) come before
//! mixed ones and general waste sits after everything it should not swallow.

use std::sync::Arc;

use tracing::debug;

use binwise_core::{CatalogError, CatalogStore, RegionCatalog, RegionCode, parse_catalog};

/// Region used for unknown codes unless configured otherwise.
pub const DEFAULT_REGION: &str = "US";

const SOURCES: &[(&str, &str)] = &[
    ("be.json", include_str!("../data/be.json")),
    ("de.json", include_str!("../data/de.json")),
    ("es.json", include_str!("../data/es.json")),
    ("fr.json", include_str!("../data/fr.json")),
    ("gb.json", include_str!("../data/gb.json")),
    ("jp.json", include_str!("../data/jp.json")),
    ("us.json", include_str!("../data/us.json")),
];

/// Parse every built-in catalog.
///
/// # Errors
///
/// Returns the first [`CatalogError`] encountered; built-in data is expected
/// to be valid, so an error here is a packaging bug.
pub fn catalogs() -> Result<Vec<RegionCatalog>, CatalogError> {
    SOURCES
        .iter()
        .map(|(source_name, json)| {
            let catalog = parse_catalog(json, source_name)?;
            debug!(region = %catalog.code, bins = catalog.bins.len(), "loaded built-in catalog");
            Ok(catalog)
        })
        .collect()
}

/// Store over the built-in catalogs with [`DEFAULT_REGION`] as default.
///
/// # Errors
///
/// See [`catalogs`] and [`CatalogStore::new`].
pub fn store() -> Result<Arc<CatalogStore>, CatalogError> {
    store_with_default(&RegionCode::new(DEFAULT_REGION))
}

/// Store over the built-in catalogs with a caller-chosen default region.
///
/// # Errors
///
/// Returns [`CatalogError::UnknownRegion`] when `default_region` is not built in.
pub fn store_with_default(default_region: &RegionCode) -> Result<Arc<CatalogStore>, CatalogError> {
    CatalogStore::new(catalogs()?, default_region).map(Arc::new)
}
