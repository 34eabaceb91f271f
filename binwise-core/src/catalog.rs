//! Store for all region catalogs, validated once when it is built.

use std::collections::{HashMap, HashSet};
use std::iter;

use tracing::{debug, info};

use crate::classify::keyword_match;
use crate::model::{MaterialClass, RegionCatalog, RegionCode, RegionMeta};

#[derive(thiserror::Error, Debug)]
/// Problems found while loading or validating region catalogs.
pub enum CatalogError {
    /// Catalog document is not valid JSON for the catalog schema.
    #[error("Failed to parse catalog {source_name}: {error}")]
    Parse {
        /// Name of the document that failed.
        source_name: String,
        /// Underlying decoder error.
        #[source]
        error: serde_json::Error,
    },
    /// Region code is empty or not plain ASCII letters.
    #[error("Invalid region code {0:?}")]
    InvalidCode(String),
    /// Region has no bins at all.
    #[error("Region {0} has no bins")]
    EmptyCatalog(RegionCode),
    /// A bin has a blank name.
    #[error("Region {0} has a bin without a name")]
    BlankBinName(RegionCode),
    /// Two bins share a name.
    #[error("Region {region} declares bin {name:?} twice")]
    DuplicateBin {
        /// Region concerned.
        region: RegionCode,
        /// Repeated bin name.
        name: String,
    },
    /// No bin matches the general-waste keywords.
    #[error("Region {0} has no general waste bin")]
    MissingFallback(RegionCode),
    /// Two catalogs share a region code.
    #[error("Region {0} is declared twice")]
    DuplicateRegion(RegionCode),
    /// A region referenced by the store configuration does not exist.
    #[error("Unknown region {0}")]
    UnknownRegion(RegionCode),
}

/// Parse one catalog from its JSON document and validate it.
///
/// # Errors
///
/// Returns [`CatalogError::Parse`] for malformed JSON and any
/// [`validate_catalog`] error for well-formed but invalid data.
pub fn parse_catalog(json: &str, source_name: &str) -> Result<RegionCatalog, CatalogError> {
    let catalog: RegionCatalog =
        serde_json::from_str(json).map_err(|error| CatalogError::Parse {
            source_name: source_name.to_owned(),
            error,
        })?;
    validate_catalog(&catalog)?;
    debug!(region = %catalog.code, bins = catalog.bins.len(), source_name, "catalog parsed");
    Ok(catalog)
}

/// Check the invariants the classifier relies on.
///
/// # Errors
///
/// Returns the first violated invariant: a malformed code, an empty bin list,
/// blank or repeated bin names, or no bin usable as general-waste fallback.
pub fn validate_catalog(catalog: &RegionCatalog) -> Result<(), CatalogError> {
    let code = catalog.code.as_str();
    if code.is_empty() || !code.chars().all(|character| character.is_ascii_alphabetic()) {
        return Err(CatalogError::InvalidCode(code.to_owned()));
    }

    if catalog.bins.is_empty() {
        return Err(CatalogError::EmptyCatalog(catalog.code.clone()));
    }

    let mut names = HashSet::new();
    for bin in &catalog.bins {
        if bin.name.trim().is_empty() {
            return Err(CatalogError::BlankBinName(catalog.code.clone()));
        }
        if !names.insert(bin.name.as_str()) {
            return Err(CatalogError::DuplicateBin {
                region: catalog.code.clone(),
                name: bin.name.clone(),
            });
        }
    }

    if keyword_match(catalog, MaterialClass::Trash).is_none() {
        return Err(CatalogError::MissingFallback(catalog.code.clone()));
    }

    Ok(())
}

/// Immutable set of region catalogs with a designated default region.
pub struct CatalogStore {
    default: RegionCatalog,
    others: HashMap<RegionCode, RegionCatalog>,
    pinned: RegionCode,
}

impl CatalogStore {
    /// Build a store from validated-on-entry catalogs.
    ///
    /// The default region is also the region pinned first in [`Self::regions`].
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when a catalog is invalid, a region code is
    /// repeated, or `default_region` is not among the catalogs.
    pub fn new(
        catalogs: Vec<RegionCatalog>,
        default_region: &RegionCode,
    ) -> Result<Self, CatalogError> {
        let mut default = None;
        let mut others = HashMap::new();

        for catalog in catalogs {
            validate_catalog(&catalog)?;
            let duplicate = others.contains_key(&catalog.code)
                || default
                    .as_ref()
                    .is_some_and(|existing: &RegionCatalog| existing.code == catalog.code);
            if duplicate {
                return Err(CatalogError::DuplicateRegion(catalog.code));
            }

            if &catalog.code == default_region {
                default = Some(catalog);
            } else {
                others.insert(catalog.code.clone(), catalog);
            }
        }

        let default = default.ok_or_else(|| CatalogError::UnknownRegion(default_region.clone()))?;
        info!(default = %default.code, regions = others.len() + 1, "catalog store ready");

        Ok(Self {
            pinned: default.code.clone(),
            default,
            others,
        })
    }

    /// Pin a different region to the top of [`Self::regions`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownRegion`] when the region is not in the store.
    pub fn with_pinned(mut self, region: &RegionCode) -> Result<Self, CatalogError> {
        if self.lookup(region).is_none() {
            return Err(CatalogError::UnknownRegion(region.clone()));
        }
        self.pinned = region.clone();
        Ok(self)
    }

    /// Catalog for a region, or the default region's catalog when the code is unknown.
    #[must_use]
    pub fn catalog(&self, region: &RegionCode) -> &RegionCatalog {
        self.lookup(region).unwrap_or_else(|| {
            debug!(%region, default = %self.default.code, "unknown region, using default");
            &self.default
        })
    }

    /// Catalog for a region, without falling back.
    #[must_use]
    pub fn lookup(&self, region: &RegionCode) -> Option<&RegionCatalog> {
        if region == &self.default.code {
            Some(&self.default)
        } else {
            self.others.get(region)
        }
    }

    /// The region used for unknown codes.
    #[must_use]
    pub fn default_region(&self) -> &RegionCode {
        &self.default.code
    }

    /// Region metadata: the pinned region first, the rest sorted by display name.
    #[must_use]
    pub fn regions(&self) -> Vec<RegionMeta> {
        let mut regions: Vec<RegionMeta> = self.catalogs().map(RegionCatalog::meta).collect();
        regions.sort_by(|left, right| {
            (left.code != self.pinned, &left.name).cmp(&(right.code != self.pinned, &right.name))
        });
        regions
    }

    /// Iterator over every catalog, in no particular order.
    pub fn catalogs(&self) -> impl Iterator<Item = &RegionCatalog> {
        iter::once(&self.default).chain(self.others.values())
    }
}
