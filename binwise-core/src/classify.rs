//! First-match bin classification for material labels and free-text queries.
//!
//! Bins are scanned in catalog order and the first match wins, so a region's
//! catalog must list specific bins before generic ones. None of these
//! functions fail: an unmatched label lands in the region's general-waste
//! bin, and broken region data yields a hard-coded general-waste result.

use tracing::{debug, warn};

use crate::model::{
    BinDefinition, ClassificationResult, MatchKind, MaterialClass, RegionCatalog, SearchOutcome,
};

/// Advice attached when an item had to fall back to general waste.
pub const FALLBACK_ADVICE: &str =
    "No dedicated bin found; use general waste and check local guidelines.";

/// Advice attached to the hard-coded result for unusable region data.
pub const TERMINAL_ADVICE: &str = "Check local guidelines.";

/// Name of the hard-coded bin returned for unusable region data.
pub const TERMINAL_BIN_NAME: &str = "General Waste";

/// Order in which free-text queries are tested against material vocabularies.
///
/// Specific materials come first so that "battery pack" or "glass jar" do not
/// get claimed by a broader class.
pub const SEARCH_ORDER: [MaterialClass; 9] = [
    MaterialClass::Battery,
    MaterialClass::Ewaste,
    MaterialClass::Glass,
    MaterialClass::Metal,
    MaterialClass::Cardboard,
    MaterialClass::Paper,
    MaterialClass::Plastic,
    MaterialClass::Organic,
    MaterialClass::Trash,
];

/// Classify a label produced by the image classifier.
///
/// Unknown labels are treated as general waste and reported as a fallback,
/// never as a direct Trash match.
#[must_use]
pub fn classify_label(catalog: &RegionCatalog, label: &str) -> ClassificationResult {
    match MaterialClass::from_label(label) {
        Some(material) => classify_material(catalog, material),
        None => {
            debug!(label, region = %catalog.code, "unmapped label, using general waste");
            general_waste(catalog, MaterialClass::Trash)
        }
    }
}

/// Classify a known material class.
#[must_use]
pub fn classify_material(catalog: &RegionCatalog, material: MaterialClass) -> ClassificationResult {
    match find_bin(catalog, material) {
        Some((bin, matched_by)) => ClassificationResult {
            bin: bin.clone(),
            material,
            advice: material.advice().to_owned(),
            matched_by,
        },
        None => general_waste(catalog, material),
    }
}

/// Classify a free-text query such as "banana peel".
///
/// Returns [`SearchOutcome::NotFound`] when the query names no known material,
/// which callers should render differently from a general-waste result.
#[must_use]
pub fn classify_query(catalog: &RegionCatalog, query: &str) -> SearchOutcome {
    match detect_material(catalog, query) {
        Some(material) => SearchOutcome::Found(classify_material(catalog, material)),
        None => SearchOutcome::NotFound,
    }
}

/// Material named by a free-text query, if any.
///
/// A query names a material when it contains the material's name or one of
/// its keywords, including the region's local keywords.
#[must_use]
pub fn detect_material(catalog: &RegionCatalog, query: &str) -> Option<MaterialClass> {
    let trimmed = query.trim().to_lowercase();
    if trimmed.is_empty() {
        return None;
    }
    // Padded so whole-word keywords like " can " also match at either end.
    let needle = format!(" {trimmed} ");

    SEARCH_ORDER.into_iter().find(|material| {
        needle.contains(&material.name().to_lowercase())
            || catalog
                .keywords_for(*material)
                .iter()
                .any(|keyword| needle.contains(keyword.as_str()))
    })
}

/// First bin whose name or description mentions one of the material's keywords.
#[must_use]
pub fn keyword_match(catalog: &RegionCatalog, material: MaterialClass) -> Option<&BinDefinition> {
    let keywords = catalog.keywords_for(material);
    catalog.bins.iter().find(|bin| {
        let name = bin.name.to_lowercase();
        let description = bin.description.to_lowercase();
        keywords
            .iter()
            .any(|keyword| name.contains(keyword.as_str()) || description.contains(keyword.as_str()))
    })
}

/// First bin with an example item that mentions the material name.
#[must_use]
pub fn example_match(catalog: &RegionCatalog, material: MaterialClass) -> Option<&BinDefinition> {
    let material_name = material.name().to_lowercase();
    catalog.bins.iter().find(|bin| {
        bin.example_items
            .iter()
            .any(|item| item.to_lowercase().contains(&material_name))
    })
}

fn find_bin(
    catalog: &RegionCatalog,
    material: MaterialClass,
) -> Option<(&BinDefinition, MatchKind)> {
    keyword_match(catalog, material)
        .map(|bin| (bin, MatchKind::Keyword))
        .or_else(|| example_match(catalog, material).map(|bin| (bin, MatchKind::ExampleItem)))
}

fn general_waste(catalog: &RegionCatalog, material: MaterialClass) -> ClassificationResult {
    let Some((bin, _)) = find_bin(catalog, MaterialClass::Trash) else {
        warn!(region = %catalog.code, %material, "region has no general waste bin");
        return terminal(material);
    };

    ClassificationResult {
        bin: bin.clone(),
        material,
        advice: FALLBACK_ADVICE.to_owned(),
        matched_by: MatchKind::Fallback,
    }
}

fn terminal(material: MaterialClass) -> ClassificationResult {
    ClassificationResult {
        bin: BinDefinition {
            name: TERMINAL_BIN_NAME.to_owned(),
            color: "gray".to_owned(),
            description: String::new(),
            example_items: Vec::new(),
            notes: None,
        },
        material,
        advice: TERMINAL_ADVICE.to_owned(),
        matched_by: MatchKind::Terminal,
    }
}
