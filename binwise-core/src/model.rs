//! Domain data structures for regions, bins, and material classes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// Identifier for a region with its own bin catalog, e.g. `DE` or `JP`.
///
/// Codes are stored upper-case so lookups ignore the caller's casing.
pub struct RegionCode(String);

impl RegionCode {
    /// Normalize a raw code into a region identifier.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_ascii_uppercase())
    }

    /// The normalized code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl From<String> for RegionCode {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<&str> for RegionCode {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<RegionCode> for String {
    fn from(code: RegionCode) -> Self {
        code.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Metadata describing a region and its human-friendly name.
pub struct RegionMeta {
    /// Unique identifier.
    pub code: RegionCode,
    /// Display name.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One disposal category within a region.
pub struct BinDefinition {
    /// Display label, unique within the region.
    pub name: String,
    /// Presentation hint such as `yellow` or `blue`.
    pub color: String,
    /// What belongs in the bin.
    pub description: String,
    /// Illustrative items, in display order.
    #[serde(default)]
    pub example_items: Vec<String>,
    /// Extra remarks shown next to the bin, never used for matching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Ordered bin list for one region plus its local matching vocabulary.
pub struct RegionCatalog {
    /// Region identifier.
    pub code: RegionCode,
    /// Display name of the region.
    pub name: String,
    /// Bins in match priority order: earlier bins win ties.
    pub bins: Vec<BinDefinition>,
    /// Local-language keywords appended to a material's English keywords
    /// for this region only.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub keywords: BTreeMap<MaterialClass, Vec<String>>,
}

impl RegionCatalog {
    /// Metadata for this region.
    #[must_use]
    pub fn meta(&self) -> RegionMeta {
        RegionMeta {
            code: self.code.clone(),
            name: self.name.clone(),
        }
    }

    /// Lower-cased keywords for a material: the English set followed by the
    /// region's own additions.
    #[must_use]
    pub fn keywords_for(&self, material: MaterialClass) -> Vec<String> {
        let local = self
            .keywords
            .get(&material)
            .into_iter()
            .flatten()
            .map(|keyword| keyword.trim().to_lowercase())
            .filter(|keyword| !keyword.is_empty());

        material
            .keywords()
            .iter()
            .map(|keyword| (*keyword).to_owned())
            .chain(local)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Material categories an item can be sorted into.
pub enum MaterialClass {
    /// Paper, newspapers, magazines.
    Paper,
    /// Cardboard and paperboard.
    Cardboard,
    /// Plastic containers and packaging.
    Plastic,
    /// Glass bottles and jars.
    Glass,
    /// Cans, foil, and other metal.
    Metal,
    /// Food and garden waste.
    Organic,
    /// General, non-recyclable waste.
    Trash,
    /// Batteries and other hazardous items.
    Battery,
    /// Electronic and electrical devices.
    Ewaste,
}

impl MaterialClass {
    /// Every class in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Paper,
        Self::Cardboard,
        Self::Plastic,
        Self::Glass,
        Self::Metal,
        Self::Organic,
        Self::Trash,
        Self::Battery,
        Self::Ewaste,
    ];

    /// Human-readable class name, as emitted by the image classifier.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Paper => "Paper",
            Self::Cardboard => "Cardboard",
            Self::Plastic => "Plastic",
            Self::Glass => "Glass",
            Self::Metal => "Metal",
            Self::Organic => "Organic",
            Self::Trash => "Trash",
            Self::Battery => "Battery",
            Self::Ewaste => "E-waste",
        }
    }

    /// Lower-case English keywords searched for in bin names and descriptions.
    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Paper => &["paper", "newspaper", "magazine", "newsprint"],
            Self::Cardboard => &["cardboard", "corrugated", "paperboard"],
            Self::Plastic => &["plastic", "polystyrene", "styrofoam", "pet bottle"],
            Self::Glass => &["glass", "jar"],
            Self::Metal => &[
                "metal",
                "aluminium",
                "aluminum",
                "tin can",
                "soda can",
                " can ",
                "cans",
                "steel",
                "foil",
            ],
            Self::Organic => &[
                "organic",
                "compost",
                "food",
                "garden",
                "banana",
                "peel",
                "fruit",
                "vegetable",
                "coffee grounds",
                "leaves",
            ],
            Self::Trash => &[
                "general waste",
                "trash",
                "residual",
                "landfill",
                "garbage",
                "rubbish",
                "non-recyclable",
            ],
            Self::Battery => &["battery", "batteries", "hazardous"],
            Self::Ewaste => &[
                "e-waste",
                "electronic",
                "electrical",
                "appliance",
                "phone",
                "laptop",
                "charger",
                "cable",
            ],
        }
    }

    /// Short sorting advice shown next to the recommended bin.
    #[must_use]
    pub const fn advice(self) -> &'static str {
        match self {
            Self::Paper => "Keep paper clean and dry; greasy or wet paper goes to general waste.",
            Self::Cardboard => "Flatten boxes and remove tape before putting them out.",
            Self::Plastic => "Empty and rinse containers; leave caps on unless told otherwise.",
            Self::Glass => "Remove lids and sort by color where the bank asks for it.",
            Self::Metal => "Rinse cans; aluminium foil can be balled up and recycled.",
            Self::Organic => "No plastic bags in the organic bin, even compostable ones.",
            Self::Trash => "Only put items here that no other bin accepts.",
            Self::Battery => "Never put batteries in household bins; tape lithium terminals.",
            Self::Ewaste => "Wipe personal data and hand devices in at a collection point.",
        }
    }

    /// Parse a classifier label such as `Plastic` or `E-waste`.
    ///
    /// Matching ignores case, surrounding whitespace, and `-`/`_`/space separators.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized: String = label
            .trim()
            .chars()
            .filter(|character| !matches!(character, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();

        let material = match normalized.as_str() {
            "paper" => Self::Paper,
            "cardboard" => Self::Cardboard,
            "plastic" | "plastics" => Self::Plastic,
            "glass" => Self::Glass,
            "metal" | "metals" => Self::Metal,
            "organic" | "organics" | "compost" | "compostable" => Self::Organic,
            "trash" => Self::Trash,
            "battery" | "batteries" => Self::Battery,
            "ewaste" => Self::Ewaste,
            _ => return None,
        };
        Some(material)
    }
}

impl fmt::Display for MaterialClass {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// How a classification result was reached.
pub enum MatchKind {
    /// A material keyword occurred in the bin name or description.
    Keyword,
    /// A bin example item mentioned the material name.
    ExampleItem,
    /// No specific bin matched; the region's general-waste bin was used.
    Fallback,
    /// The region data had no usable general-waste bin.
    Terminal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Bin recommendation for one classified item.
pub struct ClassificationResult {
    /// Recommended bin.
    pub bin: BinDefinition,
    /// Material class the recommendation was made for.
    pub material: MaterialClass,
    /// Sorting advice.
    pub advice: String,
    /// Matching step that produced the bin.
    pub matched_by: MatchKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
/// Result of a free-text lookup.
pub enum SearchOutcome {
    /// The query named a known material.
    Found(ClassificationResult),
    /// The query named no known material.
    NotFound,
}

impl SearchOutcome {
    /// The classification, if any.
    #[must_use]
    pub fn result(&self) -> Option<&ClassificationResult> {
        match self {
            Self::Found(result) => Some(result),
            Self::NotFound => None,
        }
    }
}
