//! End-to-end classification against hand-built catalogs.
//!
//! Covers the never-fail guarantees: odd labels, odd queries, catalogs
//! without a general-waste bin, and unknown region codes.

use std::collections::BTreeMap;

use binwise_core::{
    BinDefinition, CatalogStore, MatchKind, MaterialClass, RegionCatalog, RegionCode,
    SearchOutcome, TERMINAL_ADVICE, TERMINAL_BIN_NAME, classify_label, classify_query,
};

fn bin(name: &str, description: &str) -> BinDefinition {
    BinDefinition {
        name: name.to_owned(),
        color: "gray".to_owned(),
        description: description.to_owned(),
        example_items: Vec::new(),
        notes: None,
    }
}

fn catalog(code: &str, name: &str, bins: Vec<BinDefinition>) -> RegionCatalog {
    RegionCatalog {
        code: RegionCode::new(code),
        name: name.to_owned(),
        bins,
        keywords: BTreeMap::new(),
    }
}

fn town() -> RegionCatalog {
    catalog(
        "TT",
        "Testtown",
        vec![
            bin("Glass Bank", "Bottles and jars made of glass"),
            bin("Blue Bin", "Paper, cardboard and plastic bottles"),
            bin("Compost", "Food scraps and garden waste"),
            bin("Residual", "General waste"),
        ],
    )
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

#[test]
fn every_label_yields_a_result() {
    let catalog = town();
    let labels = [
        "", " ", "Plastic", "plastic", "PLASTIC", "E-waste", "e_waste", "Batteries",
        "Styrofoam", "🍌", "null", "Organic\n", "a very long label that means nothing",
    ];
    for label in labels {
        let result = classify_label(&catalog, label);
        assert!(!result.bin.name.is_empty(), "label {label:?}");
        assert!(!result.advice.is_empty(), "label {label:?}");
    }
}

#[test]
fn specific_bin_beats_general_bin() {
    let result = classify_label(&town(), "Glass");
    assert_eq!(result.bin.name, "Glass Bank");
    assert_eq!(result.matched_by, MatchKind::Keyword);
}

#[test]
fn class_without_bin_falls_back_to_general_waste() {
    let result = classify_label(&town(), "Battery");
    assert_eq!(result.bin.name, "Residual");
    assert_eq!(result.material, MaterialClass::Battery);
    assert_eq!(result.matched_by, MatchKind::Fallback);
}

#[test]
fn empty_catalog_returns_terminal_result() {
    let empty = catalog("XX", "Nowhere", Vec::new());
    for material in MaterialClass::ALL {
        let result = classify_label(&empty, material.name());
        assert_eq!(result.bin.name, TERMINAL_BIN_NAME);
        assert_eq!(result.advice, TERMINAL_ADVICE);
        assert_eq!(result.matched_by, MatchKind::Terminal);
    }
}

#[test]
fn catalog_without_general_waste_returns_terminal_for_unmatched() {
    let only_glass = catalog("GG", "Glassville", vec![bin("Glass Bank", "Glass only")]);
    assert_eq!(classify_label(&only_glass, "Glass").bin.name, "Glass Bank");
    assert_eq!(
        classify_label(&only_glass, "Metal").matched_by,
        MatchKind::Terminal
    );
}

// ---------------------------------------------------------------------------
// Free-text search
// ---------------------------------------------------------------------------

#[test]
fn search_finds_material_inside_phrase() {
    let SearchOutcome::Found(result) = classify_query(&town(), "  Banana PEEL ") else {
        panic!("banana peel should be found");
    };
    assert_eq!(result.material, MaterialClass::Organic);
    assert_eq!(result.bin.name, "Compost");
}

#[test]
fn search_without_material_is_not_found() {
    for query in ["", "   ", "asdfgh", "zzz 123"] {
        assert_eq!(classify_query(&town(), query), SearchOutcome::NotFound, "{query:?}");
    }
}

#[test]
fn repeated_queries_give_identical_answers() {
    let catalog = town();
    for query in ["banana peel", "asdfgh", "old newspaper"] {
        let first = classify_query(&catalog, query);
        for _ in 0..3 {
            assert_eq!(classify_query(&catalog, query), first, "{query:?}");
        }
    }
}

#[test]
fn specific_material_wins_in_search() {
    let SearchOutcome::Found(result) = classify_query(&town(), "glass jar of food") else {
        panic!("should be found");
    };
    assert_eq!(result.material, MaterialClass::Glass);
}

#[test]
fn local_keywords_extend_search() {
    let mut local = town();
    local
        .keywords
        .insert(MaterialClass::Organic, vec!["Bioabfall".to_owned()]);

    let SearchOutcome::Found(result) = classify_query(&local, "bioabfall") else {
        panic!("local keyword should be found");
    };
    assert_eq!(result.material, MaterialClass::Organic);
    assert_eq!(classify_query(&town(), "bioabfall"), SearchOutcome::NotFound);
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[test]
fn unknown_region_classifies_like_default() {
    let store = CatalogStore::new(
        vec![
            town(),
            catalog(
                "OT",
                "Othertown",
                vec![bin("Everything", "General waste and glass")],
            ),
        ],
        &RegionCode::new("TT"),
    )
    .expect("valid store");

    for material in MaterialClass::ALL {
        let unknown = classify_label(store.catalog(&RegionCode::new("??")), material.name());
        let default = classify_label(store.catalog(&RegionCode::new("TT")), material.name());
        assert_eq!(unknown, default, "{material}");
    }
}

#[test]
fn region_codes_are_case_insensitive() {
    let store = CatalogStore::new(vec![town()], &RegionCode::new("tt")).expect("valid store");
    assert_eq!(store.catalog(&RegionCode::new(" tt ")).name, "Testtown");
}
