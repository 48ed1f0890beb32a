//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zest.
//! The Zest project belongs to the Dunimd Team.

use zest::text::keywords::{ZeKeywordRule, ZeKeywordTable, DEFAULT_SUGGESTION};
use zest::text::reconstruct::{
    extract_content, reconstruct, strip_self_reference, ZeExtractStrategy, ZeReconstructor,
};
use zest::text::punctuation::normalize_separators;
use zest::text::terms::ZeTermSet;
use zest::text::theme::{ZeTheme, ZeThemeConfig};

#[test]
fn test_keyword_precedence() {
    let table = ZeKeywordTable::new(
        vec![
            ZeKeywordRule::new("gaza", "za'atar, roasted eggplant and olive oil"),
            ZeKeywordRule::new("chicken", "grilled chicken, sumac and zataar"),
        ],
        DEFAULT_SUGGESTION,
    )
    .unwrap();
    assert_eq!(
        table.suggest("Spicy Chicken Supreme"),
        "grilled chicken, sumac and zataar"
    );
    assert_eq!(
        ZeKeywordTable::builtin().suggest("Spicy Chicken Supreme"),
        "grilled chicken, sumac and zataar"
    );
}

#[test]
fn test_farmers_market_extraction() {
    let name = "The Farmers Market";
    let description = "Farmers Market pizza. Topped with roasted vegetables and herbs.";

    let extraction = extract_content(&normalize_separators(description), name);
    assert_eq!(extraction.content, "roasted vegetables and herbs");
    assert_eq!(extraction.strategy, ZeExtractStrategy::ToppedWith);

    assert_eq!(
        reconstruct(name, description, &ZeKeywordTable::builtin()),
        "Topped with roasted vegetables and herbs. Palestinian-inspired: \
         roasted market vegetables, herbed labneh, za'atar and a tahini drizzle."
    );
}

#[test]
fn test_self_reference_is_stripped() {
    let name = "The Hebron Special";
    let description = "The Hebron Special - smoked paprika and peppers";

    let content = strip_self_reference(&normalize_separators(description), name);
    assert!(!content.contains(name));

    let detailed = ZeReconstructor::default().reconstruct_detailed(name, description);
    assert_eq!(detailed.strategy, ZeExtractStrategy::WholeText);
    assert_eq!(detailed.content, "smoked paprika and peppers");
    assert_eq!(
        detailed.description,
        "Topped with smoked paprika and peppers. Palestinian-inspired: \
         smoked paprika, red pepper and zataar notes."
    );
}

#[test]
fn test_name_prefix_extraction() {
    let out = ZeReconstructor::default().reconstruct_detailed(
        "The Jericho",
        "The Jericho pizza. Sweet peppers, citrus glaze",
    );
    assert_eq!(out.strategy, ZeExtractStrategy::NamePrefix);
    assert_eq!(
        out.description,
        "Topped with Sweet peppers, citrus glaze. Palestinian-inspired: \
         sweet chili, citrus and grilled vegetables."
    );
}

#[test]
fn test_old_theme_sentence_is_replaced() {
    let out = ZeReconstructor::default().reconstruct(
        "The Gaza Classic",
        "Topped with eggplant and feta. Inspired by Palestinian flavors: olives.",
    );
    assert_eq!(
        out,
        "Topped with eggplant and feta. Palestinian-inspired: za'atar, roasted eggplant and olive oil."
    );
}

#[test]
fn test_reconstructing_twice_is_stable() {
    let recon = ZeReconstructor::default();
    let inputs = [
        ("The Farmers Market", "Farmers Market pizza. Topped with roasted vegetables and herbs."),
        ("The Hebron Special", "The Hebron Special - smoked paprika and peppers"),
        ("BBQ Ckn", "Topped with: chicken \u{2013} onions ,, cilantro"),
        ("The Margherita", ""),
        ("", "Basil. Palestinian-inspired: tomato"),
    ];
    for (name, description) in inputs {
        let once = recon.reconstruct(name, description);
        assert!(!once.is_empty());
        assert_eq!(recon.reconstruct(name, &once), once, "{name}: {description}");
    }
}

#[test]
fn test_banned_terms_filtered_before_reconstruction() {
    let recon = ZeReconstructor::default()
        .with_banned_terms(ZeTermSet::from_literals(["ham", "pork"]).unwrap());
    let out = recon.reconstruct("The Haifa", "Topped with ham, olives, pineapple.");
    assert_eq!(
        out,
        "Topped with olives, pineapple. Palestinian-inspired: \
         smoked turkey alternative, olives and pineapple."
    );
}

#[test]
fn test_custom_theme_and_table() {
    let theme = ZeTheme::from_config(&ZeThemeConfig {
        label: "Levantine".to_string(),
        markers: vec!["A taste of the Levant:".to_string()],
    })
    .unwrap();
    let table =
        ZeKeywordTable::new(vec![ZeKeywordRule::new("mezze", "hummus and olives")], "sumac").unwrap();
    let recon = ZeReconstructor::new(theme, table);

    assert_eq!(
        recon.reconstruct("Mezze Board", "Flatbread. A taste of the Levant: dates"),
        "Topped with Flatbread. Levantine-inspired: hummus and olives."
    );
    assert_eq!(
        recon.reconstruct("Plain", "Cheese"),
        "Topped with Cheese. Levantine-inspired: sumac."
    );
}
