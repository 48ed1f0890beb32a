//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zest.
//! The Zest project belongs to the Dunimd Team.

use proptest::prelude::*;
use zest::text::reconstruct::ZeReconstructor;
use zest::text::terms::{filter_terms, ZeTermSet};

const WORDS: &[&str] = &[
    "olives",
    "feta",
    "roasted peppers",
    "za'atar",
    "sumac",
    "red onions",
    "ham",
    "smoked ham",
    "sliced pork",
    "pork",
    "Bacon",
    "mozzarella",
    "basil",
    "mushrooms",
    "pineapple",
    "garlic",
];

const SEPARATORS: &[&str] = &[
    " ",
    ", ",
    " - ",
    " \u{2013} ",
    " \u{2014} ",
    ". ",
    " ,, ",
    ", . ",
    "-",
];

const NAMES: &[&str] = &[
    "",
    "The Gaza Classic",
    "The Hebron Special",
    "Spicy Chicken Supreme",
    "BBQ Ckn",
    "The Farmers Market",
    "The Margherita",
];

const SUFFIXES: &[&str] = &[
    "",
    ".",
    ". Palestinian-inspired: sumac",
    " Inspired by Palestine: herbs.",
    ". Inspired by Palestinian flavors: olives",
];

fn banned() -> ZeTermSet {
    ZeTermSet::from_literals(["smoked ham", "sliced pork", "ham", "pork"]).unwrap()
}

fn body() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (prop::sample::select(WORDS), prop::sample::select(SEPARATORS)),
        1..8,
    )
    .prop_map(|parts| {
        let mut text = String::new();
        for (i, (word, sep)) in parts.iter().enumerate() {
            if i > 0 {
                text.push_str(sep);
            }
            text.push_str(word);
        }
        text
    })
}

/// Hand-edited looking `(name, description)` pairs.
fn catalog_row() -> impl Strategy<Value = (String, String)> {
    (
        prop::sample::select(NAMES),
        0..3usize,
        body(),
        prop::sample::select(SUFFIXES),
    )
        .prop_map(|(name, prefix, body, suffix)| {
            let prefix = match prefix {
                0 => String::new(),
                1 => "Topped with: ".to_string(),
                _ => format!("{name} pizza. "),
            };
            (name.to_string(), format!("{prefix}{body}{suffix}"))
        })
}

proptest! {
    #[test]
    fn reconstruct_is_idempotent((name, description) in catalog_row()) {
        let recon = ZeReconstructor::default();
        let once = recon.reconstruct(&name, &description);
        let twice = recon.reconstruct(&name, &once);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn reconstruct_never_returns_empty((name, description) in catalog_row()) {
        let out = ZeReconstructor::default().reconstruct(&name, &description);
        prop_assert!(!out.trim().is_empty());
        prop_assert!(out.ends_with('.'));
    }

    #[test]
    fn reconstruct_leaves_no_orphan_punctuation((name, description) in catalog_row()) {
        let detailed = ZeReconstructor::default().reconstruct_detailed(&name, &description);
        let out = &detailed.description;
        for bad in [",,", ", .", " ,", " .", "..", "  "] {
            prop_assert!(!out.contains(bad), "{:?} in {:?}", bad, out);
        }
        prop_assert!(!detailed.content.contains('-'));
        prop_assert!(!detailed.content.contains('—'));
        prop_assert!(!detailed.content.starts_with(','));
    }

    #[test]
    fn filtered_text_has_no_banned_terms(text in body()) {
        let terms = banned();
        let out = filter_terms(&text, &terms);
        prop_assert!(!terms.is_match(&out.text), "{:?}", out.text);
        prop_assert_eq!(filter_terms(&out.text, &terms).text, out.text);
    }

    #[test]
    fn reconstruct_with_banned_terms_drops_them((name, description) in catalog_row()) {
        let terms = banned();
        let recon = ZeReconstructor::default().with_banned_terms(terms.clone());
        let out = recon.reconstruct(&name, &description);
        prop_assert!(!terms.is_match(&out), "{:?}", out);
    }
}
