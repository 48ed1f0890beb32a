//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zest.
//! The Zest project belongs to the Dunimd Team.

use zest::text::punctuation::clean_orphans;
use zest::text::terms::{
    filter_terms, substitute_terms, ZeSubstitution, ZeSubstitutionRule, ZeTerm, ZeTermSet,
};
use zest::text::FALLBACK_DESCRIPTION;

fn ham_pork() -> ZeTermSet {
    ZeTermSet::from_literals([
        "smoked ham",
        "sliced ham",
        "smoked pork",
        "sliced pork",
        "ham",
        "pork",
    ])
    .unwrap()
}

fn beef_bacon() -> Vec<ZeSubstitution> {
    vec![ZeSubstitution::new(ZeSubstitutionRule {
        term: "Bacon".to_string(),
        replacement: "Beef Bacon".to_string(),
    })
    .unwrap()]
}

#[test]
fn test_remove_terms_and_clean_orphans() {
    let out = filter_terms("Pineapple, smoked ham, and cheese.", &ham_pork());
    assert_eq!(out.text, "Pineapple, and cheese.");
    assert_eq!(out.hits, 1);
}

#[test]
fn test_remove_is_case_insensitive() {
    let out = filter_terms("Olives, HAM, Pork, feta", &ham_pork());
    assert_eq!(out.text, "Olives, feta");
    assert_eq!(out.hits, 2);
}

#[test]
fn test_remove_leaves_substrings_alone() {
    let out = filter_terms("Hamburger crumbles, graham crust", &ham_pork());
    assert_eq!(out.text, "Hamburger crumbles, graham crust");
    assert_eq!(out.hits, 0);
}

#[test]
fn test_fully_removed_value_takes_fallback() {
    let out = filter_terms("Sliced ham", &ham_pork());
    assert!(out.is_empty());
    assert_eq!(out.or_fallback(FALLBACK_DESCRIPTION), "Delicious toppings.");

    let kept = filter_terms("Ham, olives", &ham_pork());
    assert_eq!(kept.or_fallback(FALLBACK_DESCRIPTION), "olives");
}

#[test]
fn test_remove_bracketed_annotation() {
    let terms = ZeTermSet::from_literals(["(no pork)"]).unwrap();
    let out = filter_terms("Beef pepperoni (no pork), mozzarella", &terms);
    assert_eq!(out.text, "Beef pepperoni, mozzarella");
}

#[test]
fn test_pattern_terms() {
    let terms = ZeTermSet::new(vec![ZeTerm::pattern(r"\bpork\w*")]).unwrap();
    let out = filter_terms("Olives, Porkbelly, feta", &terms);
    assert_eq!(out.text, "Olives, feta");
    assert_eq!(terms.find_all("pork and porky"), vec!["pork", "porky"]);
}

#[test]
fn test_invalid_term_sets_are_rejected() {
    assert!(ZeTermSet::new(Vec::new()).is_err());
    assert!(ZeTermSet::from_literals(["  "]).is_err());
    assert!(ZeTermSet::new(vec![ZeTerm::pattern("a*")]).is_err());
    assert!(ZeTermSet::new(vec![ZeTerm::pattern("(unclosed")]).is_err());
}

#[test]
fn test_filter_is_idempotent() {
    let terms = ham_pork();
    let once = filter_terms("Ham - pineapple, , sliced pork ., cheese", &terms).text;
    let twice = filter_terms(&once, &terms);
    assert_eq!(twice.text, once);
    assert_eq!(twice.hits, 0);
}

#[test]
fn test_substitute_bacon() {
    let out = substitute_terms("Bacon, onions and bacon bits", &beef_bacon());
    assert_eq!(out.text, "Beef Bacon, onions and Beef Bacon bits");
    assert_eq!(out.hits, 2);
}

#[test]
fn test_substitute_twice_changes_nothing() {
    let rules = beef_bacon();
    let once = substitute_terms("Crispy bacon and BACON crumbs", &rules).text;
    let twice = substitute_terms(&once, &rules);
    assert_eq!(twice.text, once);
    assert_eq!(twice.hits, 0);
}

#[test]
fn test_term_set_accepts_config_shapes() {
    let terms: Vec<ZeTerm> =
        serde_json::from_str(r#"["ham", {"pattern": "sliced\\s+pork"}]"#).unwrap();
    assert_eq!(terms[0], ZeTerm::literal("ham"));
    assert_eq!(terms[1].label(), r"sliced\s+pork");
    let set = ZeTermSet::new(terms).unwrap();
    assert!(set.is_match("SLICED  PORK"));
    assert!(!set.is_match("shampoo"));
}

#[test]
fn test_clean_orphans_on_hand_edited_text() {
    assert_eq!(clean_orphans(" , olives ,, feta , ."), "olives, feta.");
}
