//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zest.
//! The Zest project belongs to the Dunimd Team.

use serde_json::{json, Value};
use zest::backup::ZeBackupStyle;
use zest::config::{ZeJobConfig, PRESETS};
use zest::errors::{Result, ZeError};
use zest::operator::ZeOperator;
use zest::operators::assign::regional_descriptions;
use zest::pipeline::{OperatorFactory, ZePipelineBuilder};
use zest::record::{ZeItem, ZeItemBatch};
use zest::text::ZeTerm;

#[derive(Debug)]
struct UppercaseNames;

impl ZeOperator for UppercaseNames {
    fn name(&self) -> &'static str {
        "names.upper"
    }

    fn apply(&self, mut batch: ZeItemBatch) -> Result<ZeItemBatch> {
        for item in &mut batch {
            item.name = item.name.to_uppercase();
        }
        Ok(batch)
    }
}

fn uppercase_factory(_config: &Value) -> Result<Box<dyn ZeOperator + Send + Sync>> {
    Ok(Box::new(UppercaseNames))
}

fn catalog() -> ZeItemBatch {
    vec![
        ZeItem::new("hawaiian", "The Hawaiian", "Sliced Ham, pineapple, mozzarella"),
        ZeItem::new("bbq_ckn", "The Barbecue Chicken", "Barbecued Chicken, Red Peppers - Bacon"),
        ZeItem::new("napolitana", "The Napolitana", "Tomatoes, Anchovies, Green Olives"),
    ]
}

#[test]
fn test_default_operators_are_registered() {
    let builder = ZePipelineBuilder::with_defaults();
    assert_eq!(
        builder.operator_names(),
        vec![
            "description.reconstruct",
            "descriptions.assign",
            "terms.remove",
            "terms.substitute"
        ]
    );
}

#[test]
fn test_remove_then_reconstruct() {
    let pipeline = ZePipelineBuilder::with_defaults()
        .build_from_config(&[
            json!({"operator": "terms.remove", "config": {"terms": ["sliced ham", "ham"]}}),
            json!({"operator": "description.reconstruct"}),
        ])
        .unwrap();
    let out = pipeline.run(catalog()).unwrap();

    assert_eq!(
        out[0].description,
        "Topped with pineapple, mozzarella. Palestinian-inspired: \
         za'atar, sumac and olive oil, classic Palestinian flavors."
    );
    assert_eq!(out[0].metadata.as_ref().unwrap()["terms_removed"], json!(1));
    assert_eq!(
        out[2].description,
        "Topped with Tomatoes, Anchovies, Green Olives. Palestinian-inspired: \
         za'atar, sumac and olive oil, classic Palestinian flavors."
    );

    // A second pass over the output changes nothing.
    let again = pipeline.run(out.clone()).unwrap();
    let descriptions = |batch: &ZeItemBatch| {
        batch
            .iter()
            .map(|item| item.description.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(descriptions(&again), descriptions(&out));
}

#[test]
fn test_substitute_names_and_descriptions() {
    let pipeline = ZePipelineBuilder::with_defaults()
        .build_from_config(&[json!({
            "operator": "terms.substitute",
            "config": {"rules": [{"term": "Bacon", "replacement": "Beef Bacon"}]}
        })])
        .unwrap();
    let out = pipeline
        .run(vec![ZeItem::new("bacon", "Bacon Ranch", "Bacon, ranch, Beef Bacon bits")])
        .unwrap();
    assert_eq!(out[0].name, "Beef Bacon Ranch");
    assert_eq!(out[0].description, "Beef Bacon, ranch, Beef Bacon bits");
}

#[test]
fn test_removal_that_empties_fields_uses_fallbacks() {
    let pipeline = ZePipelineBuilder::with_defaults()
        .build_from_config(&[json!({
            "operator": "terms.remove",
            "config": {"terms": ["pork"], "fallback": "Chef's choice."}
        })])
        .unwrap();
    let out = pipeline
        .run(vec![ZeItem::new("p", "Pork", "pork - pork")])
        .unwrap();
    assert_eq!(out[0].name, "Pork");
    assert_eq!(out[0].description, "Chef's choice.");
}

#[test]
fn test_custom_operator_registration() {
    let mut builder = ZePipelineBuilder::with_defaults();
    builder
        .try_register("names.upper", uppercase_factory as OperatorFactory)
        .unwrap();
    assert!(builder.has_operator("names.upper"));
    assert!(builder
        .try_register("names.upper", uppercase_factory as OperatorFactory)
        .is_err());

    let pipeline = builder
        .build_from_config(&[json!({"operator": "names.upper"})])
        .unwrap();
    let out = pipeline.run(catalog()).unwrap();
    assert_eq!(out[1].name, "THE BARBECUE CHICKEN");
}

#[test]
fn test_bad_step_config_names_the_step() {
    let err = ZePipelineBuilder::with_defaults()
        .build_from_config(&[
            json!({"operator": "description.reconstruct"}),
            json!({"operator": "terms.remove", "config": {"fields": ["name"]}}),
        ])
        .unwrap_err();
    match err {
        ZeError::Pipeline { stage, message } => {
            assert_eq!(stage, "step #1 (terms.remove)");
            assert!(message.contains("'terms'"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_assign_descriptions_preset() {
    let config = ZeJobConfig::preset("assign-descriptions").unwrap();
    let pipeline = ZePipelineBuilder::with_defaults()
        .build_from_config(&config.stages)
        .unwrap();
    let out = pipeline.run(catalog()).unwrap();

    assert_eq!(
        out[2].description,
        "Fresh sardines, garlic, and parsley on a bed of tomato sauce, inspired by Jaffa's port."
    );
    assert_eq!(out[0].description, "Sliced Ham, pineapple, mozzarella");
    assert_eq!(regional_descriptions().len(), 16);
}

#[test]
fn test_presets_build() {
    let builder = ZePipelineBuilder::with_defaults();
    for (name, about) in PRESETS {
        assert!(!about.is_empty());
        let config = ZeJobConfig::preset(name).unwrap();
        assert!(builder.build_from_config(&config.stages).is_ok(), "{name}");
    }
    assert_eq!(
        ZeJobConfig::preset("remove-ham-pork").unwrap().verify_terms,
        vec![ZeTerm::literal("ham"), ZeTerm::literal("pork")]
    );
    assert_eq!(
        ZeJobConfig::preset("replace-bacon").unwrap().backup,
        ZeBackupStyle::Fixed
    );
    assert!(ZeJobConfig::preset("drop-tables").is_err());
}

#[test]
fn test_job_config_from_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("job.yaml");
    std::fs::write(
        &path,
        r#"
operation: strip-pork
store: catalog.sqlite
dry_run: true
backup: fixed
steps:
  - operator: terms.remove
    config:
      terms: ["pork", {pattern: "pork\\w+"}]
      fields: [ingredients]
  - operator: description.reconstruct
    config:
      theme:
        label: Levantine
verify_terms: ["pork"]
"#,
    )
    .unwrap();

    let config = ZeJobConfig::from_path(&path).unwrap();
    assert_eq!(config.operation, "strip-pork");
    assert_eq!(config.store, std::path::PathBuf::from("catalog.sqlite"));
    assert!(config.dry_run);
    assert_eq!(config.backup, ZeBackupStyle::Fixed);
    assert_eq!(config.stages.len(), 2);

    let pipeline = ZePipelineBuilder::with_defaults()
        .build_from_config(&config.stages)
        .unwrap();
    let out = pipeline
        .run(vec![ZeItem::new("x", "Porky", "Porkbelly, pork, olives")])
        .unwrap();
    assert_eq!(out[0].name, "Porky");
    assert_eq!(
        out[0].description,
        "Topped with olives. Levantine-inspired: za'atar, sumac and olive oil, classic Palestinian flavors."
    );
}

#[test]
fn test_job_config_rejects_bad_files() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("absent.yaml");
    assert!(matches!(
        ZeJobConfig::from_path(&missing),
        Err(ZeError::MissingResource { .. })
    ));

    let toml = dir.path().join("job.toml");
    std::fs::write(&toml, "operation = 'x'").unwrap();
    assert!(ZeJobConfig::from_path(&toml).is_err());

    let empty = dir.path().join("empty.json");
    std::fs::write(&empty, r#"{"operation": "noop", "stages": []}"#).unwrap();
    assert!(ZeJobConfig::from_path(&empty).is_err());

    let spaced = dir.path().join("spaced.json");
    std::fs::write(
        &spaced,
        r#"{"operation": "two words", "stages": [{"operator": "description.reconstruct"}]}"#,
    )
    .unwrap();
    assert!(ZeJobConfig::from_path(&spaced).is_err());
}
