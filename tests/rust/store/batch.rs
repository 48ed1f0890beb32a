//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zest.
//! The Zest project belongs to the Dunimd Team.

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tempfile::TempDir;
use zest::backup::ZeBackupStyle;
use zest::config::ZeJobConfig;
use zest::diff::{ZeFieldChange, ZeItemDiff};
use zest::errors::ZeError;
use zest::job::ZeJob;
use zest::record::{ZeField, ZeMetadata};
use zest::store::{ZeStore, ZeStoreConfig};
use zest::text::ZeTerm;

const SCHEMA: &str = "
    CREATE TABLE pizza_types (
        pizza_type_id TEXT PRIMARY KEY,
        name TEXT,
        category TEXT,
        ingredients TEXT
    );
    INSERT INTO pizza_types VALUES
        ('big_meat', 'The Big Meat Pizza', 'Classic', 'Bacon, Pepperoni, Italian Sausage, Chorizo Sausage'),
        ('cali_ckn', 'The California Chicken Pizza', 'Chicken', 'Chicken, Artichoke, Spinach, Garlic'),
        ('hawaiian', 'The Hawaiian Pizza', 'Classic', 'Sliced Ham, Pineapple, Mozzarella Cheese'),
        ('napolitana', 'The Napolitana Pizza', 'Classic', 'Tomatoes, Anchovies, Green Olives, Red Onions'),
        ('pork_feast', 'Pork Feast', 'Classic', 'Smoked Pork - Pork');
";

fn fixture() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pizza.sqlite");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(SCHEMA).unwrap();
    (dir, path)
}

fn rows(path: &Path) -> Vec<(String, String, String)> {
    let conn = Connection::open(path).unwrap();
    let mut stmt = conn
        .prepare("SELECT pizza_type_id, name, ingredients FROM pizza_types ORDER BY pizza_type_id")
        .unwrap();
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
        .unwrap();
    rows.collect::<rusqlite::Result<Vec<_>>>().unwrap()
}

fn ingredients_of(path: &Path, id: &str) -> String {
    rows(path)
        .into_iter()
        .find(|(row_id, _, _)| row_id == id)
        .map(|(_, _, ingredients)| ingredients)
        .unwrap()
}

fn job(preset: &str, store: &Path) -> ZeJobConfig {
    let mut config = ZeJobConfig::preset(preset).unwrap();
    config.store = store.to_path_buf();
    config
}

fn files_in(dir: &Path) -> Vec<String> {
    let mut names = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    names.sort();
    names
}

#[test]
fn test_remove_ham_pork_end_to_end() {
    let (dir, path) = fixture();
    let original = fs::read(&path).unwrap();

    let summary = ZeJob::new(job("remove-ham-pork", &path)).unwrap().run().unwrap();
    assert_eq!(summary.rows_scanned, 5);
    assert_eq!(summary.rows_changed, 2);
    assert_eq!(summary.remaining_matches, Some(0));
    assert!(!summary.dry_run);

    let backup = summary.backup.expect("backup path");
    assert_eq!(backup.parent(), Some(dir.path()));
    let backup_name = backup.file_name().unwrap().to_string_lossy().into_owned();
    assert!(backup_name.starts_with("pizza.sqlite.remove-ham-pork."));
    assert!(backup_name.ends_with(".bak"));
    assert_eq!(fs::read(&backup).unwrap(), original);

    let after = rows(&path);
    assert_eq!(
        after[2],
        (
            "hawaiian".to_string(),
            "The Hawaiian Pizza".to_string(),
            "Pineapple, Mozzarella Cheese".to_string()
        )
    );
    assert_eq!(
        after[4],
        (
            "pork_feast".to_string(),
            "Feast".to_string(),
            "Delicious toppings.".to_string()
        )
    );
    assert_eq!(
        after[0].2,
        "Bacon, Pepperoni, Italian Sausage, Chorizo Sausage"
    );
}

#[test]
fn test_second_run_changes_nothing() {
    let (_dir, path) = fixture();
    for preset in ["remove-ham-pork", "replace-bacon", "update-descriptions"] {
        let first = ZeJob::new(job(preset, &path)).unwrap().run().unwrap();
        let snapshot = rows(&path);
        let second = ZeJob::new(job(preset, &path)).unwrap().run().unwrap();
        assert_eq!(second.rows_changed, 0, "{preset} after {} changes", first.rows_changed);
        assert_eq!(rows(&path), snapshot);
    }
    assert_eq!(
        ingredients_of(&path, "big_meat"),
        "Topped with Beef Bacon, Pepperoni, Italian Sausage, Chorizo Sausage. \
         Palestinian-inspired: za'atar, sumac and olive oil, classic Palestinian flavors."
    );
}

#[test]
fn test_update_descriptions_rewrites_every_row() {
    let (_dir, path) = fixture();
    let summary = ZeJob::new(job("update-descriptions", &path)).unwrap().run().unwrap();
    assert_eq!(summary.rows_changed, 5);
    assert_eq!(
        ingredients_of(&path, "hawaiian"),
        "Topped with Sliced Ham, Pineapple, Mozzarella Cheese. Palestinian-inspired: \
         za'atar, sumac and olive oil, classic Palestinian flavors."
    );
    assert_eq!(
        ingredients_of(&path, "cali_ckn"),
        "Topped with Chicken, Artichoke, Spinach, Garlic. Palestinian-inspired: \
         grilled chicken, sumac and zataar."
    );
}

#[test]
fn test_dry_run_writes_nothing() {
    let (dir, path) = fixture();
    let before = rows(&path);
    let report = dir.path().join("changes.jsonl");

    let mut config = job("update-descriptions", &path);
    config.dry_run = true;
    config.report = Some(report.clone());
    let summary = ZeJob::new(config).unwrap().run().unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.rows_changed, 5);
    assert_eq!(summary.backup, None);
    assert_eq!(rows(&path), before);
    assert_eq!(files_in(dir.path()), vec!["changes.jsonl", "pizza.sqlite"]);

    let lines = fs::read_to_string(&report).unwrap();
    let first: serde_json::Value = serde_json::from_str(lines.lines().next().unwrap()).unwrap();
    assert_eq!(lines.lines().count(), 5);
    assert_eq!(first["id"], "big_meat");
    assert_eq!(first["field"], "description");
    assert_eq!(
        first["before"],
        "Bacon, Pepperoni, Italian Sausage, Chorizo Sausage"
    );
    let notes: serde_json::Value =
        serde_json::from_str(first["notes"].as_str().unwrap()).unwrap();
    assert!(notes["strategy"].is_string());
    assert!(notes["suggestion"].is_string());
}

#[test]
fn test_missing_store_is_not_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pizza.sqlite");

    let err = ZeJob::new(job("remove-ham-pork", &path))
        .unwrap()
        .run()
        .unwrap_err();
    assert!(matches!(err, ZeError::MissingResource { .. }));
    assert!(files_in(dir.path()).is_empty());

    let err = ZeJob::verify(&path, ZeStoreConfig::default(), vec![ZeTerm::literal("ham")])
        .unwrap_err();
    assert!(matches!(err, ZeError::MissingResource { .. }));
}

#[test]
fn test_failed_update_rolls_back_every_row() {
    let (_dir, path) = fixture();
    Connection::open(&path)
        .unwrap()
        .execute_batch(
            "CREATE TRIGGER lock_napolitana BEFORE UPDATE ON pizza_types
             WHEN OLD.pizza_type_id = 'napolitana'
             BEGIN SELECT RAISE(ABORT, 'row is locked'); END;",
        )
        .unwrap();
    let before = rows(&path);

    let mut config = job("update-descriptions", &path);
    config.backup = ZeBackupStyle::Disabled;
    let err = ZeJob::new(config).unwrap().run().unwrap_err();

    match err {
        ZeError::Store { stage, message } => {
            assert_eq!(stage, "update");
            assert!(message.contains("napolitana"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(rows(&path), before);
}

#[test]
fn test_store_refuses_empty_values() {
    let (_dir, path) = fixture();
    let before = rows(&path);
    let mut store = ZeStore::open(&path, ZeStoreConfig::default()).unwrap();
    let diffs = vec![
        ZeItemDiff {
            id: "big_meat".to_string(),
            changes: vec![ZeFieldChange {
                field: ZeField::Description,
                before: "Bacon, Pepperoni, Italian Sausage, Chorizo Sausage".to_string(),
                after: "Pepperoni".to_string(),
            }],
            notes: ZeMetadata::new(),
        },
        ZeItemDiff {
            id: "hawaiian".to_string(),
            changes: vec![ZeFieldChange {
                field: ZeField::Name,
                before: "The Hawaiian Pizza".to_string(),
                after: "  ".to_string(),
            }],
            notes: ZeMetadata::new(),
        },
    ];
    assert!(matches!(
        store.apply_changes(&diffs),
        Err(ZeError::Store { .. })
    ));
    drop(store);
    assert_eq!(rows(&path), before);
}

#[test]
fn test_update_of_unknown_id_is_an_error() {
    let (_dir, path) = fixture();
    let mut store = ZeStore::open(&path, ZeStoreConfig::default()).unwrap();
    let diffs = vec![ZeItemDiff {
        id: "ghost".to_string(),
        changes: vec![ZeFieldChange {
            field: ZeField::Description,
            before: String::new(),
            after: "Olives".to_string(),
        }],
        notes: ZeMetadata::new(),
    }];
    let err = store.apply_changes(&diffs).unwrap_err();
    assert!(err.to_string().contains("matched 0 rows"));
}

#[test]
fn test_null_description_gets_theme_sentence() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pizza.sqlite");
    Connection::open(&path)
        .unwrap()
        .execute_batch(
            "CREATE TABLE pizza_types (pizza_type_id TEXT PRIMARY KEY, name TEXT, ingredients TEXT);
             INSERT INTO pizza_types VALUES ('veggie_veg', '  The Veggie Pizza ', NULL);",
        )
        .unwrap();

    let summary = ZeJob::new(job("update-descriptions", &path)).unwrap().run().unwrap();
    assert_eq!(summary.rows_changed, 1);
    assert_eq!(
        ingredients_of(&path, "veggie_veg"),
        "Palestinian-inspired: roasted seasonal vegetables and tahini drizzle."
    );
}

#[test]
fn test_custom_layout_and_fixed_backup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("menu.sqlite");
    Connection::open(&path)
        .unwrap()
        .execute_batch(
            "CREATE TABLE menu (code TEXT PRIMARY KEY, title TEXT, body TEXT);
             INSERT INTO menu VALUES ('b1', 'Bacon Melt', 'Bacon, cheddar'), ('c1', 'Caprese', 'Tomato, basil');",
        )
        .unwrap();

    let mut config = job("replace-bacon", &path);
    config.layout = ZeStoreConfig {
        table: "menu".to_string(),
        id_column: "code".to_string(),
        name_column: "title".to_string(),
        description_column: "body".to_string(),
    };
    let summary = ZeJob::new(config).unwrap().run().unwrap();
    assert_eq!(summary.rows_changed, 1);
    assert_eq!(summary.backup, Some(dir.path().join("menu.sqlite.bak")));

    let conn = Connection::open(&path).unwrap();
    let (title, body): (String, String) = conn
        .query_row("SELECT title, body FROM menu WHERE code = 'b1'", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .unwrap();
    assert_eq!(title, "Beef Bacon Melt");
    assert_eq!(body, "Beef Bacon, cheddar");
}

#[test]
fn test_verify_reports_without_writing() {
    let (_dir, path) = fixture();
    let original = fs::read(&path).unwrap();

    let matches = ZeJob::verify(
        &path,
        ZeStoreConfig::default(),
        vec![ZeTerm::literal("ham"), ZeTerm::literal("pork")],
    )
    .unwrap();

    let summary = matches
        .iter()
        .map(|m| (m.id.as_str(), m.field, m.matches.clone()))
        .collect::<Vec<_>>();
    assert_eq!(
        summary,
        vec![
            ("hawaiian", ZeField::Description, vec!["Ham".to_string()]),
            ("pork_feast", ZeField::Name, vec!["Pork".to_string()]),
            (
                "pork_feast",
                ZeField::Description,
                vec!["Pork".to_string(), "Pork".to_string()]
            ),
        ]
    );
    assert_eq!(fs::read(&path).unwrap(), original);
}
