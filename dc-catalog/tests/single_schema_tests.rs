// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Single-schema layout: table roots are direct children of the base path

mod common;

use common::{gateway, make_table, mkdir, path_str, single_schema_tree, TestHost};
use dc_catalog::{CatalogLayout, CatalogTransaction, SchemaDirectory};
use dc_common::constants::DEFAULT_SCHEMA;
use dc_common::{CatalogType, OnEntryNotFound};

fn table_names(host: &TestHost, database: &dc_catalog::AttachedDatabase, schema: &str) -> Vec<String> {
    let txn = CatalogTransaction::new(&host.context);
    let schema = database
        .catalog()
        .lookup_schema(&txn, schema, OnEntryNotFound::ThrowException)
        .unwrap()
        .unwrap();
    schema
        .scan(&host.context, CatalogType::Table)
        .unwrap()
        .iter()
        .map(|t| t.name().to_string())
        .collect()
}

#[test]
fn test_single_schema_named_after_base_path() {
    let (_dir, base) = single_schema_tree();
    let host = TestHost::new();
    let db = host.attach("sdb", &base).unwrap();

    let schemas = db.catalog().scan_schemas(&host.context).unwrap();
    assert_eq!(schemas.len(), 1);
    assert_eq!(schemas[0].name(), "single_schema");
    assert_eq!(gateway(&db).layout(), Some(CatalogLayout::SingleSchema));

    let schema_dir = schemas[0].as_any().downcast_ref::<SchemaDirectory>().unwrap();
    assert_eq!(schema_dir.schema_path(), base);
}

#[test]
fn test_only_marked_children_are_tables() {
    let (_dir, base) = single_schema_tree();
    let host = TestHost::new();
    let db = host.attach("sdb", &base).unwrap();

    // notes has no marker; .hidden and _staging are skipped by name
    assert_eq!(table_names(&host, &db, "single_schema"), vec!["table_a", "table_b"]);
}

#[test]
fn test_default_and_catalog_name_resolve_to_sole_schema() {
    let (_dir, base) = single_schema_tree();
    let host = TestHost::new();
    let db = host.attach("sdb", &base).unwrap();
    let txn = CatalogTransaction::new(&host.context);

    for name in [DEFAULT_SCHEMA, "sdb", "SDB", "single_schema", "Single_Schema"] {
        let schema = db
            .catalog()
            .lookup_schema(&txn, name, OnEntryNotFound::ReturnNull)
            .unwrap();
        assert_eq!(schema.unwrap().name(), "single_schema", "lookup of {}", name);
    }
}

#[test]
fn test_missing_schema_soft_and_hard() {
    let (_dir, base) = single_schema_tree();
    let host = TestHost::new();
    let db = host.attach("edb", &base).unwrap();
    let txn = CatalogTransaction::new(&host.context);

    let soft = db
        .catalog()
        .lookup_schema(&txn, "no_such_schema", OnEntryNotFound::ReturnNull)
        .unwrap();
    assert!(soft.is_none());

    let hard = db
        .catalog()
        .lookup_schema(&txn, "no_such_schema", OnEntryNotFound::ThrowException)
        .err()
        .unwrap();
    assert!(hard.is_not_found());
    assert!(hard.to_string().contains("no_such_schema"));
    assert!(hard.to_string().contains("edb"));
}

#[test]
fn test_missing_table_is_absent() {
    let (_dir, base) = single_schema_tree();
    let host = TestHost::new();
    let db = host.attach("edb", &base).unwrap();
    let txn = CatalogTransaction::new(&host.context);

    let schema = db
        .catalog()
        .lookup_schema(&txn, DEFAULT_SCHEMA, OnEntryNotFound::ThrowException)
        .unwrap()
        .unwrap();
    assert!(schema
        .lookup_entry(&txn, CatalogType::Table, "no_such_table")
        .unwrap()
        .is_none());
    assert!(schema
        .lookup_entry(&txn, CatalogType::Table, "TABLE_A")
        .unwrap()
        .is_some());
    // Hidden and reserved directories are not reachable by name either
    assert!(schema
        .lookup_entry(&txn, CatalogType::Table, "_staging")
        .unwrap()
        .is_none());
}

#[test]
fn test_trailing_separators_are_stripped() {
    let (_dir, base) = single_schema_tree();
    let host = TestHost::new();
    let db = host.attach("sdb", &format!("{}//", base)).unwrap();

    assert_eq!(db.catalog().db_path(), base);
    assert!(!db.catalog().in_memory());
    let schemas = db.catalog().scan_schemas(&host.context).unwrap();
    assert_eq!(schemas[0].name(), "single_schema");
}

#[test]
fn test_marker_under_base_path_is_not_a_candidate() {
    // The base path is itself a table root with a partition directory
    let dir = tempfile::tempdir().unwrap();
    make_table(dir.path(), "events");
    mkdir(dir.path(), "events/part=1");
    let base = path_str(&dir.path().join("events"));

    let host = TestHost::new();
    let db = host.attach("edb", &base).unwrap();
    let names: Vec<String> = db
        .catalog()
        .scan_schemas(&host.context)
        .unwrap()
        .iter()
        .map(|s| s.name().to_string())
        .collect();

    // No child is a table root, so children are schemas; the marker is never one
    assert_eq!(gateway(&db).layout(), Some(CatalogLayout::MultiSchema));
    assert_eq!(names, vec!["part=1"]);
}

#[test]
fn test_lookup_without_context_does_not_discover() {
    let (_dir, base) = single_schema_tree();
    let host = TestHost::new();
    let db = host.attach("sdb", &base).unwrap();
    let calls_after_attach = host.fs.list_calls();

    let txn = CatalogTransaction::without_context();
    let schema = db
        .catalog()
        .lookup_schema(&txn, "single_schema", OnEntryNotFound::ReturnNull)
        .unwrap();
    assert!(schema.is_none());
    assert!(!gateway(&db).is_discovered());
    assert_eq!(host.fs.list_calls(), calls_after_attach);

    // Once discovered, context-free lookups see the populated map
    db.catalog().scan_schemas(&host.context).unwrap();
    let schema = db
        .catalog()
        .lookup_schema(&txn, "single_schema", OnEntryNotFound::ReturnNull)
        .unwrap();
    assert!(schema.is_some());
}

#[test]
fn test_table_lookup_without_context_is_absent() {
    let (_dir, base) = single_schema_tree();
    let host = TestHost::new();
    let db = host.attach("sdb", &base).unwrap();
    let schema = db
        .catalog()
        .lookup_schema(&CatalogTransaction::new(&host.context), DEFAULT_SCHEMA, OnEntryNotFound::ThrowException)
        .unwrap()
        .unwrap();

    let txn = CatalogTransaction::without_context();
    assert!(schema
        .lookup_entry(&txn, CatalogType::Table, "table_a")
        .unwrap()
        .is_none());
    assert!(schema.scan_without_context(CatalogType::Table).is_empty());
}

#[test]
fn test_non_table_kinds_are_not_found() {
    let (_dir, base) = single_schema_tree();
    let host = TestHost::new();
    let db = host.attach("sdb", &base).unwrap();
    let txn = CatalogTransaction::new(&host.context);
    let schema = db
        .catalog()
        .lookup_schema(&txn, DEFAULT_SCHEMA, OnEntryNotFound::ThrowException)
        .unwrap()
        .unwrap();
    let schema_dir = schema.as_any().downcast_ref::<SchemaDirectory>().unwrap();

    for kind in [CatalogType::View, CatalogType::Index, CatalogType::Sequence, CatalogType::Type] {
        assert!(schema.lookup_entry(&txn, kind, "table_a").unwrap().is_none());
        assert!(schema.scan(&host.context, kind).unwrap().is_empty());
    }
    // Non-table lookups never trigger table discovery
    assert!(!schema_dir.tables().is_loaded());
}

#[test]
fn test_failed_discovery_is_retried() {
    let (dir, base) = single_schema_tree();
    let host = TestHost::new();
    let db = host.attach("sdb", &base).unwrap();

    std::fs::remove_dir_all(&base).unwrap();
    let err = db.catalog().scan_schemas(&host.context).err().unwrap();
    assert!(matches!(err, dc_common::DeltaClassicError::Io(_)), "{}", err);
    assert!(!gateway(&db).is_discovered());

    make_table(dir.path(), "single_schema/table_a");
    let schemas = db.catalog().scan_schemas(&host.context).unwrap();
    assert_eq!(schemas.len(), 1);
    assert_eq!(schemas[0].name(), "single_schema");
    assert_eq!(gateway(&db).layout(), Some(CatalogLayout::SingleSchema));
    assert_eq!(host.fs.list_calls(), 2);
}
