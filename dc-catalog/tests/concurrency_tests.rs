// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Discovery and delegate attachment run once under concurrent access

mod common;

use common::{multi_schema_tree, single_schema_tree, TestHost};
use dc_catalog::{CatalogTransaction, TableEntry};
use dc_common::{CatalogType, OnEntryNotFound};
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 16;

#[test]
fn test_concurrent_schema_discovery() {
    let (_dir, base) = multi_schema_tree();
    let host = Arc::new(TestHost::new());
    let db = host.attach("mdb", &base).unwrap();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let host = Arc::clone(&host);
            let db = Arc::clone(&db);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                db.catalog()
                    .scan_schemas(&host.context)
                    .unwrap()
                    .iter()
                    .map(|s| s.name().to_string())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), vec!["schema1", "schema2"]);
    }
    // Only the base path was listed
    assert_eq!(host.fs.list_calls(), 1);
}

#[test]
fn test_concurrent_table_discovery() {
    let (_dir, base) = single_schema_tree();
    let host = Arc::new(TestHost::new());
    let db = host.attach("sdb", &base).unwrap();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let host = Arc::clone(&host);
            let db = Arc::clone(&db);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let txn = CatalogTransaction::new(&host.context);
                barrier.wait();
                let schema = db
                    .catalog()
                    .lookup_schema(&txn, "main", OnEntryNotFound::ThrowException)
                    .unwrap()
                    .unwrap();
                if i % 2 == 0 {
                    schema.scan(&host.context, CatalogType::Table).unwrap().len()
                } else {
                    usize::from(schema.lookup_entry(&txn, CatalogType::Table, "table_a").unwrap().is_some())
                }
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let expected = if i % 2 == 0 { 2 } else { 1 };
        assert_eq!(handle.join().unwrap(), expected);
    }
    // One listing for the base path, one for the schema's tables
    assert_eq!(host.fs.list_calls(), 2);
}

#[test]
fn test_concurrent_first_scan_attaches_once() {
    let (_dir, base) = single_schema_tree();
    let host = Arc::new(TestHost::new());
    let db = host.attach("sdb", &base).unwrap();
    let txn = CatalogTransaction::new(&host.context);
    let table: Arc<dyn TableEntry> = db
        .catalog()
        .lookup_schema(&txn, "single_schema", OnEntryNotFound::ThrowException)
        .unwrap()
        .unwrap()
        .lookup_entry(&txn, CatalogType::Table, "table_a")
        .unwrap()
        .unwrap();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let host = Arc::clone(&host);
            let table = Arc::clone(&table);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let (function, _) = table.get_scan_function(&host.context).unwrap();
                function.name
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), dc_catalog::mock::MOCK_SCAN_FUNCTION);
    }
    assert_eq!(host.engine.attach_count(), 1);
    assert_eq!(table.columns().len(), 1);
    assert_eq!(db.catalog().internal_handles().len(), 1);
}

#[test]
fn test_concurrent_scans_across_tables() {
    let (_dir, base) = multi_schema_tree();
    let host = Arc::new(TestHost::new());
    let db = host.attach("mdb", &base).unwrap();
    let targets = [("schema1", "table_x"), ("schema1", "table_y"), ("schema2", "table_z")];

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let host = Arc::clone(&host);
            let db = Arc::clone(&db);
            let (schema, table) = targets[i % targets.len()];
            thread::spawn(move || {
                let txn = CatalogTransaction::new(&host.context);
                let entry = db
                    .catalog()
                    .lookup_schema(&txn, schema, OnEntryNotFound::ThrowException)
                    .unwrap()
                    .unwrap()
                    .lookup_entry(&txn, CatalogType::Table, table)
                    .unwrap()
                    .unwrap();
                entry.get_scan_function(&host.context).map(|_| ())
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }
    assert_eq!(host.engine.attach_count(), targets.len());
    assert_eq!(db.catalog().internal_handles().len(), targets.len());
}
