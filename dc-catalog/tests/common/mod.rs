// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Shared fixtures: directory trees on disk and a host with the mock delegate

#![allow(dead_code)]

use dc_catalog::mock::MockDeltaEngine;
use dc_catalog::{
    AttachInfo, AttachOptions, AttachedDatabase, CatalogGateway, ClientContext, DatabaseManager,
    DirEntry, FileSystem, LocalFileSystem,
};
use dc_common::constants::{CATALOG_TYPE, MARKER_DIR, PIN_SNAPSHOT_OPTION, TYPE_OPTION};
use dc_common::{AccessMode, Result};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// Local filesystem that counts listing passes
#[derive(Debug, Default)]
pub struct CountingFileSystem {
    lists: AtomicUsize,
    probes: AtomicUsize,
}

impl CountingFileSystem {
    pub fn list_calls(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }

    pub fn probe_calls(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.list_calls() + self.probe_calls()
    }
}

impl FileSystem for CountingFileSystem {
    fn list_files(&self, path: &str) -> Result<Vec<DirEntry>> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        // Widen the race window for concurrency tests
        std::thread::sleep(std::time::Duration::from_millis(2));
        LocalFileSystem.list_files(path)
    }

    fn directory_exists(&self, path: &str) -> bool {
        self.probes.fetch_add(1, Ordering::SeqCst);
        LocalFileSystem.directory_exists(path)
    }
}

/// Create `dir` (and parents) under `root`
pub fn mkdir(root: &Path, dir: &str) {
    std::fs::create_dir_all(root.join(dir)).unwrap();
}

/// Create a table root: `dir/_delta_log`
pub fn make_table(root: &Path, dir: &str) {
    std::fs::create_dir_all(root.join(dir).join(MARKER_DIR)).unwrap();
}

pub fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// root/single_schema/{table_a,table_b} are tables; notes has no marker,
/// .hidden and _staging are skipped even though they carry markers.
pub fn single_schema_tree() -> (TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    make_table(dir.path(), "single_schema/table_a");
    make_table(dir.path(), "single_schema/table_b");
    mkdir(dir.path(), "single_schema/notes");
    make_table(dir.path(), "single_schema/.hidden");
    make_table(dir.path(), "single_schema/_staging");
    std::fs::write(dir.path().join("single_schema/README.md"), b"tables").unwrap();
    let base = path_str(&dir.path().join("single_schema"));
    (dir, base)
}

/// root/multi_schema/{schema1/{table_x,table_y}, schema2/table_z, _private/hidden_t, .git}
pub fn multi_schema_tree() -> (TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    make_table(dir.path(), "multi_schema/schema1/table_x");
    make_table(dir.path(), "multi_schema/schema1/table_y");
    mkdir(dir.path(), "multi_schema/schema1/not_a_table");
    make_table(dir.path(), "multi_schema/schema2/table_z");
    make_table(dir.path(), "multi_schema/_private/hidden_t");
    mkdir(dir.path(), "multi_schema/.git");
    let base = path_str(&dir.path().join("multi_schema"));
    (dir, base)
}

pub struct TestHost {
    pub manager: Arc<DatabaseManager>,
    pub engine: Arc<MockDeltaEngine>,
    pub fs: Arc<CountingFileSystem>,
    pub context: ClientContext,
}

impl TestHost {
    pub fn new() -> Self {
        let manager = Arc::new(DatabaseManager::new());
        dc_catalog::register(&manager);
        let engine = Arc::new(MockDeltaEngine::new());
        engine.register(&manager);
        let fs = Arc::new(CountingFileSystem::default());
        let context = ClientContext::new(Arc::clone(&fs) as Arc<dyn FileSystem>, Arc::clone(&manager));
        Self {
            manager,
            engine,
            fs,
            context,
        }
    }

    pub fn attach(&self, name: &str, path: &str) -> Result<Arc<AttachedDatabase>> {
        self.attach_with(name, path, false)
    }

    pub fn attach_with(&self, name: &str, path: &str, pin_snapshot: bool) -> Result<Arc<AttachedDatabase>> {
        let mut options = AttachOptions::new(AccessMode::Automatic).with_option(TYPE_OPTION, CATALOG_TYPE);
        if pin_snapshot {
            options = options.with_option(PIN_SNAPSHOT_OPTION, true);
        }
        self.manager
            .attach_database(&self.context, &AttachInfo::new(name, path), options)
    }
}

pub fn gateway(database: &AttachedDatabase) -> &CatalogGateway {
    database
        .catalog()
        .as_any()
        .downcast_ref::<CatalogGateway>()
        .expect("attached catalog is a gateway")
}
