// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Table directory: the lazily discovered table set of one schema

use dc_common::utils::join_path;
use dc_common::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::entry::TableEntry;
use crate::gateway::GatewayShared;
use crate::host::ClientContext;
use crate::lazy::LoadOnce;
use crate::marker::{is_table_candidate, is_table_root};
use crate::names::CaseInsensitiveMap;
use crate::table::TableProxy;

#[derive(Debug)]
pub struct TableDirectory {
    schema_name: String,
    schema_path: String,
    shared: Arc<GatewayShared>,
    tables: LoadOnce<CaseInsensitiveMap<Arc<TableProxy>>>,
}

impl TableDirectory {
    pub(crate) fn new(schema_name: &str, schema_path: String, shared: Arc<GatewayShared>) -> Self {
        Self {
            schema_name: schema_name.to_string(),
            schema_path,
            shared,
            tables: LoadOnce::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.tables.is_loaded()
    }

    /// Discover the tables of this schema, at most once
    pub fn load_entries(&self, context: &ClientContext) -> Result<()> {
        self.tables
            .get_or_try_load(|| self.discover(context))
            .map(|_| ())
    }

    fn discover(&self, context: &ClientContext) -> Result<CaseInsensitiveMap<Arc<TableProxy>>> {
        let fs = context.fs();
        let mut tables = CaseInsensitiveMap::new();

        for entry in fs.list_files(&self.schema_path)? {
            if !entry.is_dir || !is_table_candidate(&entry.name) {
                continue;
            }
            let table_path = join_path(&self.schema_path, &entry.name);
            if !is_table_root(fs, &table_path) {
                continue;
            }
            debug!("Found table root '{}'", table_path);
            let table = TableProxy::new(
                &entry.name,
                &self.schema_name,
                table_path,
                Arc::clone(&self.shared),
            );
            if !tables.insert(&entry.name, Arc::new(table)) {
                warn!(
                    "Ignoring table directory '{}' in '{}': name already taken",
                    entry.name, self.schema_path
                );
            }
        }

        info!(
            "Discovered {} table(s) in schema '{}' of catalog '{}'",
            tables.len(),
            self.schema_name,
            self.shared.name
        );
        Ok(tables)
    }

    /// Table by name (ASCII case ignored), discovering first if needed
    pub fn get_entry(&self, context: &ClientContext, name: &str) -> Result<Option<Arc<dyn TableEntry>>> {
        self.load_entries(context)?;
        Ok(self
            .tables
            .get()
            .and_then(|tables| tables.get(name))
            .map(|table| Arc::clone(table) as Arc<dyn TableEntry>))
    }

    /// Concrete proxy by name, discovering first if needed
    pub fn get_table(&self, context: &ClientContext, name: &str) -> Result<Option<Arc<TableProxy>>> {
        self.load_entries(context)?;
        Ok(self.tables.get().and_then(|tables| tables.get(name)).cloned())
    }

    pub fn scan(&self, context: &ClientContext) -> Result<Vec<Arc<dyn TableEntry>>> {
        self.load_entries(context)?;
        Ok(self
            .tables
            .get()
            .map(|tables| {
                tables
                    .values()
                    .map(|table| Arc::clone(table) as Arc<dyn TableEntry>)
                    .collect()
            })
            .unwrap_or_default())
    }
}
