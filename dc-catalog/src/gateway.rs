// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Catalog gateway: the root of a `delta_classic` catalog
//!
//! The base path is inspected once, on first use:
//! - if any direct child is a table root, the base path is a single schema
//!   (named after its final path component) whose tables are those children;
//! - otherwise every visible child directory is a schema and tables are
//!   looked for one level deeper.
//!
//! A `_delta_log` directory directly under the base path is never a
//! candidate: it means the base path itself is a table root, not a container.

use dc_common::constants::{CATALOG_TYPE, DEFAULT_SCHEMA};
use dc_common::utils::{is_reserved, join_path, last_path_component};
use dc_common::{AccessMode, DeltaClassicError, OnEntryNotFound, Result};
use parking_lot::Mutex;
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::entry::{Catalog, SchemaEntry};
use crate::host::{CatalogTransaction, ClientContext};
use crate::lazy::LoadOnce;
use crate::marker::{is_schema_level_candidate, is_table_root};
use crate::names::CaseInsensitiveMap;
use crate::schema::SchemaDirectory;

/// Settings shared by a gateway and every schema and table below it
#[derive(Debug)]
pub(crate) struct GatewayShared {
    pub(crate) name: String,
    pub(crate) access_mode: AccessMode,
    pub(crate) pin_snapshot: bool,
    internal_handles: Mutex<Vec<String>>,
}

impl GatewayShared {
    /// Remember a delegate handle attached on behalf of this catalog
    pub(crate) fn register_internal_handle(&self, handle: &str) {
        let mut handles = self.internal_handles.lock();
        if !handles.iter().any(|h| h == handle) {
            handles.push(handle.to_string());
        }
    }
}

/// Layout detected for the base path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogLayout {
    /// Table roots are direct children of the base path
    SingleSchema,
    /// Table roots sit one level below schema directories
    MultiSchema,
}

#[derive(Debug)]
struct DiscoveredSchemas {
    layout: CatalogLayout,
    schemas: CaseInsensitiveMap<Arc<SchemaDirectory>>,
}

#[derive(Debug)]
pub struct CatalogGateway {
    base_path: String,
    shared: Arc<GatewayShared>,
    discovered: LoadOnce<DiscoveredSchemas>,
}

impl CatalogGateway {
    /// Create a read-only gateway over an already normalized base path
    pub fn new(name: impl Into<String>, base_path: impl Into<String>, pin_snapshot: bool) -> Self {
        Self {
            base_path: base_path.into(),
            shared: Arc::new(GatewayShared {
                name: name.into(),
                access_mode: AccessMode::ReadOnly,
                pin_snapshot,
                internal_handles: Mutex::new(Vec::new()),
            }),
            discovered: LoadOnce::new(),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn access_mode(&self) -> AccessMode {
        self.shared.access_mode
    }

    pub fn pin_snapshot(&self) -> bool {
        self.shared.pin_snapshot
    }

    pub fn is_discovered(&self) -> bool {
        self.discovered.is_loaded()
    }

    /// Layout of the base path, once discovered
    pub fn layout(&self) -> Option<CatalogLayout> {
        self.discovered.get().map(|d| d.layout)
    }

    /// Run schema discovery if it has not completed yet
    pub fn discover_schemas(&self, context: &ClientContext) -> Result<()> {
        self.discovered
            .get_or_try_load(|| self.load_schemas(context))
            .map(|_| ())
    }

    fn load_schemas(&self, context: &ClientContext) -> Result<DiscoveredSchemas> {
        let fs = context.fs();
        let mut has_direct_tables = false;
        let mut child_dirs = Vec::new();

        for entry in fs.list_files(&self.base_path)? {
            if !entry.is_dir || !is_schema_level_candidate(&entry.name) {
                continue;
            }
            if is_table_root(fs, &join_path(&self.base_path, &entry.name)) {
                has_direct_tables = true;
            }
            child_dirs.push(entry.name);
        }

        let mut schemas = CaseInsensitiveMap::new();
        let layout = if has_direct_tables {
            let schema_name = match last_path_component(&self.base_path) {
                "" => DEFAULT_SCHEMA,
                component => component,
            };
            let schema = SchemaDirectory::new(
                schema_name,
                self.base_path.clone(),
                Arc::clone(&self.shared),
            );
            schemas.insert(schema_name, Arc::new(schema));
            CatalogLayout::SingleSchema
        } else {
            for dir_name in child_dirs {
                if is_reserved(&dir_name) {
                    debug!("Skipping reserved directory '{}' in '{}'", dir_name, self.base_path);
                    continue;
                }
                let schema = SchemaDirectory::new(
                    &dir_name,
                    join_path(&self.base_path, &dir_name),
                    Arc::clone(&self.shared),
                );
                if !schemas.insert(&dir_name, Arc::new(schema)) {
                    warn!(
                        "Ignoring directory '{}' in '{}': schema name already taken",
                        dir_name, self.base_path
                    );
                }
            }
            CatalogLayout::MultiSchema
        };

        info!(
            "Discovered {} schema(s) in '{}' for catalog '{}' ({:?})",
            schemas.len(),
            self.base_path,
            self.shared.name,
            layout
        );
        Ok(DiscoveredSchemas { layout, schemas })
    }
}

impl Catalog for CatalogGateway {
    fn name(&self) -> &str {
        &self.shared.name
    }

    fn catalog_type(&self) -> &str {
        CATALOG_TYPE
    }

    fn lookup_schema(
        &self,
        transaction: &CatalogTransaction<'_>,
        schema_name: &str,
        if_not_found: OnEntryNotFound,
    ) -> Result<Option<Arc<dyn SchemaEntry>>> {
        if let Some(context) = transaction.context() {
            self.discover_schemas(context)?;
        }

        if let Some(discovered) = self.discovered.get() {
            if let Some(schema) = discovered.schemas.get(schema_name) {
                return Ok(Some(Arc::clone(schema) as Arc<dyn SchemaEntry>));
            }
            // A lone schema also answers to the default schema and catalog names
            if let Some(schema) = discovered.schemas.only() {
                if schema_name.eq_ignore_ascii_case(DEFAULT_SCHEMA)
                    || schema_name.eq_ignore_ascii_case(&self.shared.name)
                {
                    return Ok(Some(Arc::clone(schema) as Arc<dyn SchemaEntry>));
                }
            }
        }

        match if_not_found {
            OnEntryNotFound::ReturnNull => Ok(None),
            OnEntryNotFound::ThrowException => Err(DeltaClassicError::NotFound(format!(
                "Schema \"{}\" not found in {} catalog \"{}\"",
                schema_name, CATALOG_TYPE, self.shared.name
            ))),
        }
    }

    fn scan_schemas(&self, context: &ClientContext) -> Result<Vec<Arc<dyn SchemaEntry>>> {
        self.discover_schemas(context)?;
        Ok(self
            .discovered
            .get()
            .map(|d| {
                d.schemas
                    .values()
                    .map(|schema| Arc::clone(schema) as Arc<dyn SchemaEntry>)
                    .collect()
            })
            .unwrap_or_default())
    }

    fn in_memory(&self) -> bool {
        false
    }

    fn db_path(&self) -> String {
        self.base_path.clone()
    }

    fn internal_handles(&self) -> Vec<String> {
        self.shared.internal_handles.lock().clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
