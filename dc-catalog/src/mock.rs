// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Mock delegate engine for testing
//!
//! Stands in for the real `delta` table-format engine. Each attach yields a
//! catalog with a `main` schema holding one table named after the table root.
//! Columns, attach failures and contract violations can be configured per
//! table path, and every attach request is recorded for inspection.

use dashmap::{DashMap, DashSet};
use dc_common::constants::{DEFAULT_SCHEMA, DELEGATE_TYPE, PIN_SNAPSHOT_OPTION};
use dc_common::utils::last_path_component;
use dc_common::{AccessMode, CatalogType, DeltaClassicError, LogicalType, OnEntryNotFound, OptionValue, Result};
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::sync::Arc;

use crate::column::{ColumnDefinition, ColumnList};
use crate::entry::{Catalog, FunctionData, SchemaEntry, TableEntry, TableFunction};
use crate::host::{CatalogTransaction, ClientContext};
use crate::manager::{AttachInfo, AttachOptions, DatabaseManager, StorageExtension, TransactionManager};
use crate::marker::is_table_root;
use crate::transaction::TransactionRegistry;

/// Name of the scan function produced by the mock
pub const MOCK_SCAN_FUNCTION: &str = "delta_scan";

/// One attach request as seen by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockAttachRecord {
    pub handle: String,
    pub path: String,
    pub access_mode: AccessMode,
    pub pin_snapshot: bool,
}

/// Bind data handed out with the mock scan function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockBindData {
    pub table_path: String,
    pub pin_snapshot: bool,
}

/// Mock `delta` storage extension
#[derive(Debug, Default)]
pub struct MockDeltaEngine {
    tables: DashMap<String, Arc<RwLock<ColumnList>>>,
    failures: DashMap<String, String>,
    tableless: DashSet<String>,
    attaches: Mutex<Vec<MockAttachRecord>>,
}

impl MockDeltaEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register as the `delta` storage extension of `manager`
    pub fn register(self: &Arc<Self>, manager: &DatabaseManager) {
        manager.register_storage_extension(DELEGATE_TYPE, Arc::clone(self) as Arc<dyn StorageExtension>);
    }

    fn columns_for(&self, path: &str) -> Arc<RwLock<ColumnList>> {
        let entry = self.tables.entry(path.to_string()).or_insert_with(|| {
            let mut columns = ColumnList::new();
            columns.add_column(ColumnDefinition::new("id", LogicalType::BigInt));
            Arc::new(RwLock::new(columns))
        });
        Arc::clone(entry.value())
    }

    /// Replace the columns reported for the table at `path`
    pub fn set_columns(&self, path: &str, columns: Vec<ColumnDefinition>) {
        let list = self.columns_for(path);
        *list.write() = columns.into_iter().collect();
    }

    /// Add a column upstream, as a schema change in the table log would
    pub fn add_column(&self, path: &str, column: ColumnDefinition) -> bool {
        self.columns_for(path).write().add_column(column)
    }

    /// Make attaching `path` fail with `message`
    pub fn fail_attach(&self, path: &str, message: &str) {
        self.failures.insert(path.to_string(), message.to_string());
    }

    /// Attach `path` successfully but expose no table in it
    pub fn expose_no_tables(&self, path: &str) {
        self.tableless.insert(path.to_string());
    }

    pub fn attach_records(&self) -> Vec<MockAttachRecord> {
        self.attaches.lock().clone()
    }

    pub fn attach_count(&self) -> usize {
        self.attaches.lock().len()
    }
}

impl StorageExtension for MockDeltaEngine {
    fn attach(
        &self,
        context: &ClientContext,
        info: &AttachInfo,
        options: &mut AttachOptions,
    ) -> Result<Arc<dyn Catalog>> {
        let pin_snapshot = matches!(
            options.take(PIN_SNAPSHOT_OPTION),
            Some(OptionValue::Boolean(true))
        );
        self.attaches.lock().push(MockAttachRecord {
            handle: info.name.clone(),
            path: info.path.clone(),
            access_mode: options.access_mode,
            pin_snapshot,
        });

        if let Some(message) = self.failures.get(&info.path) {
            return Err(DeltaClassicError::InvalidArgument(message.value().clone()));
        }
        if !is_table_root(context.fs(), &info.path) {
            return Err(DeltaClassicError::InvalidArgument(format!(
                "\"{}\" is not a delta table: no _delta_log directory",
                info.path
            )));
        }

        let table = if self.tableless.contains(&info.path) {
            None
        } else {
            Some(Arc::new(MockDeltaTable {
                name: last_path_component(&info.path).to_string(),
                table_path: info.path.clone(),
                pin_snapshot,
                columns: self.columns_for(&info.path),
            }))
        };

        Ok(Arc::new(MockDeltaCatalog {
            name: info.name.clone(),
            path: info.path.clone(),
            schema: Arc::new(MockDeltaSchema { table }),
        }))
    }

    fn create_transaction_manager(&self, catalog: &Arc<dyn Catalog>) -> Arc<dyn TransactionManager> {
        Arc::new(TransactionRegistry::new(catalog.name()))
    }
}

struct MockDeltaCatalog {
    name: String,
    path: String,
    schema: Arc<MockDeltaSchema>,
}

impl Catalog for MockDeltaCatalog {
    fn name(&self) -> &str {
        &self.name
    }

    fn catalog_type(&self) -> &str {
        DELEGATE_TYPE
    }

    fn lookup_schema(
        &self,
        _transaction: &CatalogTransaction<'_>,
        schema_name: &str,
        if_not_found: OnEntryNotFound,
    ) -> Result<Option<Arc<dyn SchemaEntry>>> {
        if schema_name.eq_ignore_ascii_case(DEFAULT_SCHEMA) {
            return Ok(Some(Arc::clone(&self.schema) as Arc<dyn SchemaEntry>));
        }
        match if_not_found {
            OnEntryNotFound::ReturnNull => Ok(None),
            OnEntryNotFound::ThrowException => Err(DeltaClassicError::NotFound(format!(
                "Schema \"{}\" not found",
                schema_name
            ))),
        }
    }

    fn scan_schemas(&self, _context: &ClientContext) -> Result<Vec<Arc<dyn SchemaEntry>>> {
        Ok(vec![Arc::clone(&self.schema) as Arc<dyn SchemaEntry>])
    }

    fn in_memory(&self) -> bool {
        false
    }

    fn db_path(&self) -> String {
        self.path.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct MockDeltaSchema {
    table: Option<Arc<MockDeltaTable>>,
}

impl SchemaEntry for MockDeltaSchema {
    fn name(&self) -> &str {
        DEFAULT_SCHEMA
    }

    fn lookup_entry(
        &self,
        _transaction: &CatalogTransaction<'_>,
        kind: CatalogType,
        name: &str,
    ) -> Result<Option<Arc<dyn TableEntry>>> {
        if kind != CatalogType::Table {
            return Ok(None);
        }
        Ok(self
            .table
            .as_ref()
            .filter(|table| table.name.eq_ignore_ascii_case(name))
            .map(|table| Arc::clone(table) as Arc<dyn TableEntry>))
    }

    fn scan(&self, _context: &ClientContext, kind: CatalogType) -> Result<Vec<Arc<dyn TableEntry>>> {
        if kind != CatalogType::Table {
            return Ok(Vec::new());
        }
        Ok(self
            .table
            .iter()
            .map(|table| Arc::clone(table) as Arc<dyn TableEntry>)
            .collect())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct MockDeltaTable {
    name: String,
    table_path: String,
    pin_snapshot: bool,
    columns: Arc<RwLock<ColumnList>>,
}

impl TableEntry for MockDeltaTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn schema_name(&self) -> &str {
        DEFAULT_SCHEMA
    }

    fn columns(&self) -> Vec<ColumnDefinition> {
        self.columns.read().to_vec()
    }

    fn get_scan_function(&self, _context: &ClientContext) -> Result<(TableFunction, FunctionData)> {
        let bind_data = MockBindData {
            table_path: self.table_path.clone(),
            pin_snapshot: self.pin_snapshot,
        };
        Ok((TableFunction::new(MOCK_SCAN_FUNCTION), Box::new(bind_data)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
