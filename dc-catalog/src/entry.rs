// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Catalog entry interfaces seen by the host engine
//!
//! Each role (catalog, schema, table) implements only the operations that do
//! real work. Every write funnels through a single `mutate` method whose
//! default rejects it as a read-only violation.

use dc_common::{CatalogType, DeltaClassicError, OnEntryNotFound, Result};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::column::ColumnDefinition;
use crate::host::{CatalogTransaction, ClientContext};

/// Scan function produced by the delegate engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFunction {
    pub name: String,
    pub projection_pushdown: bool,
    pub filter_pushdown: bool,
}

impl TableFunction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            projection_pushdown: true,
            filter_pushdown: true,
        }
    }
}

/// Opaque bind data paired with a [`TableFunction`]
pub type FunctionData = Box<dyn Any + Send + Sync>;

/// Column statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseStatistics {
    pub has_null: bool,
    pub distinct_count: Option<u64>,
}

/// Storage details of a table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableStorageInfo {
    pub cardinality: Option<u64>,
    pub index_info: Vec<String>,
}

/// Storage usage of an attached database
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatabaseSize {
    pub total_blocks: u64,
    pub block_size: u64,
    pub free_blocks: u64,
    pub used_blocks: u64,
    pub bytes: u64,
    pub wal_size: u64,
}

/// Write operations addressed to a catalog, including plan rewrites of
/// write statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogMutation {
    CreateSchema { schema: String },
    DropSchema { schema: String },
    PlanCreateTableAs { schema: String, table: String },
    PlanInsert { schema: String, table: String },
    PlanDelete { schema: String, table: String },
    PlanUpdate { schema: String, table: String },
    BindCreateIndex { index: String, table: String },
}

impl fmt::Display for CatalogMutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogMutation::CreateSchema { schema } => write!(f, "CREATE SCHEMA \"{}\"", schema),
            CatalogMutation::DropSchema { schema } => write!(f, "DROP SCHEMA \"{}\"", schema),
            CatalogMutation::PlanCreateTableAs { schema, table } => {
                write!(f, "CREATE TABLE AS \"{}\".\"{}\"", schema, table)
            }
            CatalogMutation::PlanInsert { schema, table } => {
                write!(f, "INSERT INTO \"{}\".\"{}\"", schema, table)
            }
            CatalogMutation::PlanDelete { schema, table } => {
                write!(f, "DELETE FROM \"{}\".\"{}\"", schema, table)
            }
            CatalogMutation::PlanUpdate { schema, table } => {
                write!(f, "UPDATE \"{}\".\"{}\"", schema, table)
            }
            CatalogMutation::BindCreateIndex { index, table } => {
                write!(f, "CREATE INDEX \"{}\" ON \"{}\"", index, table)
            }
        }
    }
}

/// Write operations addressed to a schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaMutation {
    CreateTable { name: String },
    CreateFunction { name: String },
    CreateIndex { name: String, table: String },
    CreateView { name: String },
    CreateSequence { name: String },
    CreateTableFunction { name: String },
    CreateCopyFunction { name: String },
    CreatePragmaFunction { name: String },
    CreateCollation { name: String },
    CreateType { name: String },
    DropEntry { kind: CatalogType, name: String },
    Alter { name: String },
}

impl fmt::Display for SchemaMutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaMutation::CreateTable { name } => write!(f, "CREATE TABLE \"{}\"", name),
            SchemaMutation::CreateFunction { name } => write!(f, "CREATE FUNCTION \"{}\"", name),
            SchemaMutation::CreateIndex { name, table } => {
                write!(f, "CREATE INDEX \"{}\" ON \"{}\"", name, table)
            }
            SchemaMutation::CreateView { name } => write!(f, "CREATE VIEW \"{}\"", name),
            SchemaMutation::CreateSequence { name } => write!(f, "CREATE SEQUENCE \"{}\"", name),
            SchemaMutation::CreateTableFunction { name } => {
                write!(f, "CREATE TABLE FUNCTION \"{}\"", name)
            }
            SchemaMutation::CreateCopyFunction { name } => {
                write!(f, "CREATE COPY FUNCTION \"{}\"", name)
            }
            SchemaMutation::CreatePragmaFunction { name } => {
                write!(f, "CREATE PRAGMA FUNCTION \"{}\"", name)
            }
            SchemaMutation::CreateCollation { name } => write!(f, "CREATE COLLATION \"{}\"", name),
            SchemaMutation::CreateType { name } => write!(f, "CREATE TYPE \"{}\"", name),
            SchemaMutation::DropEntry { kind, name } => write!(f, "DROP {:?} \"{}\"", kind, name),
            SchemaMutation::Alter { name } => write!(f, "ALTER \"{}\"", name),
        }
    }
}

/// Root of a catalog as seen by the host
pub trait Catalog: Send + Sync {
    fn name(&self) -> &str;

    /// Storage type string, e.g. `delta_classic`
    fn catalog_type(&self) -> &str;

    fn lookup_schema(
        &self,
        transaction: &CatalogTransaction<'_>,
        schema_name: &str,
        if_not_found: OnEntryNotFound,
    ) -> Result<Option<Arc<dyn SchemaEntry>>>;

    fn scan_schemas(&self, context: &ClientContext) -> Result<Vec<Arc<dyn SchemaEntry>>>;

    fn mutate(&self, _context: &ClientContext, mutation: &CatalogMutation) -> Result<()> {
        Err(DeltaClassicError::read_only(mutation.to_string()))
    }

    fn database_size(&self, _context: &ClientContext) -> Result<DatabaseSize> {
        Ok(DatabaseSize::default())
    }

    fn in_memory(&self) -> bool;

    fn db_path(&self) -> String;

    /// Registry names of internal databases this catalog attached on its own
    /// behalf. The host detaches them together with the catalog.
    fn internal_handles(&self) -> Vec<String> {
        Vec::new()
    }

    fn as_any(&self) -> &dyn Any;
}

pub trait SchemaEntry: Send + Sync {
    fn name(&self) -> &str;

    fn lookup_entry(
        &self,
        transaction: &CatalogTransaction<'_>,
        kind: CatalogType,
        name: &str,
    ) -> Result<Option<Arc<dyn TableEntry>>>;

    /// Enumerate entries of `kind`; may trigger discovery
    fn scan(&self, context: &ClientContext, kind: CatalogType) -> Result<Vec<Arc<dyn TableEntry>>>;

    /// Enumerate without a request context. Nothing can be discovered here,
    /// so the default yields nothing.
    fn scan_without_context(&self, _kind: CatalogType) -> Vec<Arc<dyn TableEntry>> {
        Vec::new()
    }

    fn mutate(&self, _transaction: &CatalogTransaction<'_>, mutation: &SchemaMutation) -> Result<()> {
        Err(DeltaClassicError::read_only(mutation.to_string()))
    }

    fn as_any(&self) -> &dyn Any;
}

pub trait TableEntry: Send + Sync {
    fn name(&self) -> &str;

    fn schema_name(&self) -> &str;

    /// Snapshot of the currently visible columns
    fn columns(&self) -> Vec<ColumnDefinition>;

    fn get_scan_function(&self, context: &ClientContext) -> Result<(TableFunction, FunctionData)>;

    fn get_statistics(&self, _context: &ClientContext, _column: usize) -> Option<BaseStatistics> {
        None
    }

    fn get_storage_info(&self, _context: &ClientContext) -> TableStorageInfo {
        TableStorageInfo::default()
    }

    fn as_any(&self) -> &dyn Any;
}
