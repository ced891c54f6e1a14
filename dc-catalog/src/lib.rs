// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Read-only catalog over a directory of delta tables
//!
//! This module handles:
//! - Layout detection (single schema vs. schema-per-directory)
//! - Lazy, once-only schema and table discovery
//! - Bridging each table root to the delegate table-format engine
//! - Rejecting every write with a read-only error
//! - Transaction bookkeeping
//!
//! The host side (filesystem, database registry, storage extensions) is
//! modeled by [`host`] and [`manager`]; [`mock`] provides a delegate engine
//! for tests.

pub mod column;
pub mod entry;
pub mod extension;
pub mod gateway;
pub mod host;
pub mod lazy;
pub mod manager;
pub mod marker;
pub mod mock;
pub mod names;
pub mod schema;
pub mod table;
pub mod table_set;
pub mod transaction;

pub use column::{ColumnDefinition, ColumnList};
pub use entry::{
    BaseStatistics, Catalog, CatalogMutation, DatabaseSize, FunctionData, SchemaEntry, SchemaMutation,
    TableEntry, TableFunction, TableStorageInfo,
};
pub use extension::{register, DeltaClassicStorageExtension};
pub use gateway::{CatalogGateway, CatalogLayout};
pub use host::{CatalogTransaction, ClientContext, DirEntry, FileSystem, LocalFileSystem};
pub use manager::{
    AttachInfo, AttachOptions, AttachedDatabase, DatabaseManager, StorageExtension, TransactionManager,
};
pub use schema::SchemaDirectory;
pub use table::{internal_handle_name, TableProxy};
pub use table_set::TableDirectory;
pub use transaction::{Transaction, TransactionRegistry};
