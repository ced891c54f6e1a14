// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Schema directory: one discovered schema of a gateway

use dc_common::{CatalogType, Result};
use std::any::Any;
use std::sync::Arc;

use crate::entry::{SchemaEntry, TableEntry};
use crate::gateway::GatewayShared;
use crate::host::{CatalogTransaction, ClientContext};
use crate::table_set::TableDirectory;

/// A schema backed by a directory. Its tables are discovered lazily by the
/// owned [`TableDirectory`]; every creation request is rejected.
#[derive(Debug)]
pub struct SchemaDirectory {
    name: String,
    schema_path: String,
    tables: TableDirectory,
}

impl SchemaDirectory {
    pub(crate) fn new(name: &str, schema_path: String, shared: Arc<GatewayShared>) -> Self {
        Self {
            name: name.to_string(),
            tables: TableDirectory::new(name, schema_path.clone(), shared),
            schema_path,
        }
    }

    /// Absolute directory of this schema
    pub fn schema_path(&self) -> &str {
        &self.schema_path
    }

    pub fn tables(&self) -> &TableDirectory {
        &self.tables
    }
}

impl SchemaEntry for SchemaDirectory {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup_entry(
        &self,
        transaction: &CatalogTransaction<'_>,
        kind: CatalogType,
        name: &str,
    ) -> Result<Option<Arc<dyn TableEntry>>> {
        if kind != CatalogType::Table {
            return Ok(None);
        }
        // Discovery needs the filesystem, which only a context provides
        match transaction.context() {
            Some(context) => self.tables.get_entry(context, name),
            None => Ok(None),
        }
    }

    fn scan(&self, context: &ClientContext, kind: CatalogType) -> Result<Vec<Arc<dyn TableEntry>>> {
        if kind != CatalogType::Table {
            return Ok(Vec::new());
        }
        self.tables.scan(context)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
