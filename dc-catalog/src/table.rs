// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Table proxy: a table root handed to the delegate engine
//!
//! The proxy does not understand the table format. On first scan it asks the
//! host to attach the table root through the `delta` storage extension under
//! an internal handle name, then forwards scan requests to the single table
//! that attachment exposes. The attached database is looked up by name on
//! every access; its lifetime belongs to the host.

use dc_common::constants::{
    DEFAULT_SCHEMA, DELEGATE_TYPE, INTERNAL_HANDLE_PREFIX, PIN_SNAPSHOT_OPTION, TYPE_OPTION,
};
use dc_common::{CatalogType, DeltaClassicError, OnCreateConflict, OnEntryNotFound, Result};
use parking_lot::RwLock;
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::column::{ColumnDefinition, ColumnList};
use crate::entry::{FunctionData, TableEntry, TableFunction};
use crate::gateway::GatewayShared;
use crate::host::{CatalogTransaction, ClientContext};
use crate::lazy::LoadOnce;
use crate::manager::{AttachInfo, AttachOptions};

fn escape_component(component: &str) -> String {
    component.replace('%', "%25").replace('_', "%5F")
}

/// Registry name of the delegate attachment for one table.
///
/// Components are escaped so that distinct (catalog, schema, table) triples
/// never produce the same name.
pub fn internal_handle_name(catalog: &str, schema: &str, table: &str) -> String {
    format!(
        "{}{}_{}_{}",
        INTERNAL_HANDLE_PREFIX,
        escape_component(catalog),
        escape_component(schema),
        escape_component(table)
    )
}

#[derive(Debug)]
pub struct TableProxy {
    name: String,
    schema_name: String,
    table_path: String,
    internal_handle_name: String,
    shared: Arc<GatewayShared>,
    attached: LoadOnce<()>,
    columns: RwLock<ColumnList>,
}

impl TableProxy {
    pub(crate) fn new(
        name: &str,
        schema_name: &str,
        table_path: String,
        shared: Arc<GatewayShared>,
    ) -> Self {
        Self {
            internal_handle_name: internal_handle_name(&shared.name, schema_name, name),
            name: name.to_string(),
            schema_name: schema_name.to_string(),
            table_path,
            shared,
            attached: LoadOnce::new(),
            columns: RwLock::new(ColumnList::new()),
        }
    }

    /// Directory holding the `_delta_log` marker
    pub fn table_path(&self) -> &str {
        &self.table_path
    }

    pub fn internal_handle_name(&self) -> &str {
        &self.internal_handle_name
    }

    pub fn is_attached(&self) -> bool {
        self.attached.is_loaded()
    }

    /// Attach the delegate for this table, at most once per proxy
    pub fn ensure_attached(&self, context: &ClientContext) -> Result<()> {
        self.attached
            .get_or_try_load(|| self.attach_delegate(context))
            .map(|_| ())
    }

    fn attach_delegate(&self, context: &ClientContext) -> Result<()> {
        let manager = context.db_manager();
        if manager.get_database(&self.internal_handle_name).is_some() {
            // Attached by someone else; its lifetime is not ours to track
            debug!("Reusing internal database '{}'", self.internal_handle_name);
            return Ok(());
        }

        let info = AttachInfo::new(&self.internal_handle_name, &self.table_path)
            .with_on_conflict(OnCreateConflict::IgnoreOnConflict);
        let mut options =
            AttachOptions::new(self.shared.access_mode).with_option(TYPE_OPTION, DELEGATE_TYPE);
        if self.shared.pin_snapshot {
            options = options.with_option(PIN_SNAPSHOT_OPTION, true);
        }

        if let Err(err) = manager.attach_database(context, &info, options) {
            warn!("Attaching delta table '{}' failed: {}", self.table_path, err);
            return Err(match err {
                DeltaClassicError::AttachFailed { .. } => err,
                other => DeltaClassicError::AttachFailed {
                    path: self.table_path.clone(),
                    message: other.to_string(),
                },
            });
        }

        self.shared.register_internal_handle(&self.internal_handle_name);
        info!(
            "Attached delta table '{}' as internal database '{}'",
            self.table_path, self.internal_handle_name
        );
        Ok(())
    }

    /// The delegate's own table entry behind this proxy
    pub fn get_internal_entry(&self, context: &ClientContext) -> Result<Arc<dyn TableEntry>> {
        self.ensure_attached(context)?;

        let database = context
            .db_manager()
            .get_database(&self.internal_handle_name)
            .ok_or_else(|| {
                DeltaClassicError::Internal(format!(
                    "Internal delta database '{}' not found after attach",
                    self.internal_handle_name
                ))
            })?;

        let schema = database
            .catalog()
            .lookup_schema(
                &CatalogTransaction::new(context),
                DEFAULT_SCHEMA,
                OnEntryNotFound::ReturnNull,
            )?
            .ok_or_else(|| {
                DeltaClassicError::Internal(format!(
                    "Internal delta database '{}' has no default schema",
                    self.internal_handle_name
                ))
            })?;

        // The delegate exposes exactly one table; take the first one listed
        schema
            .scan(context, CatalogType::Table)?
            .into_iter()
            .next()
            .ok_or_else(|| {
                DeltaClassicError::Internal(format!(
                    "No table found in internally attached delta database '{}'",
                    self.internal_handle_name
                ))
            })
    }
}

impl TableEntry for TableProxy {
    fn name(&self) -> &str {
        &self.name
    }

    fn schema_name(&self) -> &str {
        &self.schema_name
    }

    fn columns(&self) -> Vec<ColumnDefinition> {
        self.columns.read().to_vec()
    }

    fn get_scan_function(&self, context: &ClientContext) -> Result<(TableFunction, FunctionData)> {
        let internal = self.get_internal_entry(context)?;
        let (function, bind_data) = internal.get_scan_function(context)?;

        let delegate_columns = internal.columns();
        let added = self.columns.write().merge_missing(&delegate_columns);
        if added > 0 {
            debug!("Mirrored {} column(s) onto '{}.{}'", added, self.schema_name, self.name);
        }

        Ok((function, bind_data))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
