// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! `delta_classic` storage extension: the attach entry point

use dc_common::constants::{CATALOG_TYPE, PIN_SNAPSHOT_OPTION};
use dc_common::utils::normalize_base_path;
use dc_common::{AccessMode, DeltaClassicError, Result};
use std::sync::Arc;
use tracing::debug;

use crate::entry::Catalog;
use crate::gateway::CatalogGateway;
use crate::host::ClientContext;
use crate::manager::{AttachInfo, AttachOptions, DatabaseManager, StorageExtension, TransactionManager};
use crate::transaction::TransactionRegistry;

#[derive(Debug, Default)]
pub struct DeltaClassicStorageExtension;

impl StorageExtension for DeltaClassicStorageExtension {
    fn attach(
        &self,
        context: &ClientContext,
        info: &AttachInfo,
        options: &mut AttachOptions,
    ) -> Result<Arc<dyn Catalog>> {
        // Whatever was requested, these catalogs are read-only
        options.access_mode = AccessMode::ReadOnly;

        let base_path = normalize_base_path(&info.path);
        let pin_snapshot = options.take(PIN_SNAPSHOT_OPTION).is_some();

        if !context.fs().directory_exists(&base_path) {
            return Err(DeltaClassicError::NotFound(format!(
                "{} path \"{}\" does not exist or is not a directory",
                CATALOG_TYPE, info.path
            )));
        }

        debug!(
            "Creating {} catalog '{}' over '{}' (pin_snapshot: {})",
            CATALOG_TYPE, info.name, base_path, pin_snapshot
        );
        Ok(Arc::new(CatalogGateway::new(&info.name, base_path, pin_snapshot)))
    }

    fn create_transaction_manager(&self, catalog: &Arc<dyn Catalog>) -> Arc<dyn TransactionManager> {
        Arc::new(TransactionRegistry::new(catalog.name()))
    }
}

/// Make `type = delta_classic` attachable on this host
pub fn register(manager: &DatabaseManager) {
    manager.register_storage_extension(CATALOG_TYPE, Arc::new(DeltaClassicStorageExtension));
}
