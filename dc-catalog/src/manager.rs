// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Host database manager: the registry of attached databases
//!
//! Attached databases are looked up by name (ignoring ASCII case). Storage
//! extensions are registered by type name and chosen through the `type`
//! attach option.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use dc_common::constants::TYPE_OPTION;
use dc_common::{AccessMode, DeltaClassicError, OnCreateConflict, OptionValue, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::entry::Catalog;
use crate::host::ClientContext;
use crate::transaction::Transaction;

/// Target of an attach request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachInfo {
    /// Registry name
    pub name: String,

    /// Path handed to the storage extension
    pub path: String,

    pub on_conflict: OnCreateConflict,
}

impl AttachInfo {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            on_conflict: OnCreateConflict::ErrorOnConflict,
        }
    }

    pub fn with_on_conflict(mut self, on_conflict: OnCreateConflict) -> Self {
        self.on_conflict = on_conflict;
        self
    }
}

/// Options of an attach request. Names are stored lowercase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttachOptions {
    pub access_mode: AccessMode,
    pub options: HashMap<String, OptionValue>,
}

impl AttachOptions {
    pub fn new(access_mode: AccessMode) -> Self {
        Self {
            access_mode,
            options: HashMap::new(),
        }
    }

    pub fn with_option(mut self, name: &str, value: impl Into<OptionValue>) -> Self {
        self.options.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Remove an option, returning its value if it was present
    pub fn take(&mut self, name: &str) -> Option<OptionValue> {
        self.options.remove(&name.to_ascii_lowercase())
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(&name.to_ascii_lowercase())
    }
}

/// Storage backend pluggable into the host
pub trait StorageExtension: Send + Sync {
    /// Build the catalog for an attach request. Options the extension
    /// understands are consumed from `options`.
    fn attach(
        &self,
        context: &ClientContext,
        info: &AttachInfo,
        options: &mut AttachOptions,
    ) -> Result<Arc<dyn Catalog>>;

    fn create_transaction_manager(&self, catalog: &Arc<dyn Catalog>) -> Arc<dyn TransactionManager>;
}

/// Transaction lifecycle of one attached database
pub trait TransactionManager: Send + Sync {
    fn start_transaction(&self, context: &ClientContext) -> Arc<Transaction>;

    fn commit_transaction(&self, context: &ClientContext, transaction: &Transaction) -> Result<()>;

    fn rollback_transaction(&self, transaction: &Transaction);

    fn checkpoint(&self, context: &ClientContext, force: bool);
}

/// A database registered with the host
pub struct AttachedDatabase {
    name: String,
    path: String,
    access_mode: AccessMode,
    catalog: Arc<dyn Catalog>,
    transaction_manager: Arc<dyn TransactionManager>,
}

impl AttachedDatabase {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn access_mode(&self) -> AccessMode {
        self.access_mode
    }

    pub fn catalog(&self) -> &Arc<dyn Catalog> {
        &self.catalog
    }

    pub fn transaction_manager(&self) -> &Arc<dyn TransactionManager> {
        &self.transaction_manager
    }
}

impl fmt::Debug for AttachedDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachedDatabase")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("access_mode", &self.access_mode)
            .field("type", &self.catalog.catalog_type())
            .finish()
    }
}

/// Registry of attached databases and storage extensions
pub struct DatabaseManager {
    databases: DashMap<String, Arc<AttachedDatabase>>,
    extensions: DashMap<String, Arc<dyn StorageExtension>>,
}

impl DatabaseManager {
    pub fn new() -> Self {
        Self {
            databases: DashMap::new(),
            extensions: DashMap::new(),
        }
    }

    fn key(name: &str) -> String {
        name.to_ascii_lowercase()
    }

    pub fn register_storage_extension(&self, type_name: &str, extension: Arc<dyn StorageExtension>) {
        debug!("Registering storage extension '{}'", type_name);
        self.extensions.insert(Self::key(type_name), extension);
    }

    pub fn has_storage_extension(&self, type_name: &str) -> bool {
        self.extensions.contains_key(&Self::key(type_name))
    }

    /// Look up an attached database by name
    pub fn get_database(&self, name: &str) -> Option<Arc<AttachedDatabase>> {
        self.databases
            .get(&Self::key(name))
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Attach a database through the storage extension named by the `type` option
    pub fn attach_database(
        &self,
        context: &ClientContext,
        info: &AttachInfo,
        mut options: AttachOptions,
    ) -> Result<Arc<AttachedDatabase>> {
        if let Some(existing) = self.get_database(&info.name) {
            match info.on_conflict {
                OnCreateConflict::IgnoreOnConflict => return Ok(existing),
                OnCreateConflict::ErrorOnConflict => {
                    return Err(DeltaClassicError::AlreadyExists(format!(
                        "Database \"{}\" is already attached",
                        info.name
                    )))
                }
                OnCreateConflict::ReplaceOnConflict => self.detach_database(&info.name)?,
            }
        }

        let type_name = match options.take(TYPE_OPTION) {
            Some(OptionValue::Varchar(type_name)) => type_name,
            Some(other) => {
                return Err(DeltaClassicError::InvalidArgument(format!(
                    "Invalid value for option \"{}\": {:?}",
                    TYPE_OPTION, other
                )))
            }
            None => {
                return Err(DeltaClassicError::InvalidArgument(format!(
                    "Attaching \"{}\" requires a \"{}\" option",
                    info.name, TYPE_OPTION
                )))
            }
        };
        let extension = self
            .extensions
            .get(&Self::key(&type_name))
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| {
                DeltaClassicError::InvalidArgument(format!("Unknown storage type \"{}\"", type_name))
            })?;

        let catalog = extension.attach(context, info, &mut options)?;
        if let Some(unrecognized) = options.options.keys().next() {
            return Err(DeltaClassicError::InvalidArgument(format!(
                "Unrecognized attach option \"{}\" for storage type \"{}\"",
                unrecognized, type_name
            )));
        }
        let transaction_manager = extension.create_transaction_manager(&catalog);

        let database = Arc::new(AttachedDatabase {
            name: info.name.clone(),
            path: info.path.clone(),
            access_mode: options.access_mode,
            catalog,
            transaction_manager,
        });

        match self.databases.entry(Self::key(&info.name)) {
            Entry::Occupied(occupied) => {
                if info.on_conflict == OnCreateConflict::ErrorOnConflict {
                    return Err(DeltaClassicError::AlreadyExists(format!(
                        "Database \"{}\" is already attached",
                        info.name
                    )));
                }
                // Lost a race with a concurrent attach of the same name
                Ok(Arc::clone(occupied.get()))
            }
            Entry::Vacant(vacant) => {
                info!(
                    "Attached database '{}' ({}) at '{}' as {:?}",
                    info.name, type_name, info.path, database.access_mode
                );
                vacant.insert(Arc::clone(&database));
                Ok(database)
            }
        }
    }

    /// Detach a database together with the internal databases its catalog reports
    pub fn detach_database(&self, name: &str) -> Result<()> {
        let (_, database) = self
            .databases
            .remove(&Self::key(name))
            .ok_or_else(|| DeltaClassicError::NotFound(format!("Database \"{}\" is not attached", name)))?;

        for handle in database.catalog.internal_handles() {
            if self.databases.remove(&Self::key(&handle)).is_some() {
                debug!("Detached internal database '{}' of '{}'", handle, name);
            }
        }
        info!("Detached database '{}'", name);
        Ok(())
    }

    /// All attached database names, sorted
    pub fn list_databases(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .databases
            .iter()
            .map(|entry| entry.value().name.clone())
            .collect();
        names.sort();
        names
    }
}

impl Default for DatabaseManager {
    fn default() -> Self {
        Self::new()
    }
}
