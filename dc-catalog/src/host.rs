// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Host-side collaborators: filesystem access and request context
//!
//! The catalog never touches the disk directly. Listing directories and
//! checking for the marker go through [`FileSystem`], which the host
//! provides as part of the [`ClientContext`] of every request.

use dc_common::Result;
use std::fmt;
use std::sync::Arc;

use crate::manager::DatabaseManager;

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }
}

/// Filesystem primitives required by discovery
pub trait FileSystem: Send + Sync {
    /// Immediate children of `path`
    fn list_files(&self, path: &str) -> Result<Vec<DirEntry>>;

    fn directory_exists(&self, path: &str) -> bool;
}

/// [`FileSystem`] over the local disk
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    // An all-separator path normalizes to "", which means the root.
    fn resolve(path: &str) -> &str {
        if path.is_empty() {
            "/"
        } else {
            path
        }
    }
}

impl FileSystem for LocalFileSystem {
    fn list_files(&self, path: &str) -> Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(Self::resolve(path))? {
            let entry = entry?;
            // Follows symlinks so linked table roots are discovered too
            let is_dir = std::fs::metadata(entry.path())
                .map(|meta| meta.is_dir())
                .unwrap_or(false);
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn directory_exists(&self, path: &str) -> bool {
        std::path::Path::new(Self::resolve(path)).is_dir()
    }
}

/// Per-request state handed to catalog operations
#[derive(Clone)]
pub struct ClientContext {
    fs: Arc<dyn FileSystem>,
    db_manager: Arc<DatabaseManager>,
}

impl ClientContext {
    pub fn new(fs: Arc<dyn FileSystem>, db_manager: Arc<DatabaseManager>) -> Self {
        Self { fs, db_manager }
    }

    /// Context over the local disk
    pub fn local(db_manager: Arc<DatabaseManager>) -> Self {
        Self::new(Arc::new(LocalFileSystem), db_manager)
    }

    pub fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    /// Host registry of attached databases
    pub fn db_manager(&self) -> &DatabaseManager {
        &self.db_manager
    }
}

impl fmt::Debug for ClientContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientContext")
            .field("databases", &self.db_manager.list_databases())
            .finish()
    }
}

/// Catalog-level view of a transaction; the context is absent for
/// lookups the host performs outside of a client request.
#[derive(Debug, Clone, Copy)]
pub struct CatalogTransaction<'a> {
    context: Option<&'a ClientContext>,
}

impl<'a> CatalogTransaction<'a> {
    pub fn new(context: &'a ClientContext) -> Self {
        Self {
            context: Some(context),
        }
    }

    pub fn without_context() -> Self {
        Self { context: None }
    }

    pub fn has_context(&self) -> bool {
        self.context.is_some()
    }

    pub fn context(&self) -> Option<&'a ClientContext> {
        self.context
    }
}
