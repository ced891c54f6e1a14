// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Error types for the delta_classic catalog

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeltaClassicError {
    /// A mutating operation was attempted against the read-only catalog
    #[error("delta_classic databases are read-only: {0} is not permitted")]
    ReadOnly(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The delegate engine refused to attach a table root
    #[error("Failed to attach delta table at \"{path}\": {message}")]
    AttachFailed { path: String, message: String },

    /// The delegate broke its contract (e.g. attached but exposes no table)
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DeltaClassicError {
    /// Build the read-only violation for the named operation
    pub fn read_only(operation: impl Into<String>) -> Self {
        DeltaClassicError::ReadOnly(operation.into())
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self, DeltaClassicError::ReadOnly(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DeltaClassicError::NotFound(_))
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, DeltaClassicError::Internal(_))
    }
}

pub type Result<T> = std::result::Result<T, DeltaClassicError>;
