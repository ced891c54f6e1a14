// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Common utilities and foundational types for the delta_classic catalog
//!
//! This crate provides:
//! - Error types and result handling
//! - Configuration management
//! - Shared value types (access modes, catalog kinds, logical types)
//! - Path utilities
//! - Constants

pub mod error;
pub mod config;
pub mod types;
pub mod utils;
pub mod constants;
pub mod version;

pub use error::{DeltaClassicError, Result};
pub use config::{Config, OutputFormat};
pub use types::{
    AccessMode, CatalogType, LogicalType, OnCreateConflict, OnEntryNotFound, OptionValue,
    TransactionId,
};
