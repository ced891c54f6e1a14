// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Constants used throughout the delta_classic catalog

/// Storage extension / catalog type name
pub const CATALOG_TYPE: &str = "delta_classic";

/// Storage type requested from the delegate engine
pub const DELEGATE_TYPE: &str = "delta";

/// Subdirectory whose presence marks a table root
pub const MARKER_DIR: &str = "_delta_log";

/// Default schema name of the host engine
pub const DEFAULT_SCHEMA: &str = "main";

/// Prefix of internal delegate handle names
pub const INTERNAL_HANDLE_PREFIX: &str = "__dc_";

/// Attach option that pins the delegate to a single snapshot
pub const PIN_SNAPSHOT_OPTION: &str = "pin_snapshot";

/// Attach option naming the storage type
pub const TYPE_OPTION: &str = "type";

/// Default catalog name used by the command line tool
pub const DEFAULT_CATALOG_NAME: &str = "delta";
