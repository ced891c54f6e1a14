// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Table-root detection by marker directory

use dc_common::constants::MARKER_DIR;
use dc_common::utils::{is_hidden, is_reserved, join_path};

use crate::host::FileSystem;

/// Does `dir` contain the marker subdirectory?
pub fn is_table_root(fs: &dyn FileSystem, dir: &str) -> bool {
    fs.directory_exists(&join_path(dir, MARKER_DIR))
}

/// Child names considered while discovering schemas under the base path.
/// The marker itself is excluded: it means the base path is a table root.
pub fn is_schema_level_candidate(name: &str) -> bool {
    !name.is_empty() && !is_hidden(name) && name != MARKER_DIR
}

/// Child names considered while discovering tables inside a schema
pub fn is_table_candidate(name: &str) -> bool {
    !name.is_empty() && !is_hidden(name) && !is_reserved(name)
}
