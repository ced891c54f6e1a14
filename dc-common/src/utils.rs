// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Utility functions

use std::time::{SystemTime, UNIX_EPOCH};

/// Get current timestamp in milliseconds
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Strip trailing `/` and `\` characters until none remain
pub fn normalize_base_path(path: &str) -> String {
    path.trim_end_matches(['/', '\\']).to_string()
}

/// Final component of a path, splitting on both separators
pub fn last_path_component(path: &str) -> &str {
    let after_slash = match path.rfind('/') {
        Some(pos) => &path[pos + 1..],
        None => path,
    };
    match after_slash.rfind('\\') {
        Some(pos) => &after_slash[pos + 1..],
        None => after_slash,
    }
}

/// Join a child name onto a normalized directory path
pub fn join_path(dir: &str, name: &str) -> String {
    format!("{}/{}", dir, name)
}

/// Names starting with `.` are hidden
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Names starting with `_` are internal/reserved
pub fn is_reserved(name: &str) -> bool {
    name.starts_with('_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_path() {
        assert_eq!(normalize_base_path("/data/lake"), "/data/lake");
        assert_eq!(normalize_base_path("/data/lake/"), "/data/lake");
        assert_eq!(normalize_base_path("/data/lake//\\/"), "/data/lake");
        assert_eq!(normalize_base_path("C:\\lake\\"), "C:\\lake");
        assert_eq!(normalize_base_path("/"), "");
    }

    #[test]
    fn test_last_path_component() {
        assert_eq!(last_path_component("/data/lake"), "lake");
        assert_eq!(last_path_component("lake"), "lake");
        assert_eq!(last_path_component("C:\\data\\lake"), "lake");
        assert_eq!(last_path_component("/mnt/share\\lake"), "lake");
        assert_eq!(last_path_component(""), "");
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("/data", "t1"), "/data/t1");
        assert_eq!(join_path("", "t1"), "/t1");
    }

    #[test]
    fn test_name_prefixes() {
        assert!(is_hidden(".git"));
        assert!(!is_hidden("orders"));
        assert!(is_reserved("_delta_log"));
        assert!(!is_reserved("orders_2024"));
    }
}
