// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Build identity of the delta-classic binaries

use serde::Serialize;
use std::fmt;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Short git sha, or `unknown` outside a checkout
pub const GIT_COMMIT: &str = env!("DC_GIT_SHA");

/// RFC 3339 build timestamp
pub const BUILD_TIME: &str = env!("DC_BUILD_TIMESTAMP");

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    pub version: &'static str,
    pub git_commit: &'static str,
    pub build_time: &'static str,
    pub rustc: String,
}

impl VersionInfo {
    pub fn new() -> Self {
        Self {
            version: VERSION,
            git_commit: GIT_COMMIT,
            build_time: BUILD_TIME,
            rustc: rustc_version_runtime::version().to_string(),
        }
    }

    /// Was the sha resolved at build time?
    pub fn has_commit(&self) -> bool {
        self.git_commit != "unknown"
    }
}

impl Default for VersionInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "delta-classic {}", self.version)?;
        if self.has_commit() {
            write!(f, " ({})", self.git_commit)?;
        }
        write!(f, ", built {} with rustc {}", self.build_time, self.rustc)
    }
}
