// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

use std::process::Command;

fn main() {
    let git_hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|hash| hash.trim().to_string())
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=DC_GIT_SHA={}", git_hash);
    println!("cargo:rustc-env=DC_BUILD_TIMESTAMP={}", chrono::Utc::now().to_rfc3339());

    println!("cargo:rerun-if-changed=../.git/HEAD");
}
