// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! delta_classic command-line entry point
//!
//! Attaches a directory of delta tables read-only, lists what discovery
//! finds and detaches again.

use clap::Parser;
use dc_catalog::{
    AttachInfo, AttachOptions, AttachedDatabase, CatalogGateway, ClientContext,
    DatabaseManager, SchemaDirectory, TableProxy,
};
use dc_common::constants::{CATALOG_TYPE, PIN_SNAPSHOT_OPTION, TYPE_OPTION};
use dc_common::{AccessMode, CatalogType, Config, OutputFormat};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the delta tables
    path: String,

    /// Name to attach the directory under
    #[arg(short, long)]
    name: Option<String>,

    /// Pin one table version per attachment
    #[arg(long, default_value_t = false)]
    pin_snapshot: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf/delta_classic.toml")]
    config: PathBuf,

    /// Log level
    #[arg(short, long)]
    log_level: Option<String>,

    /// Output format
    #[arg(short, long, value_parser = ["text", "json"])]
    format: Option<String>,
}

#[derive(Debug, Serialize)]
struct CatalogListing {
    catalog: String,
    catalog_type: String,
    base_path: String,
    layout: Option<String>,
    schemas: Vec<SchemaListing>,
}

#[derive(Debug, Serialize)]
struct SchemaListing {
    name: String,
    path: String,
    tables: Vec<TableListing>,
}

#[derive(Debug, Serialize)]
struct TableListing {
    name: String,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    internal_handle: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (mut config, config_found) = load_config(&args.config)?;
    apply_overrides(&mut config, &args);
    config.validate()?;

    init_logging(&config.log_level)?;

    debug!("{}", dc_common::version::VersionInfo::new());
    if !config_found {
        warn!("Config file not found: {:?}, using defaults", args.config);
    }

    let manager = Arc::new(DatabaseManager::new());
    dc_catalog::register(&manager);
    let context = ClientContext::local(Arc::clone(&manager));

    let mut options = AttachOptions::new(AccessMode::ReadOnly).with_option(TYPE_OPTION, CATALOG_TYPE);
    if config.pin_snapshot {
        options = options.with_option(PIN_SNAPSHOT_OPTION, true);
    }
    let database = manager
        .attach_database(&context, &AttachInfo::new(&config.catalog_name, &args.path), options)
        .map_err(|e| anyhow::anyhow!("Failed to attach '{}': {}", args.path, e))?;
    info!("Attached '{}' as '{}'", args.path, config.catalog_name);

    let listing = collect_listing(&context, &database, config.show_internal_handles);
    let detached = manager.detach_database(&config.catalog_name);

    let output = match config.output_format {
        OutputFormat::Text => render_text(&listing?),
        OutputFormat::Json => serde_json::to_string_pretty(&listing?)?,
    };
    println!("{}", output);

    if let Err(e) = detached {
        warn!("Failed to detach '{}': {}", config.catalog_name, e);
    }
    Ok(())
}

/// Initialize logging
fn init_logging(log_level: &str) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    // Listing goes to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))
}

/// Load configuration from file. The flag is false when the file is missing
/// and defaults were used; logging is not up yet, so the caller reports it.
fn load_config(config_path: &PathBuf) -> anyhow::Result<(Config, bool)> {
    if config_path.exists() {
        let config = Config::from_file(config_path)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        Ok((config, true))
    } else {
        Ok((Config::default(), false))
    }
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(name) = &args.name {
        config.catalog_name = name.clone();
    }
    if args.pin_snapshot {
        config.pin_snapshot = true;
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }
    match args.format.as_deref() {
        Some("json") => config.output_format = OutputFormat::Json,
        Some("text") => config.output_format = OutputFormat::Text,
        _ => {}
    }
}

fn collect_listing(
    context: &ClientContext,
    database: &AttachedDatabase,
    show_internal_handles: bool,
) -> anyhow::Result<CatalogListing> {
    let catalog = database.catalog();
    let mut schemas = Vec::new();

    for schema in catalog.scan_schemas(context)? {
        let schema_path = schema
            .as_any()
            .downcast_ref::<SchemaDirectory>()
            .map(|dir| dir.schema_path().to_string())
            .unwrap_or_default();

        let mut tables = Vec::new();
        for table in schema.scan(context, CatalogType::Table)? {
            let Some(proxy) = table.as_any().downcast_ref::<TableProxy>() else {
                continue;
            };
            tables.push(TableListing {
                name: table.name().to_string(),
                path: proxy.table_path().to_string(),
                internal_handle: show_internal_handles
                    .then(|| proxy.internal_handle_name().to_string()),
            });
        }

        schemas.push(SchemaListing {
            name: schema.name().to_string(),
            path: schema_path,
            tables,
        });
    }

    let gateway = catalog.as_any().downcast_ref::<CatalogGateway>();
    Ok(CatalogListing {
        catalog: catalog.name().to_string(),
        catalog_type: catalog.catalog_type().to_string(),
        base_path: catalog.db_path(),
        layout: gateway.and_then(|g| g.layout()).map(|layout| format!("{:?}", layout)),
        schemas,
    })
}

fn render_text(listing: &CatalogListing) -> String {
    let mut lines = Vec::new();
    for schema in &listing.schemas {
        if schema.tables.is_empty() {
            lines.push(format!("{} (no tables)", schema.name));
        }
        for table in &schema.tables {
            let mut line = format!("{}.{} -> {}", schema.name, table.name, table.path);
            if let Some(handle) = &table.internal_handle {
                line.push_str(&format!(" [{}]", handle));
            }
            lines.push(line);
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_for(base: &str, show_internal_handles: bool) -> CatalogListing {
        let manager = Arc::new(DatabaseManager::new());
        dc_catalog::register(&manager);
        let context = ClientContext::local(Arc::clone(&manager));
        let options = AttachOptions::new(AccessMode::ReadOnly).with_option(TYPE_OPTION, CATALOG_TYPE);
        let database = manager
            .attach_database(&context, &AttachInfo::new("lake", base), options)
            .unwrap();
        collect_listing(&context, &database, show_internal_handles).unwrap()
    }

    fn lake() -> (tempfile::TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("lake/sales/orders/_delta_log")).unwrap();
        std::fs::create_dir_all(dir.path().join("lake/hr/people/_delta_log")).unwrap();
        let base = dir.path().join("lake").to_string_lossy().into_owned();
        (dir, base)
    }

    #[test]
    fn test_text_listing() {
        let (_dir, base) = lake();
        let listing = listing_for(&base, false);
        let text = render_text(&listing);
        assert_eq!(
            text,
            format!("hr.people -> {0}/hr/people\nsales.orders -> {0}/sales/orders", base)
        );
    }

    #[test]
    fn test_json_listing() {
        let (_dir, base) = lake();
        let listing = listing_for(&base, true);
        let value = serde_json::to_value(&listing).unwrap();
        assert_eq!(value["catalog_type"], "delta_classic");
        assert_eq!(value["layout"], "MultiSchema");
        assert_eq!(value["schemas"][1]["name"], "sales");
        assert_eq!(
            value["schemas"][1]["tables"][0]["internal_handle"],
            "__dc_lake_sales_orders"
        );
    }

    #[test]
    fn test_listed_handle_matches_proxy() {
        let (_dir, base) = lake();
        let listing = listing_for(&base, true);
        let handle = listing.schemas[0].tables[0].internal_handle.clone().unwrap();
        assert_eq!(handle, dc_catalog::internal_handle_name("lake", "hr", "people"));

        let hidden = listing_for(&base, false);
        assert!(hidden.schemas[0].tables[0].internal_handle.is_none());
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, found) = load_config(&dir.path().join("absent.toml")).unwrap();
        assert!(!found);
        assert_eq!(config.catalog_name, Config::default().catalog_name);

        let path = dir.path().join("present.toml");
        std::fs::write(&path, "catalog_name = \"lake\"\n").unwrap();
        let (config, found) = load_config(&path).unwrap();
        assert!(found);
        assert_eq!(config.catalog_name, "lake");
    }

    #[test]
    fn test_cli_overrides() {
        let args = Args::parse_from([
            "delta-classic",
            "/data/lake",
            "--name",
            "warehouse",
            "--pin-snapshot",
            "--format",
            "json",
        ]);
        let mut config = Config::default();
        apply_overrides(&mut config, &args);
        assert_eq!(config.catalog_name, "warehouse");
        assert!(config.pin_snapshot);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.log_level, "info");
    }
}
