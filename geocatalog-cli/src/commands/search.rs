//! Combined search command.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use geocatalog::cache::MemoryResultCache;
use geocatalog::catalog::{Catalog, CatalogSnapshot};
use geocatalog::config::SearchConfig;
use geocatalog::search::{SearchEngine, SearchOptions};
use geocatalog::thumbnail::NoThumbnails;
use serde_json::Value;

use crate::error::CliError;

/// Arguments for `geocatalog search`.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Free-text query; omit to list everything
    pub query: Option<String>,

    /// Catalog snapshot JSON file
    #[arg(long)]
    pub catalog: PathBuf,

    /// Restrict results: "map", "layer", or a layer store type
    #[arg(long)]
    pub bytype: Option<String>,

    /// Restrict layer results to a topic category
    #[arg(long)]
    pub bytopic: Option<String>,

    /// Exclude layers whose name matches this pattern (repeatable)
    #[arg(long = "exclude")]
    pub exclusions: Vec<String>,

    /// Print full normalized results as a JSON array
    #[arg(long)]
    pub json: bool,
}

/// Run a combined search over the snapshot and print results sorted by
/// last-modified, newest first.
pub fn run(args: SearchArgs) -> Result<(), CliError> {
    let snapshot = CatalogSnapshot::load(&args.catalog).map_err(CliError::Snapshot)?;
    let (catalog, _wms, backend) = snapshot.into_collaborators();

    let config = SearchConfig::new()
        .with_exclusions(&args.exclusions)
        .map_err(|e| CliError::Config(e.to_string()))?;

    let engine = SearchEngine::new(
        Arc::clone(&catalog) as Arc<dyn Catalog>,
        Arc::new(backend),
        Arc::new(MemoryResultCache::new()),
        Arc::new(NoThumbnails),
        Arc::new(config),
    );

    let options = SearchOptions {
        bytype: args.bytype,
        bytopic: args.bytopic,
    };
    let query = args.query.unwrap_or_default();
    let mut results = engine.combined_search(&query, &options);
    results.sort_by(|a, b| b.last_modified().cmp(a.last_modified()));

    if args.json {
        let fields: Vec<Value> = results
            .iter()
            .map(|n| Value::Object(n.fields().clone()))
            .collect();
        let rendered = serde_json::to_string_pretty(&fields)
            .map_err(|e| CliError::Output(e.to_string()))?;
        println!("{rendered}");
    } else {
        println!("{} results", results.len());
        for result in &results {
            let display_type = result
                .fields()
                .get("_display_type")
                .and_then(Value::as_str)
                .unwrap_or("?");
            println!(
                "  [{}] {} (modified {})",
                display_type,
                result.title(),
                result.last_modified()
            );
        }
    }
    Ok(())
}
