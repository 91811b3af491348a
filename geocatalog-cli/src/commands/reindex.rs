//! Batch re-indexing command.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use geocatalog::catalog::{Catalog, CatalogSnapshot};
use geocatalog::index::{update_all_indices, IndexEngine, IndexStore};
use tracing::info;

use crate::error::CliError;

/// Arguments for `geocatalog reindex`.
#[derive(Debug, Args)]
pub struct ReindexArgs {
    /// Catalog snapshot JSON file
    #[arg(long)]
    pub catalog: PathBuf,

    /// Refresh existing index records as well as new ones
    #[arg(long)]
    pub update: bool,
}

/// Re-index every map and layer in the snapshot, printing a summary.
pub fn run(args: ReindexArgs) -> Result<(), CliError> {
    info!(catalog = %args.catalog.display(), update = args.update, "re-indexing catalog");
    let snapshot = CatalogSnapshot::load(&args.catalog).map_err(CliError::Snapshot)?;
    let (catalog, wms, _search) = snapshot.into_collaborators();

    let engine = IndexEngine::new(
        Arc::new(IndexStore::new()),
        Arc::clone(&catalog) as Arc<dyn Catalog>,
        Arc::new(wms),
    );

    let report = update_all_indices(catalog.as_ref(), &engine, args.update);

    println!("Re-indexed {} resources:", report.total());
    println!("  indexed: {}", report.indexed);
    println!("  skipped: {}", report.skipped);
    println!("  stale:   {}", report.stale);
    println!("  failed:  {}", report.failed);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SNAPSHOT: &str = r#"{
        "layers": [
            {
                "id": 1,
                "uuid": "uuid-1",
                "typename": "base:roads",
                "title": "Roads",
                "store_type": "dataStore",
                "date": "2011-01-01T00:00:00Z",
                "wms": {
                    "time_start": "2000-01-01",
                    "time_end": "2010-01-01",
                    "bbox": [-10.0, -5.0, 10.0, 5.0]
                }
            }
        ],
        "maps": []
    }"#;

    #[test]
    fn test_reindex_runs_over_snapshot() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();

        let args = ReindexArgs {
            catalog: file.path().to_path_buf(),
            update: true,
        };
        assert!(run(args).is_ok());
    }

    #[test]
    fn test_missing_snapshot_is_an_error() {
        let args = ReindexArgs {
            catalog: PathBuf::from("/no/such/snapshot.json"),
            update: false,
        };
        assert!(matches!(run(args), Err(CliError::Snapshot(_))));
    }
}
