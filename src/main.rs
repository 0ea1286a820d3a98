//! Zero-argument entry point: read the dataset manifest and fetch each
//! dataset into the base datasets directory.

use anyhow::Context;
use dataset_dl::{DatasetFetcher, Manifest};
use std::path::Path;

/// Manifest location, relative to the working directory
const CONFIG_LOCATION: &str = "conf/datasets.toml";

/// Base directory all datasets are extracted under
const DATA_SETS_DIR: &str = "data-sets";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dataset_dl::logging::init_logging();

    let manifest = Manifest::load(Path::new(CONFIG_LOCATION))
        .with_context(|| format!("loading manifest from '{CONFIG_LOCATION}'"))?;
    tracing::info!("loaded {} dataset section(s)", manifest.len());

    let fetcher = DatasetFetcher::new(DATA_SETS_DIR).context("building HTTP client")?;
    fetcher
        .fetch_all(&manifest)
        .await
        .context("fetching datasets")?;

    Ok(())
}
