//! # dataset-dl
//!
//! Configuration-driven dataset fetcher. Reads a manifest of dataset
//! sections, then for each one: checks whether the destination directory
//! already exists (skip if so), creates it, optionally writes a generated
//! `README.md`, streams the archive down over HTTP in 5 MiB units, extracts
//! the zip into the destination, and deletes the archive.
//!
//! Entries are processed strictly sequentially; the first error aborts the
//! run. There are no retries, no checksums, and no partial-state detection —
//! an existing destination directory is taken at face value.
//!
//! ## Quick Start
//!
//! ```no_run
//! use dataset_dl::{DatasetFetcher, Manifest};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manifest = Manifest::load(Path::new("conf/datasets.toml"))?;
//!     let fetcher = DatasetFetcher::new("data-sets")?;
//!     fetcher.fetch_all(&manifest).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Manifest format
//!
//! One table per dataset:
//!
//! ```toml
//! [titanic]
//! download_path = "https://example.com/data/titanic.zip"
//! filename = "titanic.zip"
//! readme_location = "https://example.com/data/titanic-readme"
//! license_info = "CC0: public domain"
//!
//! [nyc-taxi]
//! download_path = "https://example.com/data/taxi.zip"
//! filename = "taxi.zip"
//! has_readme = true
//! destination_path = "taxi"
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Manifest and dataset configuration types
pub mod config;
/// Error types
pub mod error;
/// Zip archive extraction
pub mod extraction;
/// The per-dataset fetch pipeline
pub mod fetcher;
/// Tracing subscriber initialization
pub mod logging;

pub use config::{DatasetConfig, Manifest};
pub use error::{Error, ExtractError, Result};
pub use extraction::ZipExtractor;
pub use fetcher::{DatasetFetcher, FetchOutcome, CHUNK_SIZE};
