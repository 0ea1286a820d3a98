//! The Dataset Fetcher
//!
//! One entry at a time, strictly ordered: existence check → directory
//! creation → optional README.md generation → streamed download → zip
//! extraction → archive deletion. An error anywhere aborts the whole run;
//! the only recovery behavior is the pre-existing-directory skip.

use crate::config::{DatasetConfig, Manifest};
use crate::error::{Error, Result};
use crate::extraction::ZipExtractor;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Write-buffer size for streamed downloads: 5 MiB
///
/// The response body is buffered in units of this size so large archives
/// never sit fully in memory.
pub const CHUNK_SIZE: usize = 5 * 1024 * 1024;

/// Connect timeout for the HTTP client
///
/// Total-request timeouts are deliberately absent: archive downloads are
/// long-running streams.
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Name of the generated metadata file
const README_FILENAME: &str = "README.md";

/// Outcome of fetching one dataset entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The archive was downloaded, extracted, and removed
    Fetched,
    /// The destination already existed; no network request was made
    Skipped,
}

/// Resolved filesystem locations for one dataset entry
#[derive(Debug, PartialEq, Eq)]
struct ResolvedPaths {
    /// Directory the archive is saved in, the README written to, and the
    /// contents extracted into
    final_dir: PathBuf,
    /// Directory whose existence marks the entry as already satisfied
    ///
    /// Same as `final_dir` when `destination_path` is set; otherwise the
    /// archive path with its extension stripped (the directory the archive
    /// itself is expected to unpack into).
    marker_dir: PathBuf,
    /// Where the downloaded archive is written before extraction
    archive_path: PathBuf,
}

/// Downloads and extracts every dataset named in a [`Manifest`]
///
/// Holds the base datasets directory and a single HTTP client, built once
/// per run. TLS certificate verification is disabled to match the mirror
/// hosts these archives live on.
pub struct DatasetFetcher {
    base_dir: PathBuf,
    client: reqwest::Client,
}

impl DatasetFetcher {
    /// Create a fetcher rooted at `base_dir`
    ///
    /// The directory itself is created lazily by [`fetch_all`](Self::fetch_all).
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            base_dir: base_dir.into(),
            client,
        })
    }

    /// Process every manifest section in order, stopping at the first error
    pub async fn fetch_all(&self, manifest: &Manifest) -> Result<()> {
        create_dir_if_missing(&self.base_dir)?;

        for (name, dataset) in manifest.iter() {
            info!("processing '{name}'");
            self.fetch(name, dataset).await?;
        }

        Ok(())
    }

    /// Fetch a single dataset entry
    ///
    /// The skip check tests only for directory existence, not completeness:
    /// a directory left behind by an interrupted run is treated as fully
    /// downloaded.
    pub async fn fetch(&self, name: &str, dataset: &DatasetConfig) -> Result<FetchOutcome> {
        let paths = self.resolve_paths(dataset);

        if paths.marker_dir.exists() {
            info!(
                marker = %paths.marker_dir.display(),
                "directory already exists, skipping '{}'",
                dataset.filename
            );
            return Ok(FetchOutcome::Skipped);
        }

        create_dir_if_missing(&paths.final_dir)?;

        if let Some(readme) = dataset.generated_readme() {
            info!("creating {README_FILENAME} for '{name}'");
            tokio::fs::write(paths.final_dir.join(README_FILENAME), readme.as_bytes()).await?;
        }

        self.download(&dataset.download_path, &dataset.filename, &paths.archive_path)
            .await?;

        info!(
            "extracting '{}' to '{}'",
            dataset.filename,
            paths.final_dir.display()
        );
        ZipExtractor::extract(&paths.archive_path, &paths.final_dir)?;

        info!("removing archive '{}'", dataset.filename);
        tokio::fs::remove_file(&paths.archive_path).await?;

        Ok(FetchOutcome::Fetched)
    }

    /// Resolve where the archive, README, and extracted contents go
    fn resolve_paths(&self, dataset: &DatasetConfig) -> ResolvedPaths {
        match &dataset.destination_path {
            Some(subdir) => {
                let final_dir = self.base_dir.join(subdir);
                ResolvedPaths {
                    archive_path: final_dir.join(&dataset.filename),
                    marker_dir: final_dir.clone(),
                    final_dir,
                }
            }
            None => {
                let archive_path = self.base_dir.join(&dataset.filename);
                ResolvedPaths {
                    marker_dir: archive_path.with_extension(""),
                    final_dir: self.base_dir.clone(),
                    archive_path,
                }
            }
        }
    }

    /// Stream `url` to `archive_path`, flushing in [`CHUNK_SIZE`] units
    async fn download(&self, url: &str, filename: &str, archive_path: &Path) -> Result<()> {
        let mut response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: response.status(),
            });
        }

        info!(
            "downloading '{}' to '{}', this may take a few minutes",
            filename,
            archive_path.display()
        );

        let mut file = tokio::fs::File::create(archive_path).await?;
        let mut buffer: Vec<u8> = Vec::with_capacity(CHUNK_SIZE);
        let mut downloaded: u64 = 0;

        while let Some(chunk) = response.chunk().await? {
            // filter out keep-alive chunks
            if chunk.is_empty() {
                continue;
            }
            buffer.extend_from_slice(&chunk);
            if buffer.len() >= CHUNK_SIZE {
                downloaded += buffer.len() as u64;
                file.write_all(&buffer).await?;
                buffer.clear();
                info!("{} MiB downloaded...", downloaded / 1024 / 1024);
            }
        }
        if !buffer.is_empty() {
            downloaded += buffer.len() as u64;
            file.write_all(&buffer).await?;
            info!("{} MiB downloaded...", downloaded / 1024 / 1024);
        }
        file.flush().await?;

        info!("finished downloading '{filename}'");
        Ok(())
    }
}

/// Create a directory (and its parents) if it does not exist yet
fn create_dir_if_missing(dir: &Path) -> Result<()> {
    if !dir.exists() {
        debug!(dir = %dir.display(), "creating directory");
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(filename: &str, destination_path: Option<&str>) -> DatasetConfig {
        DatasetConfig {
            download_path: "https://example.com/archive.zip".to_string(),
            filename: filename.to_string(),
            has_readme: true,
            readme_location: None,
            license_info: None,
            destination_path: destination_path.map(str::to_string),
        }
    }

    fn fetcher() -> DatasetFetcher {
        DatasetFetcher::new("/tmp/data-sets").unwrap()
    }

    #[test]
    fn resolve_paths_with_destination() {
        let paths = fetcher().resolve_paths(&dataset("taxi.zip", Some("bar")));
        assert_eq!(paths.final_dir, Path::new("/tmp/data-sets/bar"));
        assert_eq!(paths.marker_dir, Path::new("/tmp/data-sets/bar"));
        assert_eq!(paths.archive_path, Path::new("/tmp/data-sets/bar/taxi.zip"));
    }

    #[test]
    fn resolve_paths_without_destination_uses_archive_stem() {
        let paths = fetcher().resolve_paths(&dataset("foo.zip", None));
        assert_eq!(
            paths.marker_dir,
            Path::new("/tmp/data-sets/foo"),
            "marker is the archive filename minus its extension"
        );
        assert_eq!(paths.final_dir, Path::new("/tmp/data-sets"));
        assert_eq!(paths.archive_path, Path::new("/tmp/data-sets/foo.zip"));
    }

    #[test]
    fn resolve_paths_strips_only_last_extension() {
        let paths = fetcher().resolve_paths(&dataset("dump.tar.gz", None));
        assert_eq!(paths.marker_dir, Path::new("/tmp/data-sets/dump.tar"));
    }
}
