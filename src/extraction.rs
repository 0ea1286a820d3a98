//! Zip archive extraction

use crate::error::{ExtractError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Extractor for the downloaded dataset archives
pub struct ZipExtractor;

impl ZipExtractor {
    /// Extract a single zip entry to disk, creating directories as needed
    fn extract_entry(
        mut file: zip::read::ZipFile,
        dest_path: &Path,
        archive_path: &Path,
    ) -> Result<Option<PathBuf>> {
        // enclosed_name() rejects entries that would escape dest_path
        let file_path = match file.enclosed_name() {
            Some(path) => dest_path.join(path),
            None => {
                warn!(name = file.name(), "skipping entry with unsafe path");
                return Ok(None);
            }
        };

        if file.is_dir() {
            std::fs::create_dir_all(&file_path)?;
            return Ok(None);
        }

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut outfile = std::fs::File::create(&file_path)?;
        std::io::copy(&mut file, &mut outfile).map_err(|e| {
            ExtractError::ExtractionFailed {
                archive: archive_path.to_path_buf(),
                reason: format!("failed to extract '{}': {e}", file.name()),
            }
        })?;

        Ok(Some(file_path))
    }

    /// Extract every entry of `archive_path` into `dest_path`
    ///
    /// Returns the paths of the extracted files (directories excluded).
    pub fn extract(archive_path: &Path, dest_path: &Path) -> Result<Vec<PathBuf>> {
        debug!(?archive_path, ?dest_path, "extracting zip archive");

        std::fs::create_dir_all(dest_path)?;

        let file = std::fs::File::open(archive_path)?;
        let mut archive =
            zip::ZipArchive::new(file).map_err(|e| ExtractError::InvalidArchive {
                archive: archive_path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let mut extracted_files = Vec::new();
        for i in 0..archive.len() {
            let entry = archive
                .by_index(i)
                .map_err(|e| ExtractError::ExtractionFailed {
                    archive: archive_path.to_path_buf(),
                    reason: format!("failed to read zip entry: {e}"),
                })?;

            if let Some(file_path) = Self::extract_entry(entry, dest_path, archive_path)? {
                extracted_files.push(file_path);
            }
        }

        info!(
            ?archive_path,
            extracted_count = extracted_files.len(),
            "zip extraction successful"
        );

        Ok(extracted_files)
    }
}
