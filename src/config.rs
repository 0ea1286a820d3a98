//! Configuration types for dataset-dl
//!
//! The manifest is a sectioned key/value document (TOML): one table per
//! dataset, keyed by the dataset's name. All validation happens at load
//! time so a typo fails the run before any bytes move over the network.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use url::Url;

/// Configuration for a single dataset (one section of the manifest)
#[derive(Clone, Debug, Deserialize)]
pub struct DatasetConfig {
    /// Source URL the archive is downloaded from
    pub download_path: String,

    /// Name the downloaded archive is saved as (e.g., "titanic.zip")
    pub filename: String,

    /// Whether the archive ships its own documentation (default: false)
    ///
    /// When false, a `README.md` is generated next to the extracted contents
    /// from `readme_location` and `license_info`.
    #[serde(default)]
    pub has_readme: bool,

    /// Where the upstream documentation lives; required when `has_readme` is false
    #[serde(default)]
    pub readme_location: Option<String>,

    /// License text or pointer; required when `has_readme` is false
    #[serde(default)]
    pub license_info: Option<String>,

    /// Subdirectory under the base datasets directory to extract into
    ///
    /// When absent, the archive's filename minus its extension names the
    /// destination instead.
    #[serde(default)]
    pub destination_path: Option<String>,
}

impl DatasetConfig {
    /// Compose the generated metadata file for datasets without upstream docs
    ///
    /// Returns `None` when `has_readme` is true. The output is exactly two
    /// lines, one per supplied value.
    pub fn generated_readme(&self) -> Option<String> {
        if self.has_readme {
            return None;
        }
        match (&self.readme_location, &self.license_info) {
            (Some(location), Some(license)) => Some(format!(
                "readme_location: {location}\nlicense_info: {license}"
            )),
            _ => None,
        }
    }

    /// Validate one section, naming the offending key on failure
    fn validate(&self, section: &str) -> Result<()> {
        if self.filename.trim().is_empty() {
            return Err(Error::config(
                format!("[{section}] 'filename' must not be empty"),
                Some("filename"),
            ));
        }
        Url::parse(&self.download_path).map_err(|e| {
            Error::config(
                format!(
                    "[{section}] 'download_path' is not a valid URL ('{}'): {e}",
                    self.download_path
                ),
                Some("download_path"),
            )
        })?;
        if !self.has_readme {
            if self.readme_location.is_none() {
                return Err(Error::config(
                    format!("[{section}] 'readme_location' is required when 'has_readme' is false"),
                    Some("readme_location"),
                ));
            }
            if self.license_info.is_none() {
                return Err(Error::config(
                    format!("[{section}] 'license_info' is required when 'has_readme' is false"),
                    Some("license_info"),
                ));
            }
        }
        Ok(())
    }
}

/// The full set of dataset sections, in deterministic (alphabetical) order
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    datasets: BTreeMap<String, DatasetConfig>,
}

impl Manifest {
    /// Load and validate a manifest from a file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("failed to read manifest '{}': {e}", path.display()),
            ))
        })?;
        Self::parse(&text)
    }

    /// Parse and validate a manifest from its text form
    ///
    /// Fails on the first invalid section. Missing required keys surface
    /// from deserialization; cross-field rules (readme fields, URL syntax)
    /// surface from per-section validation.
    pub fn parse(text: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(text)
            .map_err(|e| Error::config(format!("invalid manifest: {e}"), None))?;
        for (section, dataset) in &manifest.datasets {
            dataset.validate(section)?;
        }
        Ok(manifest)
    }

    /// Iterate sections as (name, config) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DatasetConfig)> {
        self.datasets.iter().map(|(name, cfg)| (name.as_str(), cfg))
    }

    /// Number of dataset sections
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    /// Whether the manifest has no sections at all
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}
