//! Workspace metadata as reported by `cargo metadata`.

use crate::error::MetadataError;
use serde::Deserialize;
use std::path::PathBuf;

/// The subset of `cargo metadata --format-version=1` this tool reads
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub target_directory: Option<PathBuf>,
}

impl Metadata {
    /// Parse the metadata JSON document
    pub fn parse(json: &str) -> Result<Self, MetadataError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Shared build output directory, failing if cargo did not report one
    pub fn target_directory(&self) -> Result<&PathBuf, MetadataError> {
        match &self.target_directory {
            None => Err(MetadataError::MissingTargetDirectory),
            Some(dir) if dir.as_os_str().is_empty() => {
                Err(MetadataError::InvalidTargetDirectory(dir.clone()))
            }
            Some(dir) => Ok(dir),
        }
    }

    /// Directory under the target directory that receives coverage output
    pub fn coverage_dir(&self, subdir: &str) -> Result<PathBuf, MetadataError> {
        Ok(self.target_directory()?.join(subdir))
    }
}
