//! Build reports.

use crate::{ArchiveSummary, BundleResult, BundleSummary, Target};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Summary of a completed pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub archive: ArchiveReport,
    pub bundles: Vec<BundleReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveReport {
    pub path: PathBuf,
    pub entries: usize,
    pub bytes: u64,
    /// `sha256:<hex>` of the archive file.
    pub checksum: String,
    /// Whether the archive was deleted after the build.
    pub removed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleReport {
    pub target: Target,
    pub directory: PathBuf,
    pub executable: PathBuf,
    pub executable_size: u64,
    pub libraries: Vec<String>,
}

impl ArchiveReport {
    pub(crate) fn new(summary: ArchiveSummary, checksum: String) -> Self {
        Self {
            path: summary.path,
            entries: summary.entries,
            bytes: summary.bytes,
            checksum,
            removed: false,
        }
    }
}

impl From<BundleSummary> for BundleReport {
    fn from(summary: BundleSummary) -> Self {
        Self {
            target: summary.target,
            directory: summary.directory,
            executable: summary.executable,
            executable_size: summary.executable_size,
            libraries: summary.libraries,
        }
    }
}

impl BuildReport {
    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> BundleResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Compute the SHA256 of a file and return it as `sha256:<hex>`.
pub fn file_sha256(path: &Path) -> BundleResult<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(format!("sha256:{}", hex::encode(hasher.finalize())))
}
