//! `.love` archive creation.
//!
//! A `.love` file is a plain ZIP whose root is the project root: `main.lua`
//! must sit at the top level of the archive, not under the project's
//! directory name. [`build_archive`] rebases every entry onto the input
//! directory and streams file contents straight into the ZIP writer.

use crate::{BundleResult, ProjectWalker};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Outcome of a successful [`build_archive`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// Location of the written archive.
    pub path: PathBuf,
    /// Number of file entries stored.
    pub entries: usize,
    /// Total uncompressed size of all entries.
    pub bytes: u64,
}

/// Package `input_dir` into a `.love` archive at `archive_path`.
///
/// The file at `archive_path` is created or truncated. If anything fails
/// while walking or writing, the partial archive is removed before the
/// error is returned, so callers either get a complete archive or none.
pub fn build_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    input_dir: P,
    archive_path: Q,
) -> BundleResult<ArchiveSummary> {
    build_archive_excluding(input_dir, archive_path, &[])
}

/// Like [`build_archive`], but files at the absolute paths in `excluded`
/// are left out, e.g. the project's own `lovepack.toml`.
pub fn build_archive_excluding<P: AsRef<Path>, Q: AsRef<Path>>(
    input_dir: P,
    archive_path: Q,
    excluded: &[PathBuf],
) -> BundleResult<ArchiveSummary> {
    let input_dir = input_dir.as_ref();
    let archive_path = archive_path.as_ref();

    let file = File::create(archive_path)?;
    debug!(path = %archive_path.display(), "created archive");

    match write_entries(input_dir, archive_path, excluded, file) {
        Ok((entries, bytes)) => {
            info!(
                path = %archive_path.display(),
                entries,
                bytes,
                "archive written"
            );
            Ok(ArchiveSummary {
                path: archive_path.to_path_buf(),
                entries,
                bytes,
            })
        }
        Err(e) => {
            if let Err(remove_err) = fs::remove_file(archive_path) {
                warn!(
                    path = %archive_path.display(),
                    error = %remove_err,
                    "failed to remove incomplete archive"
                );
            }
            Err(e)
        }
    }
}

/// Stream every project file into the ZIP. The writer is dropped on return.
fn write_entries(
    input_dir: &Path,
    archive_path: &Path,
    excluded: &[PathBuf],
    file: File,
) -> BundleResult<(usize, u64)> {
    // The archive may live inside the tree it packages (e.g. `-d .`).
    let mut walker = ProjectWalker::new(input_dir).exclude(archive_path);
    if let Ok(canonical) = fs::canonicalize(archive_path) {
        walker = walker.exclude(canonical);
    }
    for path in excluded {
        walker = walker.exclude(path.clone());
    }

    let mut zip = ZipWriter::new(file);
    let base_options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut entries = 0;
    let mut bytes = 0;

    for project_file in walker {
        let project_file = project_file?;
        let mut reader = project_file.open()?;
        let size = reader.metadata()?.len();

        debug!("\t{}", project_file.archive_name());

        let options = base_options.large_file(size >= u64::from(u32::MAX));
        zip.start_file(project_file.archive_name(), options)?;
        bytes += io::copy(&mut reader, &mut zip)?;
        entries += 1;
    }

    zip.finish()?;

    Ok((entries, bytes))
}
