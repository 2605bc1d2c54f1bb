//! Platform bundle composition.
//!
//! LÖVE runs in "fused" mode when a `.love` archive is appended to its own
//! executable: the runtime finds the ZIP central directory at the end of the
//! file. Composing a bundle is therefore plain byte concatenation followed by
//! copying the runtime's license and shared libraries next to the result.

use crate::{BuildConfig, BundleError, BundleResult, Target};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Outcome of a successful [`build_platform_bundle`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleSummary {
    /// Target the bundle was built for.
    pub target: Target,
    /// Bundle directory.
    pub directory: PathBuf,
    /// Fused executable.
    pub executable: PathBuf,
    /// Size of the fused executable in bytes.
    pub executable_size: u64,
    /// File names of the copied runtime libraries, sorted.
    pub libraries: Vec<String>,
}

/// Build the bundle for `target` from the archive at `archive_path`.
///
/// The archive is only read. Output written before a failure is left in
/// place; a warning names the affected directory.
pub fn build_platform_bundle(
    config: &BuildConfig,
    target: Target,
    archive_path: &Path,
) -> BundleResult<BundleSummary> {
    let Some(library_extension) = target.library_extension() else {
        return Err(BundleError::UnsupportedTarget(target));
    };

    let directory = config.bundle_dir(target);
    let result = compose_into(config, target, archive_path, &directory, library_extension);

    if result.is_err() && directory.exists() {
        warn!(
            path = %directory.display(),
            "bundle left incomplete, remove it before shipping"
        );
    }

    result
}

fn compose_into(
    config: &BuildConfig,
    target: Target,
    archive_path: &Path,
    directory: &Path,
    library_extension: &str,
) -> BundleResult<BundleSummary> {
    let loader = config.loader();

    fs::create_dir_all(directory)?;
    debug!(path = %directory.display(), "bundle directory ready");

    let executable = directory.join(target.executable_name(config.output_name()));
    let executable_size = fuse_executable(&loader.binary, archive_path, &executable)?;
    debug!("Finished generating {}", executable.display());

    let license_name = loader
        .license
        .file_name()
        .ok_or_else(|| BundleError::InvalidPath(loader.license.clone()))?;
    fs::copy(&loader.license, directory.join(license_name))?;
    debug!("Copied LÖVE license");

    let libraries = copy_libraries(&loader.dir, directory, library_extension)?;

    info!(
        platform = %target,
        path = %directory.display(),
        libraries = libraries.len(),
        "bundle written"
    );

    Ok(BundleSummary {
        target,
        directory: directory.to_path_buf(),
        executable,
        executable_size,
        libraries,
    })
}

/// Write `loader` bytes followed by `archive` bytes to `destination`.
///
/// Returns the number of bytes written.
pub fn fuse_executable(loader: &Path, archive: &Path, destination: &Path) -> BundleResult<u64> {
    let mut loader_file = File::open(loader)?;
    let mut archive_file = File::open(archive)?;
    let mut output = File::create(destination)?;
    debug!(path = %destination.display(), "created executable");

    let mut written = io::copy(&mut loader_file, &mut output)?;
    written += io::copy(&mut archive_file, &mut output)?;
    output.sync_all()?;

    // Set executable permissions on Unix
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = output.metadata()?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(destination, perms)?;
    }

    Ok(written)
}

/// Copy top-level files of `source_dir` with the given extension into
/// `destination_dir`. Subdirectories are never searched.
pub fn copy_libraries(
    source_dir: &Path,
    destination_dir: &Path,
    extension: &str,
) -> BundleResult<Vec<String>> {
    let mut libraries = Vec::new();

    for entry in fs::read_dir(source_dir)? {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() || !has_extension(&path, extension) {
            continue;
        }

        let file_name = entry
            .file_name()
            .into_string()
            .map_err(|_| BundleError::InvalidPath(path.clone()))?;

        debug!("\t{file_name}");
        fs::copy(&path, destination_dir.join(&file_name))?;
        libraries.push(file_name);
    }

    libraries.sort();
    Ok(libraries)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}
