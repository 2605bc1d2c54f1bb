//! Project directory traversal.
//!
//! [`ProjectWalker`] yields every regular file (or link) of a project tree
//! that belongs in the archive. Directories whose name starts with [`HIDDEN_MARKER`] (`.git`,
//! `.vscode`, ...) are pruned as soon as they are reached, so nothing below
//! them is ever visited.

use crate::{BundleError, BundleResult, HIDDEN_MARKER};
use std::ffi::OsStr;
use std::fs::File;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Lazy walk over the archivable files of a project directory.
///
/// The walk is single-pass: once exhausted it cannot be restarted.
///
/// # Example
///
/// ```no_run
/// use lovepack_bundle::ProjectWalker;
///
/// for file in ProjectWalker::new("mygame") {
///     let file = file?;
///     println!("{}", file.archive_name());
/// }
/// # Ok::<(), lovepack_bundle::BundleError>(())
/// ```
pub struct ProjectWalker {
    root: PathBuf,
    inner: walkdir::IntoIter,
    excluded: Vec<PathBuf>,
}

/// A file found by [`ProjectWalker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFile {
    path: PathBuf,
    archive_name: String,
}

impl ProjectWalker {
    /// Walk the tree rooted at `root`. Links are reported, not followed.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let inner = WalkDir::new(&root).follow_links(false).into_iter();

        Self {
            root,
            inner,
            excluded: Vec::new(),
        }
    }

    /// Never yield the file at `path`, even if it lies inside the tree.
    #[must_use]
    pub fn exclude<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.excluded.push(path.into());
        self
    }

    /// Root directory of the walk.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Iterator for ProjectWalker {
    type Item = BundleResult<ProjectFile>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(BundleError::Walk(e))),
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                // The root is walked even when its own name is hidden.
                if entry.depth() > 0 && is_hidden(entry.file_name()) {
                    debug!(path = %entry.path().display(), "skipping hidden directory");
                    self.inner.skip_current_dir();
                }
                continue;
            }

            // Sockets, pipes and device nodes are not project content.
            if !file_type.is_file() && !file_type.is_symlink() {
                debug!(path = %entry.path().display(), "skipping special file");
                continue;
            }

            if self.excluded.iter().any(|p| p == entry.path()) {
                continue;
            }

            return Some(ProjectFile::new(&self.root, entry.into_path()));
        }
    }
}

impl ProjectFile {
    fn new(root: &Path, path: PathBuf) -> BundleResult<Self> {
        let archive_name = archive_name(root, &path)?;
        Ok(Self { path, archive_name })
    }

    /// Absolute path of the file on disk.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path inside the archive, relative to the project root with `/` separators.
    #[must_use]
    pub fn archive_name(&self) -> &str {
        &self.archive_name
    }

    /// Open the file for reading.
    pub fn open(&self) -> BundleResult<File> {
        Ok(File::open(&self.path)?)
    }
}

/// Whether a directory name marks a hidden subtree.
pub fn is_hidden(name: &OsStr) -> bool {
    let mut marker = [0u8; 4];
    let marker = HIDDEN_MARKER.encode_utf8(&mut marker).as_bytes();
    name.as_encoded_bytes().starts_with(marker)
}

/// Compute the archive entry name of `path` relative to `root`.
pub fn archive_name(root: &Path, path: &Path) -> BundleResult<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| BundleError::InvalidPath(path.to_path_buf()))?;

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                let part = part
                    .to_str()
                    .ok_or_else(|| BundleError::InvalidPath(path.to_path_buf()))?;
                parts.push(part);
            }
            _ => return Err(BundleError::InvalidPath(path.to_path_buf())),
        }
    }

    if parts.is_empty() {
        return Err(BundleError::InvalidPath(path.to_path_buf()));
    }

    Ok(parts.join("/"))
}
