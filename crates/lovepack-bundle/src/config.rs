//! Build configuration.
//!
//! [`BuildOptions`] holds what the user asked for, with every field optional
//! except the input directory. [`BuildOptions::resolve`] fills in defaults
//! and produces an immutable [`BuildConfig`], which every pipeline stage
//! receives by reference.

use crate::{ARCHIVE_EXTENSION, BundleError, BundleResult, ENTRY_POINT_FILE, LICENSE_FILE, Target};
use std::fs;
use std::path::{Path, PathBuf};

/// Unresolved build request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Project directory containing `main.lua`.
    pub input_dir: PathBuf,
    /// Where to write artifacts (default: current directory).
    pub output_dir: Option<PathBuf>,
    /// Base name of artifacts (default: input directory name).
    pub output_name: Option<String>,
    /// Release tag appended to the base name as `-<version>`.
    pub version: Option<String>,
    /// Targets to build, in order. Duplicates are ignored.
    pub targets: Vec<Target>,
    /// Delete the `.love` archive once all bundles are built.
    pub clean: bool,
    /// Files inside the project that are left out of the archive.
    pub exclude: Vec<PathBuf>,
}

/// Location of the LÖVE runtime used to fuse executables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderPaths {
    /// Absolute path of the `love` binary.
    pub binary: PathBuf,
    /// Directory containing the binary and its shared libraries.
    pub dir: PathBuf,
    /// License file shipped with the runtime.
    pub license: PathBuf,
    /// love.js tooling, needed only for web builds.
    pub web_tool: Option<PathBuf>,
}

impl LoaderPaths {
    /// Derive loader paths from the location of the `love` binary.
    pub fn from_binary<P: AsRef<Path>>(binary: P) -> BundleResult<Self> {
        let binary = std::path::absolute(binary.as_ref())?;
        let dir = binary
            .parent()
            .ok_or_else(|| BundleError::InvalidPath(binary.clone()))?
            .to_path_buf();
        let license = dir.join(LICENSE_FILE);

        Ok(Self {
            binary,
            dir,
            license,
            web_tool: None,
        })
    }

    /// Attach the love.js tooling path.
    #[must_use]
    pub fn with_web_tool<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.web_tool = Some(path.into());
        self
    }
}

/// Validated, immutable configuration for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    input_dir: PathBuf,
    output_dir: PathBuf,
    output_name: String,
    targets: Vec<Target>,
    clean: bool,
    excluded: Vec<PathBuf>,
    loader: LoaderPaths,
}

impl BuildOptions {
    /// Create options for the given project directory.
    pub fn new<P: Into<PathBuf>>(input_dir: P) -> Self {
        Self {
            input_dir: input_dir.into(),
            ..Self::default()
        }
    }

    /// Apply defaults and produce a [`BuildConfig`].
    ///
    /// This resolves paths but does not touch the output directory; the
    /// filesystem preconditions are checked by [`BuildConfig::validate`].
    pub fn resolve(self, loader: LoaderPaths) -> BundleResult<BuildConfig> {
        if self.input_dir.as_os_str().is_empty() {
            return Err(BundleError::InvalidConfig(
                "missing input directory".to_string(),
            ));
        }

        let input_dir = fs::canonicalize(&self.input_dir)
            .map_err(|_| BundleError::MissingFile(self.input_dir.clone()))?;
        if !input_dir.is_dir() {
            return Err(BundleError::InvalidConfig(format!(
                "{} is not a directory",
                input_dir.display()
            )));
        }

        let mut output_name = match self.output_name.filter(|n| !n.is_empty()) {
            Some(name) => name,
            None => input_dir
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
                .ok_or_else(|| {
                    BundleError::InvalidConfig(format!(
                        "cannot derive an output name from {}",
                        input_dir.display()
                    ))
                })?,
        };
        if let Some(version) = self.version.as_deref().map(str::trim)
            && !version.is_empty()
        {
            output_name = format!("{output_name}-{version}");
        }
        // The version suffix must not introduce separators either.
        if output_name.contains(['/', '\\']) {
            return Err(BundleError::InvalidConfig(format!(
                "output name must not contain path separators: {output_name}"
            )));
        }

        let mut excluded = Vec::with_capacity(self.exclude.len());
        for path in self.exclude {
            excluded.push(fs::canonicalize(&path).or_else(|_| std::path::absolute(&path))?);
        }

        let output_dir = match self.output_dir {
            Some(dir) => std::path::absolute(dir)?,
            None => std::env::current_dir()?,
        };

        let mut targets = Vec::with_capacity(self.targets.len());
        for target in self.targets {
            if !targets.contains(&target) {
                targets.push(target);
            }
        }

        Ok(BuildConfig {
            input_dir,
            output_dir,
            output_name,
            targets,
            clean: self.clean,
            excluded,
            loader,
        })
    }
}

impl BuildConfig {
    /// Canonical project directory.
    #[must_use]
    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    /// Absolute output directory. Created by the pipeline if missing.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Base name shared by the archive, bundle directories and executables.
    #[must_use]
    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    /// Requested targets, de-duplicated, in request order.
    #[must_use]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Whether the archive is deleted after the build.
    #[must_use]
    pub fn clean(&self) -> bool {
        self.clean
    }

    /// Absolute paths never packed into the archive.
    #[must_use]
    pub fn excluded(&self) -> &[PathBuf] {
        &self.excluded
    }

    /// LÖVE runtime locations.
    #[must_use]
    pub fn loader(&self) -> &LoaderPaths {
        &self.loader
    }

    /// `<output_dir>/<output_name>.love`
    #[must_use]
    pub fn archive_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.{ARCHIVE_EXTENSION}", self.output_name))
    }

    /// `<output_dir>/<output_name>_<suffix>/`
    #[must_use]
    pub fn bundle_dir(&self, target: Target) -> PathBuf {
        self.output_dir.join(target.bundle_dir_name(&self.output_name))
    }

    /// Check every filesystem precondition of a run.
    ///
    /// Nothing is written; a failure here means no artifact was produced.
    pub fn validate(&self) -> BundleResult<()> {
        if !self.input_dir.is_dir() {
            return Err(BundleError::InvalidConfig(format!(
                "{} is not a directory",
                self.input_dir.display()
            )));
        }

        let entry_point = self.input_dir.join(ENTRY_POINT_FILE);
        if !entry_point.is_file() {
            return Err(BundleError::MissingFile(entry_point));
        }

        if !self.loader.binary.is_file() {
            return Err(BundleError::MissingFile(self.loader.binary.clone()));
        }

        if !self.loader.license.is_file() {
            return Err(BundleError::MissingFile(self.loader.license.clone()));
        }

        if self.targets.contains(&Target::Web) {
            match &self.loader.web_tool {
                Some(tool) if tool.exists() => {}
                Some(tool) => return Err(BundleError::MissingFile(tool.clone())),
                None => {
                    return Err(BundleError::InvalidConfig(
                        "love.js is required for web builds".to_string(),
                    ));
                }
            }
        }

        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(BundleError::InvalidConfig(format!(
                "{} is not a directory",
                self.output_dir.display()
            )));
        }

        Ok(())
    }
}
