//! lovepack.toml parsing and validation

use anyhow::{Context, Result};
use lovepack_bundle::Target;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default project file name, looked up in the input directory.
pub const PROJECT_FILE: &str = "lovepack.toml";

/// lovepack.toml structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectFile {
    #[serde(default)]
    pub package: PackageSection,

    #[serde(default)]
    pub build: BuildSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageSection {
    /// Output base name
    #[serde(default)]
    pub name: Option<String>,

    /// Release version appended to the output name
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSection {
    #[serde(default)]
    pub targets: Vec<Target>,

    /// Relative to the directory holding the project file
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    #[serde(default)]
    pub clean: bool,
}

impl ProjectFile {
    /// Load a project file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read project file: {:?}", path.as_ref()))?;

        Self::from_str(&content)
            .with_context(|| format!("Invalid project file: {:?}", path.as_ref()))
    }

    /// Parse a project file from string
    pub fn from_str(content: &str) -> Result<Self> {
        let project: Self = toml::from_str(content).context("Failed to parse project file")?;
        project.validate()?;
        Ok(project)
    }

    /// Validate the project file
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.package.name {
            if name.is_empty() {
                anyhow::bail!("package.name cannot be empty");
            }
            if name.contains(['/', '\\']) {
                anyhow::bail!("package.name must not contain path separators: {name}");
            }
        }

        if let Some(dir) = &self.build.output_dir
            && dir.as_os_str().is_empty()
        {
            anyhow::bail!("build.output_dir cannot be empty");
        }

        Ok(())
    }

    /// Find the project file for a run.
    ///
    /// An explicit path must exist; otherwise `<input_dir>/lovepack.toml` is
    /// used when present. Returns the parsed file and its absolute path.
    pub fn discover(
        explicit: Option<&Path>,
        input_dir: &Path,
    ) -> Result<Option<(Self, PathBuf)>> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = input_dir.join(PROJECT_FILE);
                if !candidate.is_file() {
                    return Ok(None);
                }
                candidate
            }
        };

        let project = Self::from_file(&path)?;
        let path = std::path::absolute(&path)?;

        tracing::debug!(path = %path.display(), "loaded project file");
        Ok(Some((project, path)))
    }
}
