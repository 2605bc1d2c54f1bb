//! Build target identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Targets a project can be packaged for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Target {
    /// Fused `.exe` with LÖVE's DLLs.
    Windows,
    /// Fused ELF binary with LÖVE's shared objects.
    Linux,
    /// Browser build through love.js. Not implemented yet.
    Web,
}

impl Target {
    /// Native target matching the host running the packager.
    #[must_use]
    pub fn host() -> Option<Self> {
        match std::env::consts::OS {
            "windows" => Some(Self::Windows),
            "linux" => Some(Self::Linux),
            _ => None,
        }
    }

    /// Get the target key string (e.g., "windows").
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::Web => "web",
        }
    }

    /// Parse a target from its string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "windows" => Some(Self::Windows),
            "linux" => Some(Self::Linux),
            "web" => Some(Self::Web),
            _ => None,
        }
    }

    /// Whether this target fuses the archive onto a native LÖVE binary.
    #[must_use]
    pub fn is_native(&self) -> bool {
        !matches!(self, Self::Web)
    }

    /// Suffix of the bundle directory (`<name>_<suffix>`).
    #[must_use]
    pub fn bundle_suffix(&self) -> &'static str {
        match self {
            Self::Windows => "win",
            Self::Linux => "linux",
            Self::Web => "web",
        }
    }

    /// Extension of the fused executable, if the platform uses one.
    #[must_use]
    pub fn executable_extension(&self) -> Option<&'static str> {
        match self {
            Self::Windows => Some("exe"),
            Self::Linux | Self::Web => None,
        }
    }

    /// Extension of the runtime libraries shipped next to the executable.
    #[must_use]
    pub fn library_extension(&self) -> Option<&'static str> {
        match self {
            Self::Windows => Some("dll"),
            Self::Linux => Some("so"),
            Self::Web => None,
        }
    }

    /// Format the executable file name for this target.
    ///
    /// # Example
    ///
    /// ```
    /// use lovepack_bundle::Target;
    ///
    /// assert_eq!(Target::Windows.executable_name("pong"), "pong.exe");
    /// assert_eq!(Target::Linux.executable_name("pong"), "pong");
    /// ```
    #[must_use]
    pub fn executable_name(&self, base_name: &str) -> String {
        match self.executable_extension() {
            Some(ext) => format!("{base_name}.{ext}"),
            None => base_name.to_string(),
        }
    }

    /// Format the bundle directory name for this target.
    #[must_use]
    pub fn bundle_dir_name(&self, base_name: &str) -> String {
        format!("{base_name}_{}", self.bundle_suffix())
    }

    /// Get all targets.
    #[must_use]
    pub fn all() -> &'static [Target] {
        &[Self::Windows, Self::Linux, Self::Web]
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
