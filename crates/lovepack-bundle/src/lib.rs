//! Archive and platform bundle builder for LÖVE games
//!
//! This crate turns a LÖVE project directory into a `.love` archive and,
//! optionally, fuses that archive onto a LÖVE runtime binary to produce a
//! self-contained executable bundle per target platform.
//!
//! # Output Layout
//!
//! ```text
//! dist/
//! ├── mygame-1.0.0.love            # removed when `clean` is set
//! └── mygame-1.0.0_win/
//!     ├── mygame-1.0.0.exe         # love.exe bytes ++ mygame-1.0.0.love bytes
//!     ├── license.txt
//!     ├── love.dll
//!     ├── lua51.dll
//!     └── SDL2.dll
//! ```
//!
//! # Example
//!
//! ```no_run
//! use lovepack_bundle::{BuildOptions, LoaderPaths, Target, pipeline};
//!
//! let options = BuildOptions {
//!     input_dir: "mygame".into(),
//!     output_dir: Some("dist".into()),
//!     targets: vec![Target::Windows],
//!     ..BuildOptions::default()
//! };
//! let config = options.resolve(LoaderPaths::from_binary("C:/Program Files/LOVE/love.exe")?)?;
//!
//! let report = pipeline::run(&config)?;
//! println!("{} entries archived", report.archive.entries);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod target;

pub mod archive;
pub mod compose;
pub mod config;
pub mod pipeline;
pub mod report;
pub mod walk;

pub use archive::{ArchiveSummary, build_archive, build_archive_excluding};
pub use compose::{BundleSummary, build_platform_bundle};
pub use config::{BuildConfig, BuildOptions, LoaderPaths};
pub use error::{BundleError, PipelineError, Stage};
pub use report::{ArchiveReport, BuildReport, BundleReport};
pub use target::Target;
pub use walk::{ProjectFile, ProjectWalker};

/// Result type for bundle operations.
pub type BundleResult<T> = Result<T, BundleError>;

/// Archive file extension.
pub const ARCHIVE_EXTENSION: &str = "love";

/// File whose presence marks a directory as a LÖVE project root.
pub const ENTRY_POINT_FILE: &str = "main.lua";

/// License file shipped next to the LÖVE binary.
pub const LICENSE_FILE: &str = "license.txt";

/// Directories whose name starts with this character are never archived.
pub const HIDDEN_MARKER: char = '.';
