//! Build pipeline.
//!
//! Stages run strictly in order and each runs at most once:
//!
//! 1. validate the configuration against the filesystem
//! 2. archive the project into `<name>.love`
//! 3. compose a bundle for each native target
//! 4. web target (not implemented, always fails)
//! 5. delete the archive when `clean` is set
//!
//! The first failing stage ends the run. Its error is returned as a
//! [`PipelineError`] tagged with the [`Stage`].

use crate::error::StageExt;
use crate::report::{ArchiveReport, BundleReport, file_sha256};
use crate::{BuildConfig, BuildReport, BundleError, PipelineError, Stage, Target};
use crate::{build_archive_excluding, build_platform_bundle};
use std::fs;
use tracing::info;

/// Run the full pipeline for `config`.
pub fn run(config: &BuildConfig) -> Result<BuildReport, PipelineError> {
    config.validate().stage(Stage::Validate)?;

    info!(
        input = %config.input_dir().display(),
        output = %config.output_dir().display(),
        name = config.output_name(),
        "packaging project"
    );

    let archive_path = config.archive_path();
    let summary = fs::create_dir_all(config.output_dir())
        .map_err(BundleError::from)
        .and_then(|()| {
            build_archive_excluding(config.input_dir(), &archive_path, config.excluded())
        })
        .stage(Stage::Archive)?;
    let checksum = file_sha256(&archive_path).stage(Stage::Archive)?;
    let mut archive = ArchiveReport::new(summary, checksum);

    let mut bundles: Vec<BundleReport> = Vec::new();
    for target in config.targets().iter().filter(|t| t.is_native()) {
        info!(platform = %target, "composing bundle");
        let bundle = build_platform_bundle(config, *target, &archive_path)
            .stage(Stage::Compose(*target))?;
        bundles.push(bundle.into());
    }

    if config.targets().contains(&Target::Web) {
        build_platform_bundle(config, Target::Web, &archive_path)
            .stage(Stage::Compose(Target::Web))?;
    }

    if config.clean() {
        remove_archive(&mut archive)?;
    }

    Ok(BuildReport { archive, bundles })
}

/// Delete the archive described by `archive` and mark it as removed.
///
/// Every artifact already exists when this runs, so a failure is tagged
/// [`Stage::Cleanup`] and [`PipelineError::is_cleanup_only`] holds.
pub fn remove_archive(archive: &mut ArchiveReport) -> Result<(), PipelineError> {
    fs::remove_file(&archive.path)
        .map_err(BundleError::from)
        .stage(Stage::Cleanup)?;
    info!(path = %archive.path.display(), "removed archive");
    archive.removed = true;
    Ok(())
}

#[cfg(test)]
#[path = "pipeline/pipeline_tests.rs"]
mod pipeline_tests;
