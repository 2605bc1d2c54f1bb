//! Build command implementation

use crate::discover;
use crate::project::ProjectFile;
use anyhow::{Context, Result};
use lovepack_bundle::{BuildOptions, BuildReport, PipelineError, Target, pipeline};
use std::fs;
use std::path::{Path, PathBuf};

/// Command-line arguments of a build.
#[derive(Debug, Clone, Default)]
pub struct BuildArgs {
    pub input: PathBuf,
    pub native: bool,
    pub targets: Vec<Target>,
    pub web: bool,
    /// `Some` when `--clean` or `--no-clean` was given.
    pub clean: Option<bool>,
    pub output_dir: Option<PathBuf>,
    pub output_name: Option<String>,
    pub version_tag: Option<String>,
    pub love: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

/// Run the build command
pub fn run(args: BuildArgs) -> Result<()> {
    let project = ProjectFile::discover(args.config.as_deref(), &args.input)?;
    let options = merge_options(&args, project.as_ref(), Target::host())?;

    let loader = discover::locate_loader(
        args.love.as_deref(),
        options.targets.contains(&Target::Web),
    )
    .context("Argument Error")?;

    let config = options.resolve(loader).context("Argument Error")?;

    println!("Packaging {} as {}", config.input_dir().display(), config.output_name());
    if !config.targets().is_empty() {
        let targets: Vec<&str> = config.targets().iter().map(Target::as_str).collect();
        println!("Targets: {}", targets.join(", "));
    }

    let report = pipeline::run(&config).map_err(|e| {
        let headline = failure_headline(&e);
        anyhow::Error::new(e).context(headline)
    })?;

    print_summary(&report);

    if let Some(path) = &args.report {
        fs::write(path, report.to_json()?)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        println!("Report written to {}", path.display());
    }

    println!("\n✓ All done! Your builds are in {}", config.output_dir().display());
    Ok(())
}

/// Merge command-line arguments over the project file.
///
/// Flags always win. Targets from the project file are used only when no
/// target flag was given at all. The project file itself is never archived.
pub fn merge_options(
    args: &BuildArgs,
    project: Option<&(ProjectFile, PathBuf)>,
    host: Option<Target>,
) -> Result<BuildOptions> {
    let mut targets = Vec::new();
    if args.native {
        let host = host.context(
            "No native target for this host platform; pass --target windows or --target linux",
        )?;
        targets.push(host);
    }
    targets.extend(args.targets.iter().copied());
    if args.web {
        targets.push(Target::Web);
    }

    let mut options = BuildOptions {
        output_dir: args.output_dir.clone(),
        output_name: args.output_name.clone(),
        version: args.version_tag.clone(),
        clean: args.clean.unwrap_or(false),
        ..BuildOptions::new(&args.input)
    };

    if let Some((project, path)) = project {
        let base_dir = path.parent().unwrap_or(Path::new(""));
        if targets.is_empty() {
            targets = project.build.targets.clone();
        }
        if args.clean.is_none() {
            options.clean = project.build.clean;
        }
        options.exclude.push(path.clone());
        if options.output_dir.is_none() {
            options.output_dir = project
                .build
                .output_dir
                .as_ref()
                .map(|dir| resolve_relative(base_dir, dir));
        }
        if options.output_name.is_none() {
            options.output_name = project.package.name.clone();
        }
        if options.version.is_none() {
            options.version = project.package.version.clone();
        }
    }

    options.targets = targets;
    Ok(options)
}

/// Headline printed above a pipeline error.
fn failure_headline(err: &PipelineError) -> &'static str {
    if err.is_cleanup_only() {
        "Build succeeded but cleanup failed"
    } else {
        "Build failed"
    }
}

fn resolve_relative(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

fn print_summary(report: &BuildReport) {
    let archive = &report.archive;
    println!(
        "  Archive: {} ({} files, {})",
        archive.path.display(),
        archive.entries,
        archive.checksum
    );
    if archive.removed {
        println!("  Archive removed (--clean)");
    }

    for bundle in &report.bundles {
        println!("  {}: {}", bundle.target, bundle.executable.display());
        for library in &bundle.libraries {
            println!("    + {library}");
        }
    }
}
