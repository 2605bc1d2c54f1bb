//! lovepack CLI - Package LÖVE games for distribution
//!
//! ```text
//! lovepack mygame                      # mygame.love in the current directory
//! lovepack -w --clean -d dist mygame   # dist/mygame_win/mygame.exe (on Windows)
//! lovepack -t windows --love ~/love-win64/love.exe mygame
//! ```

use clap::Parser;
use lovepack_bundle::Target;
use std::path::PathBuf;

mod build;
mod discover;
mod logging;
mod project;

#[derive(Parser)]
#[command(name = "lovepack")]
#[command(author, version, about = "Package LÖVE games for distribution", long_about = None)]
struct Cli {
    /// Project directory containing main.lua
    input: PathBuf,

    /// Create a fused build for the host platform
    #[arg(short = 'w', long)]
    native: bool,

    /// Create a fused build for a specific target (windows, linux, web)
    #[arg(short = 't', long = "target", value_parser = parse_target)]
    targets: Vec<Target>,

    /// Create an HTML5 build using love.js (not supported yet)
    #[arg(short = 'b', long)]
    web: bool,

    /// Delete the .love file when finished
    #[arg(long, overrides_with = "no_clean")]
    clean: bool,

    /// Keep the .love file even if the project file sets clean
    #[arg(long, overrides_with = "clean")]
    no_clean: bool,

    /// Output directory (default: current directory, created if missing)
    #[arg(short = 'd', long)]
    output_dir: Option<PathBuf>,

    /// Output name (default: name of the input directory)
    #[arg(short = 'o', long)]
    output_name: Option<String>,

    /// Version name for this release, appended to the output name
    #[arg(long = "version-tag")]
    version_tag: Option<String>,

    /// Path to the love executable (default: found on $PATH)
    #[arg(long)]
    love: Option<PathBuf>,

    /// Project file (default: <INPUT>/lovepack.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a JSON build report to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_target(s: &str) -> Result<Target, String> {
    Target::parse(s).ok_or_else(|| format!("unknown target: {s} (expected windows, linux or web)"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    build::run(build::BuildArgs {
        input: cli.input,
        native: cli.native,
        targets: cli.targets,
        web: cli.web,
        clean: match (cli.clean, cli.no_clean) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        },
        output_dir: cli.output_dir,
        output_name: cli.output_name,
        version_tag: cli.version_tag,
        love: cli.love,
        config: cli.config,
        report: cli.report,
    })
}
