//! LÖVE runtime discovery

use anyhow::{Context, Result};
use lovepack_bundle::LoaderPaths;
use std::path::Path;

/// Locate the LÖVE runtime, and love.js when a web build is requested.
///
/// An explicit `love` path wins over `$PATH` lookup.
pub fn locate_loader(love: Option<&Path>, need_web: bool) -> Result<LoaderPaths> {
    let binary = match love {
        Some(path) => path.to_path_buf(),
        None => which::which("love").context("Couldn't find `love`! Is it missing from $PATH?")?,
    };

    let mut loader = LoaderPaths::from_binary(&binary)
        .with_context(|| format!("Invalid love path: {}", binary.display()))?;

    if need_web {
        let tool = which::which("love.js").context(
            "Couldn't find `love.js`, which is required for web builds. Is it missing from $PATH?",
        )?;
        loader = loader.with_web_tool(std::path::absolute(tool)?);
    }

    tracing::debug!(
        love = %loader.binary.display(),
        license = %loader.license.display(),
        "located runtime"
    );

    Ok(loader)
}
