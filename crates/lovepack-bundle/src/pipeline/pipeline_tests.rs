#![allow(non_snake_case)]

use super::*;
use crate::{BuildOptions, ENTRY_POINT_FILE, LICENSE_FILE, LoaderPaths};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Fixture {
    _temp: TempDir,
    game: PathBuf,
    output: PathBuf,
    loader: LoaderPaths,
}

fn fixture() -> Fixture {
    let temp = TempDir::new().unwrap();
    let game = temp.path().join("game");
    fs::create_dir_all(game.join("assets")).unwrap();
    fs::create_dir_all(game.join(".git")).unwrap();
    fs::write(game.join(ENTRY_POINT_FILE), b"function love.load() end").unwrap();
    fs::write(game.join("assets/sprite.png"), b"png").unwrap();
    fs::write(game.join(".git/config"), b"[core]").unwrap();

    let love_dir = temp.path().join("love");
    fs::create_dir_all(&love_dir).unwrap();
    fs::write(love_dir.join("love.exe"), b"AAAAAAAAAA").unwrap();
    fs::write(love_dir.join(LICENSE_FILE), b"zlib").unwrap();
    fs::write(love_dir.join("love.dll"), b"dll").unwrap();

    Fixture {
        game,
        output: temp.path().join("dist"),
        loader: LoaderPaths::from_binary(love_dir.join("love.exe")).unwrap(),
        _temp: temp,
    }
}

fn config(fx: &Fixture, targets: Vec<Target>, clean: bool) -> BuildConfig {
    BuildOptions {
        output_dir: Some(fx.output.clone()),
        targets,
        clean,
        ..BuildOptions::new(&fx.game)
    }
    .resolve(fx.loader.clone())
    .unwrap()
}

fn is_empty_or_missing(dir: &Path) -> bool {
    !dir.exists() || fs::read_dir(dir).unwrap().next().is_none()
}

#[test]
fn run___archive_only___writes_love_file() {
    let fx = fixture();
    let config = config(&fx, vec![], false);

    let report = run(&config).unwrap();

    assert_eq!(report.archive.path, fx.output.join("game.love"));
    assert_eq!(report.archive.entries, 2);
    assert!(report.archive.checksum.starts_with("sha256:"));
    assert!(!report.archive.removed);
    assert!(report.bundles.is_empty());
    assert!(fx.output.join("game.love").is_file());
}

#[test]
fn run___windows_target___produces_bundle() {
    let fx = fixture();
    let config = config(&fx, vec![Target::Windows], false);

    let report = run(&config).unwrap();

    assert_eq!(report.bundles.len(), 1);
    let bundle = &report.bundles[0];
    assert_eq!(bundle.target, Target::Windows);
    assert_eq!(bundle.libraries, vec!["love.dll".to_string()]);

    let archive = fs::read(fx.output.join("game.love")).unwrap();
    let exe = fs::read(&bundle.executable).unwrap();
    assert_eq!(&exe[..10], b"AAAAAAAAAA");
    assert_eq!(&exe[10..], archive.as_slice());
}

#[test]
fn run___clean___removes_archive_but_keeps_bundle() {
    let fx = fixture();
    let config = config(&fx, vec![Target::Windows], true);

    let report = run(&config).unwrap();

    assert!(report.archive.removed);
    assert!(!fx.output.join("game.love").exists());
    assert!(fx.output.join("game_win/game.exe").is_file());
    assert!(fx.output.join("game_win/license.txt").is_file());
}

#[test]
fn run___missing_entry_point___fails_before_writing() {
    let fx = fixture();
    fs::remove_file(fx.game.join(ENTRY_POINT_FILE)).unwrap();
    let config = config(&fx, vec![Target::Windows], false);

    let err = run(&config).unwrap_err();

    assert_eq!(err.stage, Stage::Validate);
    assert!(matches!(err.source, BundleError::MissingFile(_)));
    assert!(is_empty_or_missing(&fx.output));
}

#[test]
fn run___missing_license___fails_validation() {
    let fx = fixture();
    fs::remove_file(&fx.loader.license).unwrap();
    let config = config(&fx, vec![], false);

    let err = run(&config).unwrap_err();

    assert_eq!(err.stage, Stage::Validate);
    assert!(is_empty_or_missing(&fx.output));
}

#[test]
fn run___web_target___reports_unsupported_after_native_bundles() {
    let fx = fixture();
    let tool = fx.loader.dir.join("love.js");
    fs::write(&tool, b"").unwrap();
    let config = BuildOptions {
        output_dir: Some(fx.output.clone()),
        targets: vec![Target::Web, Target::Windows],
        clean: true,
        ..BuildOptions::new(&fx.game)
    }
    .resolve(fx.loader.clone().with_web_tool(tool))
    .unwrap();

    let err = run(&config).unwrap_err();

    assert_eq!(err.stage, Stage::Compose(Target::Web));
    assert!(matches!(
        err.source,
        BundleError::UnsupportedTarget(Target::Web)
    ));
    // Native bundle was built, cleanup never ran.
    assert!(fx.output.join("game_win/game.exe").is_file());
    assert!(fx.output.join("game.love").is_file());
}

#[test]
fn run___compose_failure___is_tagged_with_target() {
    let fx = fixture();
    let config = config(&fx, vec![Target::Windows], true);
    // A file where the bundle directory should go.
    fs::create_dir_all(&fx.output).unwrap();
    fs::write(fx.output.join("game_win"), b"").unwrap();

    let err = run(&config).unwrap_err();

    assert_eq!(err.stage, Stage::Compose(Target::Windows));
    assert!(!err.is_cleanup_only());
    assert!(fx.output.join("game.love").is_file());
}

#[test]
fn run___output_dir_missing___is_created() {
    let fx = fixture();
    let nested = fx.output.join("a/b");
    let config = BuildOptions {
        output_dir: Some(nested.clone()),
        ..BuildOptions::new(&fx.game)
    }
    .resolve(fx.loader.clone())
    .unwrap();

    run(&config).unwrap();

    assert!(nested.join("game.love").is_file());
}

#[test]
fn run___excluded_project_file___is_not_archived() {
    let fx = fixture();
    fs::write(fx.game.join("lovepack.toml"), b"[package]\n").unwrap();
    let config = BuildOptions {
        output_dir: Some(fx.output.clone()),
        exclude: vec![fx.game.join("lovepack.toml")],
        ..BuildOptions::new(&fx.game)
    }
    .resolve(fx.loader.clone())
    .unwrap();

    let report = run(&config).unwrap();

    assert_eq!(report.archive.entries, 2);
}

#[test]
fn remove_archive___missing_file___is_cleanup_failure() {
    let fx = fixture();
    let mut report = run(&config(&fx, vec![], false)).unwrap().archive;
    fs::remove_file(&report.path).unwrap();

    let err = remove_archive(&mut report).unwrap_err();

    assert_eq!(err.stage, Stage::Cleanup);
    assert!(err.is_cleanup_only());
    assert!(matches!(err.source, BundleError::Io(_)));
    assert!(!report.removed);
}

#[cfg(unix)]
#[test]
fn remove_archive___read_only_output_dir___keeps_archive() {
    use std::os::unix::fs::PermissionsExt;

    let fx = fixture();
    let mut report = run(&config(&fx, vec![Target::Windows], false)).unwrap().archive;
    fs::set_permissions(&fx.output, fs::Permissions::from_mode(0o555)).unwrap();

    // Privileged users can still write; nothing to simulate then.
    let writable = fs::write(fx.output.join("write-check"), b"").is_ok();
    let result = if writable {
        None
    } else {
        Some(remove_archive(&mut report))
    };
    fs::set_permissions(&fx.output, fs::Permissions::from_mode(0o755)).unwrap();
    let Some(result) = result else {
        return;
    };

    let err = result.unwrap_err();
    assert_eq!(err.stage, Stage::Cleanup);
    assert!(err.is_cleanup_only());
    assert!(err.to_string().starts_with("cleanup: "));
    assert!(fx.output.join("game.love").is_file());
    assert!(fx.output.join("game_win/game.exe").is_file());
    assert!(!report.removed);
}
