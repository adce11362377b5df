//! Integration tests for the emvc CLI.
//!
//! Each test runs the binary inside its own temporary directory and reads
//! the report the way external tooling does: line by line, picking up
//! `create ... : <path>` entries.

#![allow(deprecated)] // cargo_bin is deprecated but works fine for standard builds

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use regex::Regex;
use tempfile::TempDir;
use walkdir::WalkDir;

const DEFAULT_FILE_COUNT: usize = 25;
const EJS_FILE_COUNT: usize = 24;
const GIT_FILE_COUNT: usize = 26;

/// Creates `<tmp>/app-<n>` and returns both the guard and the app dir.
fn app_dir(suffix: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let dir = temp_dir.path().join(format!("app-{}", suffix));
    fs::create_dir(&dir).expect("Failed to create app dir");
    (temp_dir, dir)
}

fn emvc(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("emvc").unwrap();
    cmd.current_dir(dir);
    cmd
}

/// Extracts created file paths from the report, ignoring color codes.
fn parse_created_files(stdout: &str) -> Vec<String> {
    let ansi = Regex::new(r"\x1b\[[0-9;]*m").unwrap();
    let created = Regex::new(r"create.*?: (.*)$").unwrap();

    stdout
        .lines()
        .map(|line| ansi.replace_all(line, ""))
        .filter_map(|line| created.captures(&line).map(|caps| caps[1].replace('\\', "/")))
        .collect()
}

fn run_ok(dir: &Path, args: &[&str]) -> String {
    let output = emvc(dir).args(args).assert().success().get_output().clone();
    assert!(
        output.stderr.is_empty(),
        "unexpected stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

/// Relative paths of every file under `dir`.
fn files_on_disk(dir: &Path) -> BTreeSet<String> {
    WalkDir::new(dir)
        .into_iter()
        .map(|entry| entry.unwrap())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            entry
                .path()
                .strip_prefix(dir)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().to_string())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect()
}

fn is_empty_dir(dir: &Path) -> bool {
    fs::read_dir(dir).unwrap().next().is_none()
}

// ============================================================================
// Help, version and usage errors
// ============================================================================

#[test]
fn test_help_short_and_long_are_equivalent() {
    let (_guard, dir) = app_dir("help");

    let short = run_ok(&dir, &["-h"]);
    let long = run_ok(&dir, &["--help"]);

    for stdout in [&short, &long] {
        assert!(stdout.contains("Usage: emvc"));
        assert!(stdout.contains("--help"));
        assert!(stdout.contains("--version"));
        assert!(parse_created_files(stdout).is_empty());
    }
    assert!(is_empty_dir(&dir));
}

#[test]
fn test_help_shows_all_options() {
    let (_guard, dir) = app_dir("options");

    emvc(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--ejs"))
        .stdout(predicate::str::contains("--jade"))
        .stdout(predicate::str::contains("--git"))
        .stdout(predicate::str::contains("--force"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--no-color"))
        .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn test_version() {
    let (_guard, dir) = app_dir("version");

    emvc(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));

    assert!(is_empty_dir(&dir));
}

#[test]
fn test_unknown_flag_fails_without_writing() {
    let (_guard, dir) = app_dir("unknown");

    emvc(&dir)
        .arg("--hogan")
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--hogan"));

    assert!(is_empty_dir(&dir));
}

#[test]
fn test_both_view_engines_is_a_usage_error() {
    let (_guard, dir) = app_dir("engines");

    emvc(&dir)
        .args(["--ejs", "--jade"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));

    assert!(is_empty_dir(&dir));
}

#[test]
fn test_file_as_target_fails() {
    let (_guard, dir) = app_dir("file");
    fs::write(dir.join("taken"), "x").unwrap();

    emvc(&dir)
        .arg("taken")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("is not a directory"));
}

// ============================================================================
// Generation
// ============================================================================

#[test]
fn test_no_args_creates_basic_app() {
    let (_guard, dir) = app_dir("1234.5678");

    let stdout = run_ok(&dir, &[]);
    let files = parse_created_files(&stdout);

    assert_eq!(files.len(), DEFAULT_FILE_COUNT);
    for expected in [
        "server.js",
        "package.json",
        "app/views/layout.jade",
        "app/views/pages/main.jade",
        "app/views/pages/error.jade",
        "config/routes.js",
        "config/initializers/30_middleware.js",
        "app/controllers/pages_controller.js",
    ] {
        assert!(files.iter().any(|f| f == expected), "missing {expected}");
    }
    assert!(!files.iter().any(|f| f == ".gitignore"));

    // Report and disk agree
    let reported: BTreeSet<_> = files.into_iter().collect();
    assert_eq!(reported, files_on_disk(&dir));
}

#[cfg(not(windows))]
#[test]
fn test_no_args_provides_debug_instructions() {
    let (_guard, dir) = app_dir("42.7");

    let stdout = run_ok(&dir, &[]);

    let debug = Regex::new(r"DEBUG=app-(?:[0-9\.]+):\* (?:& )?npm start").unwrap();
    assert!(debug.is_match(&stdout));
}

#[test]
fn test_package_json_is_canonical() {
    let (_guard, dir) = app_dir("99");

    run_ok(&dir, &[]);

    let contents = fs::read_to_string(dir.join("package.json")).unwrap();
    let expected = String::new()
        + "{\n"
        + "  \"name\": \"app-99\",\n"
        + "  \"version\": \"0.0.1\",\n"
        + "  \"private\": true,\n"
        + "  \"dependencies\": {\n"
        + "    \"body-parser\": \"~1.13.2\",\n"
        + "    \"bootable\": \"0.2.x\",\n"
        + "    \"bootable-environment\": \"0.2.x\",\n"
        + "    \"connect-powered-by\": \"0.1.x\",\n"
        + "    \"cookie-parser\": \"~1.3.5\",\n"
        + "    \"debug\": \"~2.2.0\",\n"
        + "    \"emvc\": \"*\",\n"
        + "    \"errorhandler\": \"1.x.x\",\n"
        + "    \"express\": \"~4.13.1\",\n"
        + "    \"jade\": \"~1.11.0\",\n"
        + "    \"method-override\": \"1.x.x\",\n"
        + "    \"morgan\": \"~1.6.1\",\n"
        + "    \"serve-favicon\": \"~2.3.0\"\n"
        + "  },\n"
        + "  \"scripts\": {\n"
        + "    \"start\": \"node server.js\"\n"
        + "  }\n"
        + "}";

    assert_eq!(contents, expected);
}

#[test]
fn test_package_json_identical_for_same_basename() {
    let (_first_guard, first) = app_dir("same");
    let (_second_guard, second) = app_dir("same");

    run_ok(&first, &[]);
    run_ok(&second, &[]);

    assert_eq!(
        fs::read(first.join("package.json")).unwrap(),
        fs::read(second.join("package.json")).unwrap()
    );
}

#[test]
fn test_ejs_creates_ejs_templates() {
    let (_guard, dir) = app_dir("ejs");

    let stdout = run_ok(&dir, &["--ejs"]);
    let files = parse_created_files(&stdout);

    assert_eq!(files.len(), EJS_FILE_COUNT);
    assert!(files.iter().any(|f| f == "app/views/pages/main.html.ejs"));
    assert!(files.iter().any(|f| f == "app/views/pages/error.html.ejs"));
    assert!(!files.iter().any(|f| f.ends_with(".jade")));

    let manifest = fs::read_to_string(dir.join("package.json")).unwrap();
    assert!(manifest.contains("\"ejs\": \"~2.3.3\""));
    assert!(!manifest.contains("\"jade\""));
}

#[test]
fn test_ejs_differs_from_default_only_in_views() {
    let (_default_guard, default_dir) = app_dir("default");
    let (_ejs_guard, ejs_dir) = app_dir("ejs-diff");

    let default_files = parse_created_files(&run_ok(&default_dir, &[]));
    let ejs_files = parse_created_files(&run_ok(&ejs_dir, &["-e"]));

    let non_view = |files: &[String]| -> Vec<String> {
        files
            .iter()
            .filter(|f| !f.starts_with("app/views/"))
            .cloned()
            .collect()
    };
    assert_eq!(non_view(&default_files), non_view(&ejs_files));
    assert_eq!(default_files.len() - ejs_files.len(), 1);
}

#[test]
fn test_git_adds_gitignore() {
    let (_guard, dir) = app_dir("git");

    let stdout = run_ok(&dir, &["--git"]);
    let files = parse_created_files(&stdout);

    assert_eq!(files.len(), GIT_FILE_COUNT);
    assert!(files.iter().any(|f| f == ".gitignore"));
    assert!(files.iter().any(|f| f == "app/views/layout.jade"));
    assert!(dir.join(".gitignore").is_file());
}

#[test]
fn test_flags_in_any_order() {
    let (_first_guard, first) = app_dir("order-a");
    let (_second_guard, second) = app_dir("order-b");

    let a = parse_created_files(&run_ok(&first, &["--git", "--ejs"]));
    let b = parse_created_files(&run_ok(&second, &["--ejs", "--git"]));

    assert_eq!(a, b);
    assert_eq!(a.len(), EJS_FILE_COUNT + 1);
}

#[test]
fn test_positional_directory_is_created() {
    let (_guard, dir) = app_dir("parent");

    let stdout = run_ok(&dir, &["my-site"]);

    assert_eq!(parse_created_files(&stdout).len(), DEFAULT_FILE_COUNT);
    assert!(dir.join("my-site/server.js").is_file());
    assert!(stdout.contains("cd my-site && npm install"));

    let manifest = fs::read_to_string(dir.join("my-site/package.json")).unwrap();
    assert!(manifest.contains("\"name\": \"my-site\""));
}

#[test]
fn test_app_name_is_sanitized_directory_name() {
    let (_guard, dir) = app_dir("names");

    run_ok(&dir, &["My Site"]);

    let target = dir.join("My Site");
    let manifest = fs::read_to_string(target.join("package.json")).unwrap();
    assert!(manifest.contains("\"name\": \"my-site\""));

    let readme = fs::read_to_string(target.join("README.md")).unwrap();
    assert!(readme.starts_with("# my-site\n"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let (_guard, dir) = app_dir("dry");

    let stdout = run_ok(&dir, &["--dry-run", "--git"]);

    assert_eq!(parse_created_files(&stdout).len(), GIT_FILE_COUNT);
    assert!(stdout.contains("Dry run"));
    assert!(is_empty_dir(&dir));
}

// ============================================================================
// Existing content
// ============================================================================

#[test]
fn test_rerun_reports_identical_files() {
    let (_guard, dir) = app_dir("rerun");

    run_ok(&dir, &[]);
    let stdout = run_ok(&dir, &["--no-color"]);

    assert!(parse_created_files(&stdout).is_empty());
    assert_eq!(
        stdout.lines().filter(|l| l.starts_with("identical : ")).count(),
        DEFAULT_FILE_COUNT
    );
}

#[test]
fn test_conflicting_file_is_not_overwritten() {
    let (_guard, dir) = app_dir("conflict");
    fs::create_dir_all(dir.join("config")).unwrap();
    fs::write(dir.join("config/routes.js"), "// mine\n").unwrap();

    let assert = emvc(&dir).arg("--no-color").assert().failure().code(1);
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    assert!(stdout.contains("conflict : config/routes.js"));
    let created = parse_created_files(&stdout);
    assert_eq!(created.len(), DEFAULT_FILE_COUNT - 1);
    assert!(!created.iter().any(|f| f == "config/routes.js"));
    assert_eq!(
        fs::read_to_string(dir.join("config/routes.js")).unwrap(),
        "// mine\n"
    );
}

#[test]
fn test_force_overwrites_conflicting_file() {
    let (_guard, dir) = app_dir("force");
    fs::write(dir.join("server.js"), "// mine\n").unwrap();

    let stdout = run_ok(&dir, &["--force", "--no-color"]);

    assert!(stdout.contains("overwrite : server.js"));
    assert_eq!(parse_created_files(&stdout).len(), DEFAULT_FILE_COUNT - 1);
    assert!(
        fs::read_to_string(dir.join("server.js"))
            .unwrap()
            .contains("new emvc.Application()")
    );
}

#[test]
fn test_directory_collision_aborts() {
    let (_guard, dir) = app_dir("collision");
    fs::create_dir(dir.join("package.json")).unwrap();

    emvc(&dir)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("blocked by an existing directory or file"));

    // Walk stopped at the collision
    assert!(dir.join("server.js").is_file());
    assert!(!dir.join("README.md").exists());
}

#[test]
fn test_file_in_place_of_config_directory_aborts() {
    let (_guard, dir) = app_dir("blocked");
    fs::write(dir.join("config"), "// not a directory\n").unwrap();

    emvc(&dir)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("config"))
        .stderr(predicate::str::contains("blocked by an existing directory or file"));

    assert!(dir.join("server.js").is_file());
    assert!(!dir.join("public").exists());
    assert_eq!(
        fs::read_to_string(dir.join("config")).unwrap(),
        "// not a directory\n"
    );
}
