// tests/release_test.rs
//
// End-to-end orchestration scenarios over the public API, with a mock forge
// and either a mock or a real temporary git repository.

use releasegh::config::Config;
use releasegh::error::ReleaseError;
use releasegh::forge::MockForge;
use releasegh::git::{Git2Repository, MockGit};
use releasegh::notes::RstNotes;
use releasegh::release::ReleaseRunner;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CHANGELOG: &str = "\
What's new
==========

.. _changes_x_x_x:

Version x.x.x
=============

Bug fixes
---------

- Fixed crash when the config file is empty
- ``bump`` now validates the increment name

.. _changes_0_1_1:

Version 0.1.1
=============

- Older entry
";

fn config_in(dir: &Path) -> Config {
    let changelog = dir.join("whats_new.rst");
    fs::write(&changelog, CHANGELOG).unwrap();
    Config {
        changelog,
        staging: dir.join(".releasegh_trash"),
        ..Config::default()
    }
}

#[test]
fn test_dry_run_end_to_end() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    let staging = config.staging.clone();
    let changelog = config.changelog.clone();

    let git = MockGit::new("acme", "widget", "main");
    let forge = MockForge::with_latest("v0.1.1");
    let runner = ReleaseRunner::new(config, &git, &forge, &RstNotes);

    let report = runner.run("patch", true).unwrap();

    // Computed version and review artifacts
    assert_eq!(report.previous, "v0.1.1");
    assert_eq!(report.next, "v0.1.2");
    assert!(!report.diff.is_empty());
    assert!(report.diff.contains("+Version 0.1.2"));
    assert!(report.body.contains("# Version 0.1.2"));
    assert!(report.body.contains("Fixed crash"));
    assert!(!report.body.contains("Older entry"));
    assert!(!report.commands.is_empty());

    // No writes anywhere
    assert!(!report.published);
    assert!(forge.created_releases().is_empty());
    assert!(git.log().is_empty());
    assert_eq!(fs::read_to_string(&changelog).unwrap(), CHANGELOG);

    // Staging file cleaned up
    assert!(!staging.exists());
}

#[test]
fn test_publish_end_to_end() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    let changelog = config.changelog.clone();
    let staging = config.staging.clone();

    let git = MockGit::new("acme", "widget", "main");
    let forge = MockForge::with_latest("v0.1.1");
    let runner = ReleaseRunner::new(config, &git, &forge, &RstNotes);

    let report = runner.run("major", false).unwrap();

    assert_eq!(report.next, "v1.0.0");
    assert!(report.published);

    let promoted = fs::read_to_string(&changelog).unwrap();
    assert!(promoted.contains(".. _changes_1_0_0:"));
    assert!(promoted.contains("Version 1.0.0"));

    let created = forge.created_releases();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].tag_name, "v1.0.0");
    assert_eq!(created[0].name, "v1.0.0");
    assert_eq!(created[0].target_commitish, "main");
    assert!(created[0].body.contains("Version 1.0.0"));
    assert!(!created[0].draft);
    assert!(!created[0].prerelease);

    assert!(!staging.exists());
}

#[test]
fn test_failed_forge_write_after_push() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    let staging = config.staging.clone();

    let git = MockGit::new("acme", "widget", "main");
    let forge = MockForge::with_latest("v0.1.1").fail_create_with(422);
    let runner = ReleaseRunner::new(config, &git, &forge, &RstNotes);

    let err = runner.run("patch", false).unwrap_err();
    assert!(matches!(err, ReleaseError::ForgeWrite(422)));
    assert!(err.to_string().contains("422"));

    // Local commit and push already happened and are not rolled back
    let log = git.log();
    assert!(log.iter().any(|l| l.contains("Release v0.1.2")));
    assert!(log.iter().any(|l| l.starts_with("push")));

    // The staging file is still removed
    assert!(!staging.exists());
}

#[test]
fn test_unparsable_latest_tag_is_a_format_error() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());

    let git = MockGit::new("acme", "widget", "main");
    let forge = MockForge::with_latest("release-2024");
    let runner = ReleaseRunner::new(config, &git, &forge, &RstNotes);

    let err = runner.run("patch", true).unwrap_err();
    assert!(matches!(err, ReleaseError::Format(_)));
}

#[test]
fn test_dry_run_against_a_real_repository() {
    let dir = TempDir::new().unwrap();
    let repo = git2::Repository::init(dir.path()).unwrap();

    {
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
    }

    fs::write(dir.path().join("README.md"), "hello\n").unwrap();
    let mut index = repo.index().unwrap();
    index.add_path(Path::new("README.md")).unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let sig = repo.signature().unwrap();
    repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
        .unwrap();
    repo.remote("origin", "git@github.com:acme/widget.git")
        .unwrap();

    let config = config_in(dir.path());
    let git = Git2Repository::open(dir.path()).unwrap();
    let forge = MockForge::with_latest("v0.1.1");
    let runner = ReleaseRunner::new(config, &git, &forge, &RstNotes);

    let report = runner.run("patch", true).unwrap();
    assert_eq!(report.next, "v0.1.2");
    // Branch name comes from the repository's HEAD
    assert!(report.branch == "master" || report.branch == "main");
    assert!(forge.created_releases().is_empty());
}
