use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn mozdoc() -> Command {
    Command::cargo_bin("mozdoc").expect("mozdoc binary")
}

/// Minimal repository with one commit so HEAD is on a branch.
fn init_repo(dir: &Path) {
    let repo = git2::Repository::init(dir).expect("init");
    {
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "tester").unwrap();
        config.set_str("user.email", "tester@example.com").unwrap();
    }
    std::fs::write(dir.join("README.md"), "# docs\n").unwrap();
    let sig = repo.signature().unwrap();
    let tree_id = {
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("README.md")).unwrap();
        index.write().unwrap();
        index.write_tree().unwrap()
    };
    let tree = repo.find_tree(tree_id).unwrap();
    repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
        .unwrap();
}

#[test]
fn build_outside_a_repository_fails_with_a_diagnostic() {
    let dir = TempDir::new().unwrap();

    mozdoc()
        .arg("build")
        .arg("-C")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a git repository"));
}

#[test]
fn build_without_the_generator_package_is_refused() {
    let dir = TempDir::new().unwrap();
    init_repo(dir.path());

    mozdoc()
        .arg("build")
        .arg("-C")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("npm install mozdoc"));
}

#[test]
fn unknown_commands_are_rejected() {
    mozdoc()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn missing_source_dir_is_reported() {
    let dir = TempDir::new().unwrap();

    mozdoc()
        .arg("build")
        .arg("-C")
        .arg(dir.path().join("no-such-dir"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot resolve source dir"));
}
