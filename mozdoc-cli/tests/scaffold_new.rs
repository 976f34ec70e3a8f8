use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn mozdoc() -> Command {
    Command::cargo_bin("mozdoc").expect("mozdoc binary")
}

#[test]
fn new_scaffolds_every_resource_root() {
    let dir = TempDir::new().unwrap();
    let dest = dir.path().join("docs");

    mozdoc()
        .arg("new")
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Scaffolded"));

    for root in ["documents", "images", "css", "js", "prototypes"] {
        assert!(dest.join(root).is_dir(), "missing resource root '{root}'");
    }
    assert!(dest.join("config.json").is_file());
    assert!(dest.join("documents").join("index.md").is_file());
}

#[test]
fn new_never_clobbers_an_existing_config() {
    let dir = TempDir::new().unwrap();
    let dest = dir.path().join("docs");
    std::fs::create_dir_all(&dest).unwrap();
    std::fs::write(dest.join("config.json"), r#"{ "locals": { "title": "Mine" } }"#).unwrap();

    mozdoc().arg("new").arg(&dest).assert().success();

    let config = std::fs::read_to_string(dest.join("config.json")).unwrap();
    assert!(config.contains("Mine"), "author config was overwritten");
}

#[test]
fn init_is_an_alias_for_new() {
    let dir = TempDir::new().unwrap();
    let dest = dir.path().join("docs");

    mozdoc().arg("init").arg(&dest).assert().success();
    assert!(dest.join("documents").is_dir());
}

#[test]
fn new_defaults_to_the_chdir_option() {
    let dir = TempDir::new().unwrap();

    mozdoc()
        .arg("new")
        .arg("-C")
        .arg(dir.path())
        .assert()
        .success();
    assert!(dir.path().join("documents").is_dir());
}
