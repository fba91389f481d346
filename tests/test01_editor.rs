use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

const TODO: &str = "pick abc123 msg1\npick def456 msg2\npick ghi789 msg3\n\n# Rebase 0000000 onto 1111111 (3 commands)\n";

#[test]
fn test01_editor_mode_drops_listed_commits() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    let set = tmp.path().join("set.json");
    let todo = tmp.path().join("git-rebase-todo");
    fs::write(&set, r#"["def4"]"#)?;
    fs::write(&todo, TODO)?;

    // Same argument shape git produces from GIT_SEQUENCE_EDITOR plus the appended path
    Command::cargo_bin("backdate")?
        .arg("--deletion-set")
        .arg(&set)
        .arg("--editor")
        .arg(&todo)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&todo)?,
        "pick abc123 msg1\ndrop def456 msg2\npick ghi789 msg3\n\n# Rebase 0000000 onto 1111111 (3 commands)\n"
    );
    // The editor never owns the deletion set
    assert!(set.exists());
    Ok(())
}

#[test]
fn test01_editor_mode_fails_without_deletion_set() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    let todo = tmp.path().join("git-rebase-todo");
    fs::write(&todo, TODO)?;

    Command::cargo_bin("backdate")?
        .arg("--deletion-set")
        .arg(tmp.path().join("gone.json"))
        .arg("--editor")
        .arg(&todo)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("deletion set"));

    assert_eq!(fs::read_to_string(&todo)?, TODO);
    Ok(())
}

#[test]
fn test01_unparsable_arguments_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("backdate")?
        .args(["--delete", "many"])
        .assert()
        .code(2);
    Command::cargo_bin("backdate")?
        .args(["--delete-date", "2023-13-40"])
        .assert()
        .code(2);
    Command::cargo_bin("backdate")?
        .args(["--delete-range", "2023-01-01"])
        .assert()
        .code(2);
    Command::cargo_bin("backdate")?
        .args(["--delete", "2", "--add", "3"])
        .assert()
        .code(2);
    Ok(())
}

#[test]
fn test01_dry_run_is_limited_to_deletes() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("backdate")?
        .args(["--add", "2", "--dry-run"])
        .assert()
        .code(2);

    let tmp = TempDir::new()?;
    Command::cargo_bin("backdate")?
        .arg("--repo")
        .arg(tmp.path())
        .arg("--dry-run")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--dry-run needs"));
    // Rejected before anything touched the directory
    assert!(fs::read_dir(tmp.path())?.next().is_none());
    Ok(())
}
