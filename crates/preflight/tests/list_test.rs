use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_config(config: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("preflight.yaml"), config).unwrap();
    tmp
}

fn preflight(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("preflight").unwrap();
    cmd.current_dir(dir);
    cmd
}

#[test]
fn list_shows_actions_in_declaration_order() {
    let tmp = write_config(
        r#"
actions:
  format:
    run: "black {files}"
    include: "*.py"
    mutating: true
  types:
    run: "mypy {files}"
    include: "*.py"
"#,
    );

    let output = preflight(tmp.path()).arg("list").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    let format_pos = stdout.find("format").expect("format should be listed");
    let types_pos = stdout.find("types").expect("types should be listed");
    assert!(format_pos < types_pos);
    assert!(stdout.contains("mutating"));
}

#[test]
fn list_marks_disabled_actions() {
    let tmp = write_config(
        r#"
actions:
  off:
    run: "true {files}"
    include: "*.py"
    enabled: false
"#,
    );

    preflight(tmp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("disabled"));
}

#[test]
fn list_with_broken_config_exits_two() {
    let tmp = write_config("actions: [not, a, mapping]\n");

    preflight(tmp.path()).arg("list").assert().code(2);
}
