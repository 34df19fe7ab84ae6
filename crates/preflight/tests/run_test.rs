use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn git(dir: &Path, args: &[&str]) {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git failed to execute");
    assert!(output.status.success(), "git {args:?} failed");
}

fn setup_repo(config: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    git(tmp.path(), &["init"]);
    fs::write(tmp.path().join("preflight.yaml"), config).unwrap();
    tmp
}

fn preflight(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("preflight").unwrap();
    cmd.current_dir(dir);
    cmd
}

#[test]
fn noop_run_end_to_end() {
    let tmp = setup_repo(
        r#"
actions:
  noop:
    run: "true {files}"
    include: "*.py"
"#,
    );
    fs::write(tmp.path().join("x.py"), "x = 1\n").unwrap();
    git(tmp.path(), &["add", "x.py"]);

    preflight(tmp.path())
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("noop"))
        .stdout(predicate::str::contains("All actions passed (1 run"));
}

#[test]
fn run_with_nothing_staged_invokes_nothing() {
    let tmp = setup_repo(
        r#"
actions:
  noop:
    run: "true {files}"
    include: "*.py"
"#,
    );

    preflight(tmp.path())
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 run"));
}

#[test]
fn non_matching_files_are_skipped() {
    let tmp = setup_repo(
        r#"
actions:
  pyonly:
    run: "true {files}"
    include: "*.py"
"#,
    );
    fs::write(tmp.path().join("notes.txt"), "hello\n").unwrap();
    git(tmp.path(), &["add", "notes.txt"]);

    preflight(tmp.path())
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 run, 1 skipped"));
}

#[test]
fn failing_action_exits_one_but_later_actions_still_run() {
    let tmp = setup_repo(
        r#"
actions:
  bad:
    run: "false {files}"
    include: "*.py"
  after:
    run: "touch after-ran {files}"
    include: "*.py"
"#,
    );
    fs::write(tmp.path().join("x.py"), "x = 1\n").unwrap();
    git(tmp.path(), &["add", "x.py"]);

    preflight(tmp.path())
        .arg("run")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("bad"));

    assert!(
        tmp.path().join("after-ran").exists(),
        "actions after a failure must still run"
    );
}

#[test]
fn malformed_config_exits_two_and_runs_nothing() {
    let tmp = setup_repo(
        r#"
actions:
  broken:
    include: "*.py"
"#,
    );
    fs::write(tmp.path().join("x.py"), "x = 1\n").unwrap();
    git(tmp.path(), &["add", "x.py"]);

    preflight(tmp.path())
        .arg("run")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("ERROR:"));
}

#[test]
fn explicit_files_bypass_git_discovery() {
    let tmp = setup_repo(
        r#"
actions:
  record:
    run: "touch saw {files}"
    include: "*.py"
"#,
    );
    // Written but never staged; passed explicitly instead.
    fs::write(tmp.path().join("x.py"), "x = 1\n").unwrap();

    preflight(tmp.path())
        .args(["run", "x.py"])
        .assert()
        .success();

    assert!(tmp.path().join("saw").exists());
}

#[test]
fn json_output_is_machine_readable() {
    let tmp = setup_repo(
        r#"
actions:
  noop:
    run: "true {files}"
    include: "*.py"
"#,
    );
    fs::write(tmp.path().join("x.py"), "x = 1\n").unwrap();
    git(tmp.path(), &["add", "x.py"]);

    let output = preflight(tmp.path())
        .args(["run", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed["results"].is_array());
}

#[test]
fn all_files_runs_against_tracked_files() {
    let tmp = setup_repo(
        r#"
actions:
  record:
    run: "touch saw {files}"
    include: "*.py"
"#,
    );
    fs::write(tmp.path().join("x.py"), "x = 1\n").unwrap();
    git(tmp.path(), &["add", "x.py", "preflight.yaml"]);
    git(
        tmp.path(),
        &[
            "-c",
            "user.email=t@t",
            "-c",
            "user.name=t",
            "commit",
            "-m",
            "init",
        ],
    );

    preflight(tmp.path())
        .args(["run", "--all-files"])
        .assert()
        .success();

    assert!(tmp.path().join("saw").exists());
}
