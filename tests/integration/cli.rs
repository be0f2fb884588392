use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn prockit() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("prockit"))
}

#[test]
fn run_prints_captured_output() {
    let temp = tempdir().expect("failed to create tempdir");

    prockit()
        .current_dir(temp.path())
        .args(["run", "--", "echo", "hi"])
        .assert()
        .success()
        .stdout("hi\n");
}

#[test]
fn run_propagates_the_child_exit_code() {
    let temp = tempdir().expect("failed to create tempdir");

    prockit()
        .current_dir(temp.path())
        .args(["run", "--", "sh", "-c", "exit 3"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("exited with code 3"));
}

#[test]
fn run_ignore_codes_treats_listed_exits_as_success() {
    let temp = tempdir().expect("failed to create tempdir");

    prockit()
        .current_dir(temp.path())
        .args(["run", "--ignore-codes", "3", "--", "sh", "-c", "exit 3"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn run_failure_is_recorded_in_the_app_log_file() {
    let temp = tempdir().expect("failed to create tempdir");

    prockit()
        .current_dir(temp.path())
        .args(["run", "--", "sh", "-c", "exit 3"])
        .assert()
        .failure();

    let log = std::fs::read_to_string(temp.path().join("prockit.log"))
        .expect("log file should exist");
    assert!(log.contains("|ERROR]"), "unexpected log contents: {log}");
    assert!(log.contains("exited with code 3"));
}

#[test]
fn exec_passes_child_output_through() {
    let temp = tempdir().expect("failed to create tempdir");

    prockit()
        .current_dir(temp.path())
        .args(["exec", "--", "echo", "visible"])
        .assert()
        .success()
        .stdout(predicate::str::contains("visible"));
}

#[test]
fn exec_fails_on_nonzero_exit() {
    let temp = tempdir().expect("failed to create tempdir");

    prockit()
        .current_dir(temp.path())
        .args(["exec", "--", "sh", "-c", "exit 7"])
        .assert()
        .failure()
        .code(7);
}

#[test]
fn hostname_prints_a_single_line() {
    let temp = tempdir().expect("failed to create tempdir");

    prockit()
        .current_dir(temp.path())
        .arg("hostname")
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}
