//! Integration tests driving the interactive menu over stdin.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn tracker(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("employee-tracker");
    cmd.current_dir(dir.path())
        .env_remove("EMPLOYEE_TRACKER_DB")
        .env("NO_COLOR", "1")
        .args(["--database", "tracker.db"]);
    cmd
}

#[test]
fn test_quit_exits_cleanly() {
    let dir = TempDir::new().unwrap();
    tracker(&dir)
        .write_stdin("Quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("what would you like to do?"))
        .stdout(predicate::str::contains("Okay, goodbye"));
    assert!(dir.path().join("tracker.db").exists());
}

#[test]
fn test_menu_accepts_position() {
    let dir = TempDir::new().unwrap();
    tracker(&dir)
        .write_stdin("15\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("15) Quit"))
        .stdout(predicate::str::contains("Okay, goodbye"));
}

#[test]
fn test_closed_input_is_an_error() {
    let dir = TempDir::new().unwrap();
    tracker(&dir)
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input closed"));
}

#[test]
fn test_added_department_survives_restart() {
    let dir = TempDir::new().unwrap();
    tracker(&dir)
        .write_stdin("Add Department\nEngineering\nQuit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Success!"));

    tracker(&dir)
        .write_stdin("View All Departments\nQuit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1   Engineering"));
}

#[test]
fn test_duplicate_department_rejected() {
    let dir = TempDir::new().unwrap();
    tracker(&dir)
        .write_stdin("Add Department\nEng\nAdd Department\nEng\nQuit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sorry, a department already exists with that name."));
}

#[test]
fn test_full_add_flow() {
    let dir = TempDir::new().unwrap();
    let script = [
        "Add Department",
        "Eng",
        "Add Role",
        "Dev",
        "60000",
        "Eng",
        "Add Employee",
        "Ann",
        "Lee",
        "Dev",
        "1",
        "Add Employee",
        "Ann",
        "Lee",
        "Dev",
        "Ann Lee",
        "View All Employees",
        "Quit",
        "",
    ]
    .join("\n");
    tracker(&dir)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Ann Lee (2)"))
        .stdout(predicate::str::contains(
            "2   Ann         Lee        Dev    Eng         60000   Ann Lee  ",
        ));
}

#[test]
fn test_unimplemented_entry() {
    let dir = TempDir::new().unwrap();
    tracker(&dir)
        .write_stdin("Remove Employee\nQuit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("NOT YET IMPLEMENTED"));
}

#[test]
fn test_seeded_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("employee-tracker.yaml"),
        "database: seeded.db\nseed: true\n",
    )
    .unwrap();
    let mut cmd = cargo_bin_cmd!("employee-tracker");
    cmd.current_dir(dir.path())
        .env_remove("EMPLOYEE_TRACKER_DB")
        .env("NO_COLOR", "1")
        .write_stdin("View All Employees By Manager\nQuit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded demo data."))
        .stdout(predicate::str::contains("Kevin"))
        .stdout(predicate::str::contains("Ashley Rodriguez"));
    assert!(dir.path().join("seeded.db").exists());
}

#[test]
fn test_malformed_config_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("employee-tracker.yaml"), "seed: [1, 2]\n").unwrap();
    let mut cmd = cargo_bin_cmd!("employee-tracker");
    cmd.current_dir(dir.path())
        .env_remove("EMPLOYEE_TRACKER_DB")
        .write_stdin("Quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("YAML error"));
}
