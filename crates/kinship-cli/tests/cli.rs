//! End-to-end tests for the kinship binary

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PEOPLE: &str = "\
Alice 1950-01-01 Leeds
Bob 1948-03-03 Hull
Carol 1975-05-05 Leeds
Dan 1977-07-07 Leeds
Eve 1952-02-02 York
Frank 1980-08-08 York
George 1953-04-04 Leeds
Hank 1979-09-09 Leeds
Gma 1925-01-01 Leeds
Gpa 1924-01-01 Leeds
";

const FATHERS: &str = "\
Carol 1975-05-05 Bob 1948-03-03
Dan 1977-07-07 Bob 1948-03-03
Frank 1980-08-08 Eve 1952-02-02
Hank 1979-09-09 George 1953-04-04
Alice 1950-01-01 Gpa 1924-01-01
George 1953-04-04 Gpa 1924-01-01
";

const MOTHERS: &str = "\
Carol 1975-05-05 Alice 1950-01-01
Dan 1977-07-07 Alice 1950-01-01
Frank 1980-08-08 Alice 1950-01-01
Alice 1950-01-01 Gma 1925-01-01
George 1953-04-04 Gma 1925-01-01
";

fn setup() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "person.txt", PEOPLE);
    write(dir.path(), "fathers.txt", FATHERS);
    write(dir.path(), "mothers.txt", MOTHERS);
    write(dir.path(), "config.toml", "");
    dir
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn kinship(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kinship").unwrap();
    cmd.env_remove("KINSHIP_DATA_DIR")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(dir.path().join("config.toml"))
        .arg("--data-dir")
        .arg(dir.path());
    cmd
}

#[test]
fn test_load_reports_counts() {
    let dir = setup();
    kinship(&dir)
        .arg("load")
        .assert()
        .success()
        .stdout(predicate::str::contains("People: 10 added, 0 rejected"))
        .stdout(predicate::str::contains("Links: 6 fathers, 5 mothers, 0 rejected"));
}

#[test]
fn test_query_siblings() {
    let dir = setup();
    kinship(&dir)
        .args(["query", "siblings", "Carol", "1975-05-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Carol's siblings:"))
        .stdout(predicate::str::contains("Sibling: Name: Dan"))
        .stdout(predicate::str::contains("Half sibling: Name: Frank"));
}

#[test]
fn test_query_cousins_and_lineage() {
    let dir = setup();
    kinship(&dir)
        .args(["query", "cousins", "Carol", "1975-05-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cousin: Name: Hank").count(1));

    kinship(&dir)
        .args(["query", "maternal", "Carol", "1975-05-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mother: Name: Alice"))
        .stdout(predicate::str::contains("Grandmother: Name: Gma"));
}

#[test]
fn test_query_ancestors_json() {
    let dir = setup();
    let output = kinship(&dir)
        .args(["--format", "json", "query", "ancestors", "Carol", "1975-05-05", "-g", "2"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<_> = records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["person"]["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Gpa", "Gma"]);
}

#[test]
fn test_zero_generations_fails() {
    let dir = setup();
    kinship(&dir)
        .args(["query", "descendants", "Alice", "1950-01-01", "-g", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid argument"));
}

#[test]
fn test_negative_generations_fail_as_invalid_argument() {
    let dir = setup();
    kinship(&dir)
        .args(["query", "ancestors", "Carol", "1975-05-05", "-g", "-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Invalid argument: generation count must be a positive",
        ));
}

#[test]
fn test_generations_past_oldest_ancestor_are_empty() {
    let dir = setup();
    kinship(&dir)
        .args(["query", "ancestors", "Carol", "1975-05-05", "-g", "200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Carol has no"));
}

#[test]
fn test_show_unknown_person() {
    let dir = setup();
    kinship(&dir)
        .args(["show", "Nobody", "2000-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nobody (2000-01-01) isn't in the tree."));
}

#[test]
fn test_shell_session() {
    let dir = setup();
    kinship(&dir)
        .arg("shell")
        .write_stdin("add Steve|1950-06-06|York\nwed Alice|1950-01-01|Steve|1950-06-06\nquery parents Carol|1975-05-05\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Stepparent: Name: Steve"));
}

#[test]
fn test_load_without_data_dir_fails() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "config.toml", "");
    Command::cargo_bin("kinship")
        .unwrap()
        .env_remove("KINSHIP_DATA_DIR")
        .arg("--config")
        .arg(dir.path().join("config.toml"))
        .arg("load")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No data directory given"));
}

#[test]
fn test_completions_need_no_data() {
    Command::cargo_bin("kinship")
        .unwrap()
        .env_remove("KINSHIP_DATA_DIR")
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kinship"));
}
