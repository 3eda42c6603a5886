
use std::fs;

use predicates::prelude::*;
use predicates::str::contains;

use crate::setup::{Inputs, make_cli};

fn run_join(inputs: &Inputs, column: &str, join_type: &str) -> assert_cmd::assert::Assert {
    make_cli()
        .arg("join")
        .arg(&inputs.left)
        .arg(&inputs.right)
        .arg(column)
        .arg(join_type)
        .assert()
}

#[test]
fn test_inner_join() {
    let inputs = Inputs::new();

    run_join(&inputs, "ID", "inner")
        .success()
        .stdout(contains("Joining result was saved in path:"));

    assert_eq!(
        "ID,NAME,CITY\n2,b,X\n",
        fs::read_to_string(inputs.output()).unwrap()
    );
}

#[test]
fn test_left_join() {
    let inputs = Inputs::new();

    run_join(&inputs, "ID", "left").success();

    assert_eq!(
        "ID,NAME,CITY\n1,a,\n2,b,X\n",
        fs::read_to_string(inputs.output()).unwrap()
    );
}

#[test]
fn test_right_join() {
    let inputs = Inputs::new();

    run_join(&inputs, "ID", "right").success();

    assert_eq!(
        "ID,CITY,NAME\n2,X,b\n3,Y,\n",
        fs::read_to_string(inputs.output()).unwrap()
    );
}

#[test]
fn test_column_case_insensitive() {
    let inputs = Inputs::new();

    run_join(&inputs, "id", "INNER").success();

    assert!(inputs.output().exists());
}

#[test]
fn test_unknown_column() {
    let inputs = Inputs::new();

    run_join(&inputs, "missing", "inner")
        .failure()
        .code(1)
        .stdout(contains("ERROR: no column named 'MISSING'"));

    assert!(!inputs.output().exists());
}

#[test]
fn test_unknown_join_type() {
    let inputs = Inputs::new();

    run_join(&inputs, "ID", "outer")
        .failure()
        .code(1)
        .stdout(contains("invalid join type 'outer'"));

    assert!(!inputs.output().exists());
}

#[test]
fn test_missing_file() {
    let inputs = Inputs::new();

    make_cli()
        .arg("join")
        .arg(inputs.dir().join("nope.csv"))
        .arg(&inputs.right)
        .arg("ID")
        .arg("inner")
        .assert()
        .failure()
        .stdout(contains("ERROR: file not found on this path"));
}

#[test]
fn test_output_flags_and_preview() {
    let inputs = Inputs::new();
    let out_dir = tempfile::tempdir().unwrap();

    make_cli()
        .arg("--output-name")
        .arg("joined.csv")
        .arg("--output-dir")
        .arg(out_dir.path())
        .arg("--preview")
        .arg("join")
        .arg(&inputs.left)
        .arg(&inputs.right)
        .arg("ID")
        .arg("inner")
        .assert()
        .success()
        .stdout(contains("ID | NAME | CITY").and(contains("Joining result was saved")));

    assert!(out_dir.path().join("joined.csv").exists());
    assert!(!inputs.output().exists());
}

#[test]
fn test_delimiter_from_env() {
    let dir = tempfile::tempdir().unwrap();
    let left = dir.path().join("l.tsv");
    let right = dir.path().join("r.tsv");
    fs::write(&left, "k\tv\n1\ta\n").unwrap();
    fs::write(&right, "k\tw\n1\tb\n").unwrap();

    make_cli()
        .env("CSVJOIN_DELIMITER", "tab")
        .arg("join")
        .arg(&left)
        .arg(&right)
        .arg("k")
        .arg("inner")
        .assert()
        .success();

    assert_eq!(
        "k\tv\tw\n1\ta\tb\n",
        fs::read_to_string(dir.path().join("joining_result.csv")).unwrap()
    );
}
