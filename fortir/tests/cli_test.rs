//! Binary-level test suite for the batch CLI.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[allow(clippy::unwrap_used)]
fn fortir() -> Command {
    Command::cargo_bin("fortir").unwrap()
}

#[test]
fn transpiles_a_file_into_the_output_directory() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("demo.src");
    fs::write(&input, "program {\nx = 1;\n}").unwrap();
    let out_dir = dir.path().join("build");

    fortir()
        .current_dir(dir.path())
        .arg(&input)
        .arg("-o")
        .arg(&out_dir)
        .assert()
        .success();

    let produced = fs::read_to_string(out_dir.join("demo.f90")).unwrap();
    assert!(produced.contains("program main"));
    assert!(produced.contains("end program;"));
}

#[test]
fn stdout_mode_prints_the_transformed_text() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("demo.src");
    fs::write(&input, "integer function f() {\nreturn 5;\n}").unwrap();

    fortir()
        .current_dir(dir.path())
        .arg(&input)
        .arg("--stdout")
        .assert()
        .success()
        .stdout(predicate::str::contains("f = 5;"))
        .stdout(predicate::str::contains("end function;"));
}

#[test]
fn unresolved_function_fails_with_its_name() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bad.src");
    fs::write(&input, "program {\nx = mystery(1);\n}").unwrap();

    fortir()
        .current_dir(dir.path())
        .arg(&input)
        .arg("--stdout")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("mystery"))
        .stderr(predicate::str::contains("never declared"));
}

#[test]
fn a_failed_file_does_not_abort_the_batch() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("good.src");
    let bad = dir.path().join("bad.src");
    fs::write(&good, "program {\nx = 1;\n}").unwrap();
    fs::write(&bad, "program {\nx = mystery(1);\n}").unwrap();
    let out_dir = dir.path().join("build");

    fortir()
        .current_dir(dir.path())
        .arg(&good)
        .arg(&bad)
        .arg("-o")
        .arg(&out_dir)
        .arg("--sequential")
        .assert()
        .code(1);

    // The good file is still produced.
    assert!(out_dir.join("good.f90").exists());
    assert!(!out_dir.join("bad.f90").exists());
}

#[test]
fn json_report_lists_every_file() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("good.src");
    let bad = dir.path().join("bad.src");
    fs::write(&good, "program {\nx = 1;\n}").unwrap();
    fs::write(&bad, "program {\nx = mystery(1);\n}").unwrap();
    let out_dir = dir.path().join("build");

    let output = fortir()
        .current_dir(dir.path())
        .arg(&good)
        .arg(&bad)
        .arg("-o")
        .arg(&out_dir)
        .arg("--sequential")
        .arg("--json")
        .output()
        .unwrap();

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = report.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].get("output").is_some());
    assert!(entries[1]["error"]
        .as_str()
        .unwrap()
        .contains("never declared"));
}

#[test]
fn extension_flag_controls_output_names() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("demo.src");
    fs::write(&input, "program {\nx = 1;\n}").unwrap();
    let out_dir = dir.path().join("build");

    fortir()
        .current_dir(dir.path())
        .arg(&input)
        .arg("-o")
        .arg(&out_dir)
        .arg("-e")
        .arg("f95")
        .assert()
        .success();

    assert!(out_dir.join("demo.f95").exists());
}

#[test]
fn config_file_supplies_defaults() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(".fortir.toml"),
        "[fortir]\noutput_dir = \"generated\"\nextension = \"f95\"\n",
    )
    .unwrap();
    let input = dir.path().join("demo.src");
    fs::write(&input, "program {\nx = 1;\n}").unwrap();

    fortir()
        .current_dir(dir.path())
        .arg("demo.src")
        .assert()
        .success();

    assert!(dir.path().join("generated").join("demo.f95").exists());
}

#[test]
fn missing_input_file_is_reported() {
    let dir = tempdir().unwrap();
    fortir()
        .current_dir(dir.path())
        .arg("nope.src")
        .arg("--stdout")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn no_arguments_is_a_usage_error() {
    let dir = tempdir().unwrap();
    fortir().current_dir(dir.path()).assert().code(2);
}
