//! Integration tests for the CSPC CLI.
//!
//! These tests invoke the `cspc` binary as a subprocess and check
//! exit codes, stdout, and stderr.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(deprecated)]
fn cspc() -> Command {
    let mut cmd = Command::cargo_bin("cspc").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Return the workspace root (parent of cspc-cli/).
fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .to_path_buf()
}

/// Return the absolute path to a sample program.
fn test_program(name: &str) -> PathBuf {
    workspace_root().join("tests/programs").join(name)
}

/// Write `source` to a .cspc file inside `dir`.
fn write_source(dir: &TempDir, source: &str) -> PathBuf {
    let path = dir.path().join("test.cspc");
    fs::write(&path, source).unwrap();
    path
}

// ---- Usage ----

#[test]
fn no_args_prints_usage() {
    cspc()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage: cspc"));
}

#[test]
fn help_exits_zero() {
    for flag in ["help", "--help", "-h"] {
        cspc()
            .arg(flag)
            .assert()
            .success()
            .stderr(predicate::str::contains("disassemble"));
    }
}

#[test]
fn unknown_command() {
    cspc()
        .arg("frobnicate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown command 'frobnicate'"));
}

#[test]
fn commands_require_a_file() {
    cspc()
        .arg("run")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("run requires an input file"));
    cspc()
        .arg("disassemble")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("disassemble requires an input file"));
}

#[test]
fn missing_file() {
    cspc()
        .args(["run", "/nonexistent/prog.cspc"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot read '/nonexistent/prog.cspc'"));
}

// ---- run ----

#[test]
fn run_add() {
    cspc()
        .arg("run")
        .arg(test_program("add.cspc"))
        .assert()
        .success()
        .stdout("30\n");
}

#[test]
fn run_store() {
    cspc()
        .arg("run")
        .arg(test_program("store.cspc"))
        .assert()
        .success()
        .stdout("42\n");
}

#[test]
fn run_loop() {
    cspc()
        .arg("run")
        .arg(test_program("loop.cspc"))
        .assert()
        .success()
        .stdout("321");
}

#[test]
fn run_branch() {
    cspc()
        .arg("run")
        .arg(test_program("branch.cspc"))
        .assert()
        .success()
        .stdout("big\n");
}

#[test]
fn run_runtime_error_exits_3() {
    cspc()
        .arg("run")
        .arg(test_program("divzero.cspc"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("runtime error: division by zero at instruction 4"));
}

#[test]
fn run_without_main() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "DEF start PRINT_NEWLINE ENDDEF\n");
    cspc()
        .arg("run")
        .arg(&path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("runtime error"))
        .stderr(predicate::str::contains("main"));
}

#[test]
fn run_assembly_error_exits_1() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "DEF main\nLOAD_CONST 1\n");
    cspc()
        .arg("run")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error: line 1: function 'main' has no ENDDEF"));
}

#[test]
fn run_undefined_global() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "DEF main LOAD_GLOBAL ghost ENDDEF\n");
    cspc()
        .arg("run")
        .arg(&path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("ghost"));
}

#[test]
fn run_step_limit() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "DEF main JUMP_ABSOLUTE 0 ENDDEF\n");
    cspc()
        .arg("run")
        .arg(&path)
        .args(["--max-steps", "100"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("100"));
}

#[test]
fn run_stack_limit() {
    cspc()
        .arg("run")
        .arg(test_program("add.cspc"))
        .args(["--max-stack", "1"])
        .assert()
        .code(3)
        .stdout("");
}

#[test]
fn run_bad_flag_value() {
    cspc()
        .arg("run")
        .arg(test_program("add.cspc"))
        .args(["--max-steps", "lots"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--max-steps"));
}

#[test]
fn run_debug_logs_listing_and_trace() {
    cspc()
        .arg("run")
        .arg("--debug")
        .arg(test_program("add.cspc"))
        .assert()
        .success()
        .stdout("30\n")
        .stderr(predicate::str::contains("0:\tLOAD_CONST 0\t(10)"))
        .stderr(predicate::str::contains("LEN: 7 PC: 0\tSTACK: []\tHEAP: {}"))
        .stderr(predicate::str::contains("LEN: 7 PC: 4\tSTACK: [10, 20]\tHEAP: {}"));
}

#[test]
fn run_quiet_by_default() {
    cspc()
        .arg("run")
        .arg(test_program("add.cspc"))
        .assert()
        .success()
        .stderr("");
}

// ---- disassemble ----

#[test]
fn disassemble_sample() {
    cspc()
        .arg("disassemble")
        .arg(test_program("add.cspc"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("DEF main\nCODE\n0:\tLOAD_CONST 0\t(10)\n"))
        .stdout(predicate::str::contains("2:\tLOAD_CONST 1\t(20)\n4:\tADD\n"))
        .stdout(predicate::str::contains("\tIntegers: [10, 20]\n"))
        .stdout(predicate::str::ends_with("ENDDEF\n"));
}

#[test]
fn disassemble_lists_every_function() {
    cspc()
        .arg("disassemble")
        .arg(test_program("branch.cspc"))
        .assert()
        .success()
        .stdout(predicate::str::contains("DEF helper\n"))
        .stdout(predicate::str::contains("DEF main\n"))
        .stdout(predicate::str::contains("JUMP_FORWARD 3\t(4)"));
}

#[test]
fn disassemble_does_not_execute() {
    cspc()
        .arg("disassemble")
        .arg(test_program("divzero.cspc"))
        .assert()
        .success()
        .stdout(predicate::str::contains("4:\tDIV\n"));
}
