// The runtime diagnostic carries the error message, the 1-based row:column of
// the failing instruction, the instruction byte, and the current cell value.
use std::io::Write;
use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::*;

fn cargo_bin() -> Command {
    Command::cargo_bin("bfi").unwrap()
}

#[test]
fn unmatched_open_bracket_is_reported_at_row_one_column_one() {
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .write_stdin("[")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No match for opening bracket"))
        .stderr(predicate::str::contains("at 1:1"));
}

#[test]
fn unmatched_close_bracket_is_reported_with_row_and_column() {
    // The stray ']' sits on the second row, second column.
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .write_stdin("++\n+]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No match for closing bracket"))
        .stderr(predicate::str::contains("at 2:2"))
        .stderr(predicate::str::contains("(code: ']' data: 3)"));
}

#[test]
fn diagnostic_includes_the_cell_value_at_failure() {
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .args(["-w"])
        .write_stdin("+".repeat(128))
        .assert()
        .failure()
        .stderr(predicate::str::contains("data: 127"));
}

#[test]
fn unknown_instruction_diagnostic_names_the_byte() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"++?").unwrap();

    cargo_bin()
        .timeout(Duration::from_secs(5))
        .args(["-s", "-f"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown instruction at 1:3"))
        .stderr(predicate::str::contains("(code: '?' data: 2)"));
}

#[test]
fn missing_file_fails_before_any_execution() {
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .args(["-f", "definitely/not/a/real/file.bf"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Reading file failed"));
}

#[test]
fn empty_program_is_rejected() {
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .write_stdin("")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No code to be interpreted"));
}
