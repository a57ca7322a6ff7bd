// Argument handling: unrecognized or malformed arguments are rejected with a
// usage line before any code is read; -h bypasses execution entirely.
use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::*;

fn cargo_bin() -> Command {
    Command::cargo_bin("bfi").unwrap()
}

#[test]
fn unknown_flag_prints_usage_and_fails() {
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .arg("-z")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage: bfi"));
}

#[test]
fn zero_data_size_is_rejected() {
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .args(["-d", "0"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage: bfi"));
}

#[test]
fn non_numeric_data_size_is_rejected() {
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .args(["-d", "lots"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage: bfi"));
}

#[test]
fn negative_data_size_is_rejected() {
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .args(["-d", "-30000"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn file_flag_without_a_path_is_rejected() {
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .arg("-f")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage: bfi"));
}

#[test]
fn help_flag_prints_help_and_succeeds() {
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("data segment size in cells"))
        .stdout(predicate::str::contains("-w"));
}

#[test]
fn help_flag_wins_even_with_a_program_waiting() {
    // -h bypasses execution, so the stdin program is never read.
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .arg("-h")
        .write_stdin("+.")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: bfi"));
}
