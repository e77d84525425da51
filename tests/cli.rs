use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn mjnotation() -> Command {
    Command::cargo_bin("mjnotation").unwrap()
}

#[test]
fn parses_expression_as_text() {
    mjnotation()
        .arg("123m 2-13p")
        .assert()
        .success()
        .stdout(predicate::str::contains("concealed: 1m 2m 3m"))
        .stdout(predicate::str::contains("meld:      chii 2-13p (from kamicha)"));
}

#[test]
fn parses_expression_as_json() {
    mjnotation()
        .args(["--format", "json", "o33so"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"ankan\""))
        .stdout(predicate::str::contains("\"code\": \"3s\""));
}

#[test]
fn basic_mode_ignores_meld_markers() {
    mjnotation()
        .args(["--basic", "2-13m東"])
        .assert()
        .success()
        .stdout(predicate::str::contains("concealed: 2m 1m 3m 1z"));
}

#[test]
fn reports_validation_errors() {
    mjnotation()
        .args(["--validate", "11111m456p789s11z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("valid:     false"))
        .stdout(predicate::str::contains("1m appears 5 times"));
}

#[test]
fn malformed_meld_fails() {
    mjnotation()
        .arg("55=5m")
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed meld '55=5m'"));
}

#[test]
fn requires_expression_or_file() {
    mjnotation().assert().failure();
}

#[test]
fn file_mode_skips_comments_and_continues_after_errors() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# melds").unwrap();
    writeln!(file, "55=5m").unwrap();
    writeln!(file, "55y5p").unwrap();
    file.flush().unwrap();

    mjnotation()
        .arg("-f")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("> # melds"))
        .stdout(predicate::str::contains("meld:      pon 55y5p (from toimen)"))
        .stderr(predicate::str::contains("malformed meld"));
}

#[test]
fn file_mode_continues_after_unreadable_line() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"123m\n\xff\xfe\n55-5s\n").unwrap();
    file.flush().unwrap();

    mjnotation()
        .arg("-f")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("concealed: 1m 2m 3m"))
        .stdout(predicate::str::contains("meld:      pon 55-5s (from toimen)"))
        .stderr(predicate::str::contains("valid UTF-8"));
}
