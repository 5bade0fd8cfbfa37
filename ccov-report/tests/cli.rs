use std::path::PathBuf;
use std::process::{Command, Output};

fn test_data(case: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../ccov/test-data").join(case)
}

fn ccov_report(args: &[&PathBuf]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ccov-report")).args(args).output().expect("run ccov-report")
}

#[test]
fn test_report() {
    let case = test_data("basic");
    let output = ccov_report(&[&case.join("trace.log"), &case.join("src")]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "     1|     2|C\n     2|     0|A\n");
}

#[test]
fn test_usage() {
    let case = test_data("basic");
    let output = ccov_report(&[&case.join("trace.log")]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.trim_end().ends_with(" LOG SRC"), "stdout = {:?}", stdout);
}

#[test]
fn test_missing_source_file() {
    let case = test_data("basic");
    let output = ccov_report(&[&case.join("trace.log"), &case]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}

#[test]
fn test_missing_log_file() {
    let case = test_data("basic");
    let output = ccov_report(&[&case.join("no-such.log"), &case.join("src")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Cannot read log file"));
}

#[test]
fn test_extra_arguments_ignored() {
    let case = test_data("basic");
    let output = ccov_report(&[&case.join("trace.log"), &case.join("src"), &PathBuf::from("extra"), &PathBuf::from("more")]);
    assert!(output.status.success(), "stderr = {:?}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "     1|     2|C\n     2|     0|A\n");
}

#[test]
fn test_malformed_marker_reports_log_line() {
    let log = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/malformed.log");
    let output = ccov_report(&[&log, &test_data("basic").join("src")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("malformed trace marker at log line 3"), "stderr = {:?}", stderr);
    assert!(stderr.contains("invalid line number \"x\""), "stderr = {:?}", stderr);
}

#[test]
fn test_out_of_range_reports_trace_position() {
    let log = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/out-of-range.log");
    let output = ccov_report(&[&log, &test_data("basic").join("src")]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "     1|     0|A\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot resolve trace #2"), "stderr = {:?}", stderr);
    assert!(stderr.contains("line 3 is out of range for `foo.c`, which has 3 lines"), "stderr = {:?}", stderr);
}
