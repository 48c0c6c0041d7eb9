use std::path::PathBuf;
use std::process::{Command, Output};

fn tabula(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tabula"))
        .args(args)
        .output()
        .expect("failed to run tabula")
}

fn write_problem(name: &str, json: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("tabula-{}-{}.json", std::process::id(), name));
    std::fs::write(&path, json).expect("failed to write problem file");
    path
}

#[test]
fn solve_inline_flags() {
    let output = tabula(&[
        "solve",
        "--objective",
        "5,2",
        "--constraint",
        "2,1",
        "--constraint",
        "10,12",
        "--rhs",
        "6,60",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Status: OPTIMAL"));
    assert!(stdout.contains("Z MAX = 15\nx1 = 3, x2 = 0"));
    assert!(stdout.contains("Pivots: 1"));
}

#[test]
fn solve_file_as_json() {
    let path = write_problem(
        "json",
        r#"{"objective": [5, 2], "constraints": [[2, 1], [10, 12]], "rhs": [6, 60]}"#,
    );
    let output = tabula(&["solve", path.to_str().unwrap(), "--format", "json"]);
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert!(output.status.success());
    assert_eq!(report["solution"]["status"], "optimal");
    assert_eq!(report["solution"]["z"], 15.0);
    assert_eq!(report["solution"]["variables"]["x1"], 3.0);
    assert!(report["error"].is_null());
    assert!(report["steps_log"].as_str().unwrap().contains("Step 1 (initial)"));
    assert_eq!(report["solution"]["trace"].as_array().unwrap().len(), 2);
}

#[test]
fn solve_unbounded_reports_error() {
    let output = tabula(&[
        "solve",
        "--objective",
        "1",
        "--constraint",
        "-1",
        "--rhs",
        "5",
        "--format",
        "json",
    ]);
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(report["solution"]["status"], "unbounded");
    assert!(report["solution"]["z"].is_null());
    assert!(report["error"].as_str().unwrap().contains("unbounded"));
}

#[test]
fn solve_with_steps_prints_tableaus() {
    let output = tabula(&[
        "solve",
        "--steps",
        "--objective",
        "5,2",
        "--constraint",
        "2,1",
        "--constraint",
        "10,12",
        "--rhs",
        "6,60",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("       Z       x1       x2      xf1      xf2        b"));
    assert!(stdout.contains("Entering column: x1"));
    assert!(stdout.contains("Optimal solution found"));
}

#[test]
fn invalid_shape_exits_with_error() {
    let output = tabula(&["solve", "--objective", "1,1", "--constraint", "1", "--rhs", "3"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("Invalid input"));
}

#[test]
fn missing_file_exits_with_io_error() {
    let output = tabula(&["check", "/nonexistent/tabula-problem.json"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error reading"));
}

#[test]
fn check_valid_problem() {
    let path = write_problem("check", r#"{"objective": [3, 4], "constraints": [[1, 0], [0, 1]], "rhs": [0, 0]}"#);
    let output = tabula(&["check", path.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("2 variables"));
    assert!(stdout.contains("2 constraints"));
}

#[test]
fn negative_bound_is_rejected() {
    let output = tabula(&["solve", "--objective", "1", "--constraint", "1", "--rhs", "-1"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("Constraint 1 has a negative right-hand side"));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("OPTIMAL"));
}

#[test]
fn check_agrees_with_solve_on_non_finite() {
    let output = tabula(&["check", "--objective", "NaN", "--constraint", "1", "--rhs", "1"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Non-finite coefficient"));
}
