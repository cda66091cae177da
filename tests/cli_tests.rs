use assert_cmd::Command;
use predicates::str::contains as str_contains;
use std::fs;
use tempfile::NamedTempFile;

const CATALOG_CSV: &str = "Class,Term,Credits\nA,F,18\nB,F,4\n";

fn catalog_file() -> NamedTempFile {
    let file = NamedTempFile::new().expect("create temp file");
    fs::write(file.path(), CATALOG_CSV).expect("write catalog");
    file
}

#[allow(deprecated)]
fn planner_cmd() -> Command {
    let mut cmd = Command::cargo_bin("planner").expect("planner binary");
    cmd.env_remove("RUST_LOG").env("PLANNER_START_YEAR", "22");
    cmd
}

fn run_cli(script: &str) -> assert_cmd::assert::Assert {
    planner_cmd().write_stdin(script.to_string()).assert()
}

#[test]
fn cli_add_and_build_places_courses() {
    run_cli("add F 18 A\nadd F 4 B\nbuild\nquit\n")
        .success()
        .stdout(str_contains("Course added."))
        .stdout(str_contains("Year 22"))
        .stdout(str_contains("  Fall (18 credits): A (18)"))
        .stdout(str_contains("  Fall (4 credits): B (4)"));
}

#[test]
fn cli_reports_invalid_term() {
    run_cli("add Z 4 MATH 101\nquit\n")
        .success()
        .stdout(str_contains("course 'MATH 101' has invalid term 'Z'"));
}

#[test]
fn cli_remove_unknown_course() {
    run_cli("remove CS 999\nquit\n")
        .success()
        .stdout(str_contains("course 'CS 999' does not exist in the catalog"));
}

#[test]
fn cli_lookup_commands() {
    run_cli("add F,W 4 MATH 101\nterms MATH 101\ncredits MATH 101\ntotal\nexit\n")
        .success()
        .stdout(str_contains("MATH 101: F, W"))
        .stdout(str_contains("MATH 101: 4"))
        .stdout(str_contains("Total credits: 4"));
}

#[test]
fn cli_build_flag_renders_and_exits() {
    let catalog = catalog_file();
    planner_cmd()
        .arg(catalog.path())
        .arg("--build")
        .assert()
        .success()
        .stdout(str_contains("Warning: Total credits are less than 180 (22)"))
        .stdout(str_contains("Year 23"))
        .stdout(str_contains("courses=2, placed=2"));
}

#[test]
fn cli_build_flag_saves_csv() {
    let catalog = catalog_file();
    let out = NamedTempFile::new().unwrap();
    planner_cmd()
        .arg(catalog.path())
        .args(["--build", "--format", "csv", "--save"])
        .arg(out.path())
        .assert()
        .success()
        .stdout(str_contains("Schedule saved to"));

    let text = fs::read_to_string(out.path()).unwrap();
    assert!(text.starts_with("year,term,course,credits,limits_json"));
    assert!(text.contains("23,F,B,4,"));
}

#[test]
fn cli_save_and_load_json_round_trip() {
    let catalog = catalog_file();
    let tmp = NamedTempFile::new().expect("create temp file");
    let path = tmp.path().to_string_lossy().to_string();
    let script = format!("save json {path}\nremove A\nload json {path}\nquit\n");

    let assert = planner_cmd()
        .arg(catalog.path())
        .write_stdin(script)
        .assert()
        .success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("Schedule saved to"), "stdout: {output}");
    assert!(output.contains("| 22   | Fall | A      | 18      |"), "stdout: {output}");
}

#[test]
fn cli_rejects_three_digit_start_year() {
    planner_cmd()
        .args(["--start-year", "123", "--build"])
        .assert()
        .failure()
        .stderr(str_contains("start year 123 is not a two-digit year"));
}

#[test]
fn cli_unknown_command_hint() {
    run_cli("frobnicate\nquit\n")
        .success()
        .stdout(str_contains("Unknown command. Type 'help'."));
}
