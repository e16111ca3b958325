use std::process::Output;

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;

const BOARD: &str = include_str!("fixtures/board.kicad_sch");

fn kivar(dir: &TempDir, args: &[&str]) -> Output {
    Command::cargo_bin("kivar")
        .unwrap()
        .current_dir(dir.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn sandbox() -> TempDir {
    let dir = TempDir::new().unwrap();
    dir.child("board.kicad_sch").write_str(BOARD).unwrap();
    dir
}

#[test]
fn list_shows_variants() {
    let dir = sandbox();
    let output = kivar(&dir, &["list", "board.kicad_sch"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("Lite"));
    assert!(out.contains("Rev2"));
    assert!(out.find("Lite").unwrap() < out.find("Rev2").unwrap());
}

#[test]
fn list_reports_empty_catalog() {
    let dir = TempDir::new().unwrap();
    dir.child("plain.kicad_sch")
        .write_str("(kicad_sch (version 20231120) (lib_symbols))\n")
        .unwrap();
    let output = kivar(&dir, &["list", "plain.kicad_sch"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No variants found"));
}

#[test]
fn apply_writes_resolved_file() {
    let dir = sandbox();
    let output = kivar(&dir, &["apply", "board.kicad_sch", "--variant", "Lite"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("R1 : Marked as DNF"));
    assert!(out.contains("R2 : Replace 1k with 1k2"));
    assert!(!out.contains("R3 :"));
    assert!(out.contains("Updating file"));

    let written = std::fs::read_to_string(dir.child("board.kicad_sch").path()).unwrap();
    assert_ne!(written, BOARD);
    assert!(written.contains("(in_bom no)\n    (on_board yes)\n    (dnp yes)"));
    assert_eq!(written.matches("(property \"Reference\" \"R3\"").count(), 2);
}

#[test]
fn apply_to_output_leaves_input_alone() {
    let dir = sandbox();
    let output = kivar(
        &dir,
        &["apply", "board.kicad_sch", "--variant", "Lite", "--output", "lite.kicad_sch"],
    );
    assert!(output.status.success(), "{}", stderr(&output));

    dir.child("board.kicad_sch").assert(BOARD);
    let lite = std::fs::read_to_string(dir.child("lite.kicad_sch").path()).unwrap();
    assert!(lite.contains("(dnp yes)"));
}

#[test]
fn failed_run_leaves_file_untouched() {
    let dir = sandbox();
    let output = kivar(&dir, &["apply", "board.kicad_sch", "--variant", "Rev2"]);
    assert!(!output.status.success());

    assert!(stdout(&output).contains("R2 : Variant value not found -> 4k7"));
    assert!(stderr(&output).contains("Errors present - file not updated"));
    dir.child("board.kicad_sch").assert(BOARD);
}

#[test]
fn dry_run_does_not_write() {
    let dir = sandbox();
    let output = kivar(
        &dir,
        &["apply", "board.kicad_sch", "--variant", "Lite", "--dry-run"],
    );
    assert!(output.status.success());
    assert!(stdout(&output).contains("Dry run"));
    dir.child("board.kicad_sch").assert(BOARD);
}

#[test]
fn verbose_lists_untouched_symbols() {
    let dir = sandbox();
    let output = kivar(
        &dir,
        &["apply", "board.kicad_sch", "--variant", "Lite", "--dry-run", "--verbose"],
    );
    assert!(stdout(&output).contains("R3 : Not part of variant"));
}

#[test]
fn unknown_variant_is_an_error() {
    let dir = sandbox();
    let output = kivar(&dir, &["apply", "board.kicad_sch", "--variant", "Full"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unknown variant 'Full' (available: Lite, Rev2)"));
    dir.child("board.kicad_sch").assert(BOARD);
}

#[test]
fn missing_variant_without_terminal_is_an_error() {
    let dir = sandbox();
    let output = kivar(&dir, &["apply", "board.kicad_sch"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("pass --variant"));
}

#[test]
fn adjacent_config_changes_marker() {
    let dir = TempDir::new().unwrap();
    dir.child("board.kicad_sch")
        .write_str(&BOARD.replace("Variant_", "Option:"))
        .unwrap();
    dir.child("kivar.toml").write_str("marker = \"Option:\"\n").unwrap();

    let output = kivar(&dir, &["list", "board.kicad_sch"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Lite"));
}
