use std::{error::Error, fs};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli(home: &TempDir) -> Result<Command, Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("expenditure_cli")?;
    cmd.env("EXPENDITURE_MANAGER_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    Ok(cmd)
}

#[test]
fn help_lists_commands() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    cli(&home)?
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: expenditure_cli"))
        .stdout(predicate::str::contains("export [report.csv]"));
    Ok(())
}

#[test]
fn add_then_summary_and_list() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    cli(&home)?
        .args(["add", "2024-03-06", "Food", "Lunch", "Cafe", "12.50", "with team"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry added; day total RM12.50"));
    cli(&home)?
        .args(["add", "2024-03-04", "Transport", "Bus", "Rapid", "1500"])
        .assert()
        .success();
    assert!(home.path().join("MyExpenses_2024.json").exists());

    cli(&home)?
        .args(["summary", "2024-03-06"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wednesday, Week Number 9"))
        .stdout(predicate::str::contains("Day:   RM12.50"))
        .stdout(predicate::str::contains("Week:  RM1,512.50"))
        .stdout(predicate::str::contains("Month: RM1,512.50"));

    cli(&home)?
        .args(["list", "2024-03-06"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. [Food] Lunch -> Cafe  RM12.50  (with team)"))
        .stdout(predicate::str::contains("Total: RM12.50"));
    Ok(())
}

#[test]
fn remove_uses_one_based_numbers() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    for name in ["First", "Second"] {
        cli(&home)?
            .args(["add", "2024-05-01", "Misc", name, "Shop", "1"])
            .assert()
            .success();
    }
    cli(&home)?
        .args(["remove", "2024-05-01", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed `First`"));
    cli(&home)?
        .args(["remove", "2024-05-01", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid reference"));
    cli(&home)?
        .args(["list", "2024-05-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Second"))
        .stdout(predicate::str::contains("First").not());
    Ok(())
}

#[test]
fn export_writes_report_to_requested_path() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    let ledger = home.path().join("trip.json");
    let report = home.path().join("trip.csv");
    cli(&home)?
        .arg("--file")
        .arg(&ledger)
        .args(["add", "2024-03-05", "Food", "Lunch", "Cafe", "12.5"])
        .assert()
        .success();
    cli(&home)?
        .arg("--file")
        .arg(&ledger)
        .arg("export")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 entries"));
    assert_eq!(
        fs::read_to_string(&report)?,
        "Date,Category,Name,Recipient,Amount,Comment\n05-03-2024,Food,Lunch,Cafe,RM12.50,\n"
    );
    Ok(())
}

#[test]
fn malformed_ledger_fails_without_overwriting() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    let ledger = home.path().join("broken.json");
    fs::write(&ledger, "not json")?;
    cli(&home)?
        .arg("--file")
        .arg(&ledger)
        .args(["add", "2024-03-05", "Food", "Lunch", "Cafe", "12.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed ledger"));
    assert_eq!(fs::read_to_string(&ledger)?, "not json");
    Ok(())
}

#[test]
fn bad_arguments_print_usage() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    cli(&home)?
        .args(["add", "2024-03-05", "Food"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing <name>"))
        .stderr(predicate::str::contains("Usage:"));
    Ok(())
}

#[test]
fn amounts_past_the_decimal_range_fail_cleanly() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    cli(&home)?
        .args(["add", "2024-03-05", "Misc", "Huge", "Shop", "79228162514264337593543950335"])
        .assert()
        .success();
    cli(&home)?
        .args(["add", "2024-03-05", "Misc", "One", "Shop", "1"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid input"))
        .stderr(predicate::str::contains("panicked").not());
    cli(&home)?
        .args(["list", "2024-03-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Huge"))
        .stdout(predicate::str::contains("One").not());
    Ok(())
}
