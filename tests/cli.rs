//! End-to-end tests for the `expenses` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn expenses(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("expenses").unwrap();
    cmd.env("EXPENSE_TRACKER_DATA_DIR", data_dir.path())
        .env_remove("EXPENSE_TRACKER_PASSWORD");
    cmd
}

/// Run `add` and return the short ID it printed
fn add(data_dir: &TempDir, args: &[&str]) -> String {
    let output = expenses(data_dir).arg("add").args(args).output().unwrap();
    assert!(output.status.success(), "add failed: {:?}", output);

    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("Added expense "))
        .unwrap()
        .trim()
        .to_string()
}

#[test]
fn init_creates_config() {
    let temp = TempDir::new().unwrap();
    expenses(&temp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized expense tracker"));

    assert!(temp.path().join("config.json").exists());
    assert!(temp.path().join("data").is_dir());
}

#[test]
fn add_and_list() {
    let temp = TempDir::new().unwrap();
    let id = add(&temp, &["12.50", "Lunch", "--date", "2025-03-19"]);
    assert!(id.starts_with("exp-"));

    expenses(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Lunch"))
        .stdout(predicate::str::contains("Food & Dining"))
        .stdout(predicate::str::contains("$12.50"));
}

#[test]
fn list_filters_by_category() {
    let temp = TempDir::new().unwrap();
    add(&temp, &["12.50", "Lunch"]);
    add(&temp, &["40", "Train", "-c", "travel"]);

    expenses(&temp)
        .args(["list", "-c", "travel"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Train"))
        .stdout(predicate::str::contains("Lunch").not());
}

#[test]
fn summary_windows() {
    let temp = TempDir::new().unwrap();
    add(&temp, &["12.50", "Lunch", "--date", "2025-03-19"]);
    add(&temp, &["40.00", "Train", "-c", "travel", "--date", "2025-03-11"]);

    expenses(&temp)
        .args(["summary", "--date", "2025-03-19"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"Today:\s+\$12\.50").unwrap())
        .stdout(predicate::str::is_match(r"This week:\s+\$12\.50").unwrap())
        .stdout(predicate::str::is_match(r"All time:\s+\$52\.50").unwrap())
        .stdout(predicate::str::contains("76.2%"));
}

#[test]
fn negative_amount_is_rejected() {
    let temp = TempDir::new().unwrap();
    expenses(&temp)
        .args(["add", "-5", "Refund"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));

    expenses(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found."));
}

#[test]
fn unknown_category_is_rejected() {
    let temp = TempDir::new().unwrap();
    expenses(&temp)
        .args(["add", "5", "Mystery", "-c", "gadgets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown category 'gadgets'"));
}

#[test]
fn delete_by_short_id() {
    let temp = TempDir::new().unwrap();
    let id = add(&temp, &["12.50", "Lunch"]);

    expenses(&temp)
        .args(["delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted expense"));

    expenses(&temp)
        .args(["delete", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expense not found"));
}

#[test]
fn export_json_to_stdout() {
    let temp = TempDir::new().unwrap();
    add(&temp, &["12.50", "Lunch"]);

    let output = expenses(&temp).args(["export", "json"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["metadata"]["expense_count"], 1);
    assert_eq!(value["expenses"][0]["amount"], 1250);
}

#[test]
fn export_csv_to_file() {
    let temp = TempDir::new().unwrap();
    add(&temp, &["12.50", "Lunch"]);
    let out = temp.path().join("out.csv");

    expenses(&temp)
        .args(["export", "csv", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 expense(s)"));

    let contents = std::fs::read_to_string(out).unwrap();
    assert!(contents.starts_with("ID,Date,Category,Description,Amount,Created At"));
    assert!(contents.contains("Lunch,12.50"));
}

#[test]
fn categories_lists_registry() {
    let temp = TempDir::new().unwrap();
    expenses(&temp)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("entertainment"))
        .stdout(predicate::str::contains("category-health"));
}

#[test]
fn auth_requires_database_backend() {
    let temp = TempDir::new().unwrap();
    expenses(&temp)
        .args(["auth", "signup", "alice", "--password", "hunter22"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("database backend"));
}

#[test]
fn database_backend_scopes_by_user() {
    let temp = TempDir::new().unwrap();
    let db = ["--backend", "database"];

    expenses(&temp)
        .args(db)
        .args(["add", "5", "Coffee"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not authenticated"));

    expenses(&temp)
        .args(db)
        .args(["auth", "signup", "alice", "--password", "hunter22"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as 'alice'"));
    expenses(&temp).args(db).args(["add", "5", "Coffee"]).assert().success();

    expenses(&temp)
        .args(db)
        .args(["auth", "signup", "bob", "--password", "swordfish"])
        .assert()
        .success();
    expenses(&temp)
        .args(db)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found."));

    expenses(&temp)
        .args(db)
        .args(["auth", "signin", "alice", "--password", "hunter22"])
        .assert()
        .success();
    expenses(&temp)
        .args(db)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Coffee"));
}

#[test]
fn sign_in_failures_look_the_same() {
    let temp = TempDir::new().unwrap();
    let db = ["--backend", "database"];

    expenses(&temp)
        .args(db)
        .args(["auth", "signup", "alice", "--password", "hunter22"])
        .assert()
        .success();
    expenses(&temp).args(db).args(["auth", "signout"]).assert().success();

    for (user, password) in [("alice", "wrong-pw"), ("mallory", "hunter22")] {
        expenses(&temp)
            .args(db)
            .args(["auth", "signin", user, "--password", password])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid username or password"));
    }

    expenses(&temp)
        .args(db)
        .args(["auth", "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in."));
}

#[test]
fn audit_records_changes() {
    let temp = TempDir::new().unwrap();
    let id = add(&temp, &["12.50", "Lunch"]);
    expenses(&temp).args(["delete", &id]).assert().success();

    expenses(&temp)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Expense"))
        .stdout(predicate::str::contains("DELETE Expense"));
}

#[test]
fn config_set_week_start() {
    let temp = TempDir::new().unwrap();
    expenses(&temp)
        .args(["config", "set", "week-start", "monday"])
        .assert()
        .success();

    expenses(&temp)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Week start:  monday"));
}
