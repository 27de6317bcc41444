use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

struct Env {
    dir: tempfile::TempDir,
}

impl Env {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn data_file(&self) -> PathBuf {
        self.dir.path().join("transactions.csv")
    }

    fn config_dir(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("tally").unwrap();
        cmd.env("TALLY_FILE", self.data_file())
            .env("TALLY_CONFIG_DIR", self.config_dir())
            .env_remove("RUST_LOG");
        cmd
    }

    fn add(&self, name: &str, category: &str, date: &str, kind: &str, amount: &str) {
        self.cmd()
            .args(["add", name, "--category", category, "--date", date, "--kind", kind, "--amount", amount])
            .assert()
            .success();
    }

    fn seed(&self) {
        self.add("Groceries", "Food", "2025-01-01", "expense", "100");
        self.add("January salary", "Salary", "2025-01-02", "income", "200");
        self.add("Bus fare", "Transport", "2025-01-15", "expense", "50");
        self.add("February salary", "Salary", "2025-02-01", "income", "150");
    }
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn test_add_persists_rows_with_header() {
    let env = Env::new();
    env.cmd()
        .args([
            "add", "Groceries", "--category", "Food", "--date", "2025-01-01", "--kind", "expense", "--amount",
            "100", "--essential", "yes",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added transaction 1"));

    let content = read(&env.data_file());
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            "id,transaction_name,transaction_category,date,income_expense,amount,essential",
            "1,Groceries,Food,2025-01-01,expense,100.0,yes",
        ]
    );
}

#[test]
fn test_add_rejects_invalid_amount() {
    let env = Env::new();
    env.cmd()
        .args(["add", "Bad", "--category", "Food", "--date", "2025-01-01", "--kind", "expense", "--amount", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));
    assert!(!env.data_file().exists());
}

#[test]
fn test_add_rejects_unknown_kind() {
    let env = Env::new();
    env.cmd()
        .args(["add", "Rent", "--category", "Housing", "--date", "2025-01-05", "--kind", "expnse", "--amount", "900"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid kind"));
    assert!(!env.data_file().exists());
}

#[test]
fn test_list_filters_by_category() {
    let env = Env::new();
    env.seed();
    env.cmd()
        .args(["list", "--category", "salary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Transactions (2)"))
        .stdout(predicate::str::contains("January salary"))
        .stdout(predicate::str::contains("Groceries").not());
}

#[test]
fn test_update_and_delete() {
    let env = Env::new();
    env.seed();
    env.cmd()
        .args([
            "update", "1", "Big shop", "--category", "Food", "--date", "2025-01-03", "--kind", "expense", "--amount",
            "120.5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated transaction 1"));
    assert!(read(&env.data_file()).contains("1,Big shop,Food,2025-01-03,expense,120.5,no"));

    env.cmd()
        .args(["delete", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted transaction 2"));
    assert!(!read(&env.data_file()).contains("January salary"));
}

#[test]
fn test_update_unknown_id_fails() {
    let env = Env::new();
    env.seed();
    let before = read(&env.data_file());
    env.cmd()
        .args([
            "update", "99", "Ghost", "--category", "Food", "--date", "2025-01-03", "--kind", "expense", "--amount", "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Transaction not found: 99"));
    assert_eq!(read(&env.data_file()), before);
}

#[test]
fn test_delete_unknown_id_is_noop() {
    let env = Env::new();
    env.seed();
    let before = read(&env.data_file());
    env.cmd()
        .args(["delete", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transaction with ID 42"));
    assert_eq!(read(&env.data_file()), before);
}

#[test]
fn test_reports_prints_fixed_order() {
    let env = Env::new();
    env.seed();
    let expected = "Total Income: $350.00\n\
                    Total Expenses: $150.00\n\
                    Net Balance: $200.00\n\
                    \n\
                    Monthly Summary:\n\
                    2025-01: Income = $200.00, Expenses = $150.00\n\
                    2025-02: Income = $150.00, Expenses = $0.00\n\
                    \n\
                    Top Expenses:\n\
                    2025-01-01 - Groceries - $100.00\n\
                    2025-01-15 - Bus fare - $50.00\n";
    env.cmd().arg("reports").assert().success().stdout(expected);
}

#[test]
fn test_reports_respects_top_n() {
    let env = Env::new();
    env.seed();
    env.cmd()
        .args(["reports", "-n", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("Bus fare").not());
}

#[test]
fn test_export_categories() {
    let env = Env::new();
    env.seed();
    let out = env.dir.path().join("categories.csv");
    env.cmd()
        .args(["export", "categories", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));
    let lines: Vec<String> = read(&out).lines().map(String::from).collect();
    assert_eq!(lines, vec!["Key,Value", "Food,100", "Salary,350", "Transport,50"]);
}

#[test]
fn test_malformed_rows_are_skipped_and_counted() {
    let env = Env::new();
    std::fs::write(
        env.data_file(),
        "id,transaction_name,transaction_category,date,income_expense,amount,essential\n\
         1,Groceries,Food,2025-01-01,expense,100.0,yes\n\
         2,Broken,Food,2025-01-02,expense,abc,no\n",
    )
    .unwrap();
    env.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Transactions: 1"))
        .stdout(predicate::str::contains("Skipped rows: 1"));
    env.cmd()
        .arg("reports")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Expenses: $100.00"));
}

#[test]
fn test_init_records_data_file_in_settings() {
    let env = Env::new();
    let target = env.dir.path().join("books").join("money.csv");
    env.cmd()
        .arg("init")
        .arg("--data-file")
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));
    assert!(target.exists());
    let settings = read(&env.config_dir().join("settings.json"));
    assert!(settings.contains("money.csv"), "got: {settings}");
}
