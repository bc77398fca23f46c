use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn moneta_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("moneta"))
}

fn run_ok(home: &tempfile::TempDir, args: &[&str]) {
    let mut cmd = moneta_cmd();
    cmd.env("MONETA_HOME", home.path());
    cmd.args(args);
    cmd.assert().success();
}

fn run_ok_out(home: &tempfile::TempDir, args: &[&str]) -> String {
    let mut cmd = moneta_cmd();
    cmd.env("MONETA_HOME", home.path());
    cmd.args(args);
    let out = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(out).expect("utf8 stdout")
}

fn spend(home: &tempfile::TempDir, description: &str, amount: &str, category: &str, date: &str) {
    run_ok(
        home,
        &[
            "tx",
            "add",
            description,
            amount,
            "expense",
            "--account",
            "Checking",
            "--category",
            category,
            "--date",
            date,
        ],
    );
}

#[test]
fn budget_report_recomputes_spent_and_progress_for_the_month() {
    let home = tempfile::tempdir().expect("tempdir");

    run_ok(
        &home,
        &["account", "add", "Checking", "--opening-balance", "1000000"],
    );
    run_ok(&home, &["category", "add", "Groceries", "expense"]);
    run_ok(
        &home,
        &["budget", "set", "Groceries", "500000", "--month", "2026-02"],
    );

    spend(&home, "Weekly shop", "120000", "Groceries", "2026-02-05T09:00:00Z");
    spend(&home, "Restock", "90000", "Groceries", "2026-02-20T18:30:00Z");
    // Outside the budget month; must not count.
    spend(&home, "March shop", "50000", "Groceries", "2026-03-02T10:00:00Z");

    let report = run_ok_out(&home, &["budget", "report", "--month", "2026-02"]);
    assert!(report.contains("month\tcategory\tbudget\tspent\tremaining\tprogress"));
    assert!(
        report.contains("2026-02\tGroceries\t500000\t210000\t290000\t0.42"),
        "report: {report}"
    );

    // The budget was set for February only.
    let march = run_ok_out(&home, &["budget", "report", "--month", "2026-03"]);
    assert!(march.contains("(no budgets)"));
}

#[test]
fn spent_only_counts_the_budget_category() {
    let home = tempfile::tempdir().expect("tempdir");

    run_ok(
        &home,
        &["account", "add", "Checking", "--opening-balance", "1000000"],
    );
    run_ok(&home, &["category", "add", "Groceries", "expense"]);
    run_ok(&home, &["category", "add", "Transport", "expense"]);
    run_ok(
        &home,
        &["budget", "set", "Groceries", "500000", "--month", "2026-02"],
    );

    spend(&home, "Weekly shop", "210000", "Groceries", "2026-02-05T09:00:00Z");
    spend(&home, "Bus pass", "30000", "Transport", "2026-02-06T09:00:00Z");

    let report = run_ok_out(&home, &["budget", "report", "--month", "2026-02"]);
    assert!(
        report.contains("2026-02\tGroceries\t500000\t210000\t290000\t0.42"),
        "report: {report}"
    );
}

#[test]
fn budget_set_overwrites_the_same_category_and_month() {
    let home = tempfile::tempdir().expect("tempdir");

    run_ok(&home, &["category", "add", "Groceries", "expense"]);
    run_ok(
        &home,
        &["budget", "set", "Groceries", "100", "--month", "2026-02"],
    );
    run_ok(
        &home,
        &["budget", "set", "Groceries", "250", "--month", "2026-02"],
    );

    let listing = run_ok_out(&home, &["budget", "list"]);
    assert!(listing.contains("250 USD"), "listing: {listing}");
    assert!(!listing.contains("100 USD"), "listing: {listing}");
}

#[test]
fn budget_remove_deletes_the_row_and_reports_missing_ones() {
    let home = tempfile::tempdir().expect("tempdir");

    run_ok(&home, &["category", "add", "Groceries", "expense"]);
    run_ok(
        &home,
        &["budget", "set", "Groceries", "100", "--month", "2026-02"],
    );
    run_ok(
        &home,
        &["budget", "remove", "Groceries", "--month", "2026-02"],
    );
    assert!(run_ok_out(&home, &["budget", "list"]).contains("(no budgets)"));

    let mut cmd = moneta_cmd();
    cmd.env("MONETA_HOME", home.path());
    cmd.args(["budget", "remove", "Groceries", "--month", "2026-02"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn bad_month_is_rejected() {
    let home = tempfile::tempdir().expect("tempdir");

    run_ok(&home, &["category", "add", "Groceries", "expense"]);

    let mut cmd = moneta_cmd();
    cmd.env("MONETA_HOME", home.path());
    cmd.args(["budget", "set", "Groceries", "100", "--month", "2026-13"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid month"));
}
