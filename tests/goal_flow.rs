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

fn first_tx_id(home: &tempfile::TempDir) -> String {
    let out = run_ok_out(home, &["tx", "list"]);
    out.lines()
        .nth(1)
        .and_then(|line| line.split('\t').next())
        .expect("a transaction row")
        .to_string()
}

#[test]
fn goal_funding_expense_moves_progress_and_removal_reverses_it() {
    let home = tempfile::tempdir().expect("tempdir");

    run_ok(
        &home,
        &["account", "add", "Checking", "--opening-balance", "500000"],
    );
    run_ok(&home, &["goal", "create", "New Car", "300000"]);

    run_ok(
        &home,
        &[
            "tx",
            "add",
            "Car fund",
            "200000",
            "expense",
            "--account",
            "Checking",
            "--goal",
            "New Car",
        ],
    );

    let status = run_ok_out(&home, &["goal", "status", "New Car"]);
    assert!(status.contains("67%"), "status: {status}");
    assert!(status.contains("(200000 / 300000 USD)"), "status: {status}");
    assert!(status.contains("remaining\tUSD\t100000"), "status: {status}");
    assert!(status.contains("achieved\tno"), "status: {status}");

    let balance = run_ok_out(&home, &["balance", "Checking"]);
    assert!(balance.contains("Checking\tUSD\t300000"), "balance: {balance}");

    // Deleting the funding transaction reverses the goal progress too.
    let id = first_tx_id(&home);
    run_ok(&home, &["tx", "remove", &id]);

    let status = run_ok_out(&home, &["goal", "status", "New Car"]);
    assert!(status.contains("(0 / 300000 USD)"), "status: {status}");
    let balance = run_ok_out(&home, &["balance", "Checking"]);
    assert!(balance.contains("Checking\tUSD\t500000"), "balance: {balance}");
}

#[test]
fn reaching_the_target_flips_the_achieved_flag() {
    let home = tempfile::tempdir().expect("tempdir");

    run_ok(
        &home,
        &["account", "add", "Checking", "--opening-balance", "200000"],
    );
    run_ok(
        &home,
        &[
            "goal",
            "create",
            "Emergency fund",
            "100000",
            "--target-date",
            "2026-12-01",
        ],
    );

    run_ok(
        &home,
        &[
            "tx",
            "add",
            "Top up",
            "100000",
            "expense",
            "--account",
            "Checking",
            "--goal",
            "Emergency fund",
        ],
    );

    let status = run_ok_out(&home, &["goal", "status", "Emergency fund"]);
    assert!(status.contains("100%"), "status: {status}");
    assert!(status.contains("achieved\tyes"), "status: {status}");
    assert!(status.contains("target-date\t2026-12-01"), "status: {status}");

    let listing = run_ok_out(&home, &["goal", "list"]);
    assert!(listing.contains("name\ttarget\tsaved\tpercent\tachieved"));
    assert!(
        listing.contains("Emergency fund\t100000\t100000\t100\tyes"),
        "listing: {listing}"
    );
}

#[test]
fn income_cannot_fund_a_goal() {
    let home = tempfile::tempdir().expect("tempdir");

    run_ok(&home, &["account", "add", "Checking"]);
    run_ok(&home, &["goal", "create", "Trip", "500"]);

    let mut cmd = moneta_cmd();
    cmd.env("MONETA_HOME", home.path());
    cmd.args([
        "tx",
        "add",
        "Paycheck",
        "100",
        "income",
        "--account",
        "Checking",
        "--goal",
        "Trip",
    ]);
    cmd.assert().failure().stderr(predicate::str::contains(
        "Only expense transactions can fund a savings goal",
    ));
}

#[test]
fn goal_funding_does_not_touch_other_goals() {
    let home = tempfile::tempdir().expect("tempdir");

    run_ok(
        &home,
        &["account", "add", "Checking", "--opening-balance", "10000"],
    );
    run_ok(&home, &["goal", "create", "Trip", "5000"]);
    run_ok(&home, &["goal", "create", "Laptop", "8000"]);

    run_ok(
        &home,
        &[
            "tx", "add", "Stash", "2000", "expense", "--account", "Checking", "--goal", "Trip",
        ],
    );

    let trip = run_ok_out(&home, &["goal", "status", "Trip"]);
    assert!(trip.contains("(2000 / 5000 USD)"), "status: {trip}");
    let laptop = run_ok_out(&home, &["goal", "status", "Laptop"]);
    assert!(laptop.contains("(0 / 8000 USD)"), "status: {laptop}");
}
