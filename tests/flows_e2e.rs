use assert_cmd::prelude::*;
use std::path::Path;
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

fn db_path(moneta_home: &Path) -> std::path::PathBuf {
    moneta_home.join("data").join("moneta.sqlite3")
}

fn count(conn: &rusqlite::Connection, sql: &str) -> i64 {
    conn.query_row(sql, [], |row| row.get(0)).expect("count query")
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
fn profiles_keep_separate_accounts() {
    let home = tempfile::tempdir().expect("tempdir");

    run_ok(
        &home,
        &["account", "add", "Checking", "--opening-balance", "100"],
    );

    run_ok(&home, &["profile", "add", "work"]);
    run_ok(&home, &["profile", "checkout", "work"]);
    assert!(run_ok_out(&home, &["account", "list"]).contains("(no accounts)"));

    run_ok(
        &home,
        &["account", "add", "Biz", "--opening-balance", "9000"],
    );
    let balance = run_ok_out(&home, &["balance"]);
    assert!(balance.contains("Biz\tUSD\t9000"));
    assert!(!balance.contains("Checking"));

    let profiles = run_ok_out(&home, &["profile", "list"]);
    assert!(profiles.contains("work (active)"), "profiles: {profiles}");
    assert!(profiles.contains("personal"), "profiles: {profiles}");

    run_ok(&home, &["profile", "checkout", "personal"]);
    let balance = run_ok_out(&home, &["balance"]);
    assert!(balance.contains("Checking\tUSD\t100"));
    assert!(!balance.contains("Biz"));
}

#[test]
fn removing_a_category_nulls_references_and_keeps_the_transaction() {
    let home = tempfile::tempdir().expect("tempdir");

    run_ok(
        &home,
        &["account", "add", "Checking", "--opening-balance", "1000"],
    );
    run_ok(&home, &["category", "add", "Groceries", "expense"]);
    run_ok(
        &home,
        &[
            "tx",
            "add",
            "Market",
            "50",
            "expense",
            "--account",
            "Checking",
            "--category",
            "Groceries",
        ],
    );
    let id = first_tx_id(&home);

    run_ok(&home, &["category", "remove", "Groceries"]);

    let shown = run_ok_out(&home, &["tx", "show", &id]);
    assert!(shown.contains("category\t-"), "show: {shown}");

    // The schema's SET NULL did the nulling, not an application sweep.
    let conn = rusqlite::Connection::open(db_path(home.path())).expect("open sqlite");
    let nulled = count(
        &conn,
        "SELECT COUNT(*) FROM transactions WHERE category_id IS NULL",
    );
    assert_eq!(nulled, 1);
    // The balance effect of the transaction is untouched.
    assert!(run_ok_out(&home, &["balance", "Checking"]).contains("Checking\tUSD\t950"));
}

#[test]
fn removing_an_account_cascades_transactions_and_line_items() {
    let home = tempfile::tempdir().expect("tempdir");

    run_ok(
        &home,
        &["account", "add", "Checking", "--opening-balance", "1000"],
    );
    run_ok(
        &home,
        &[
            "tx",
            "add",
            "Market",
            "30",
            "expense",
            "--account",
            "Checking",
            "--item",
            "bread:2:10",
            "--item",
            "milk:1:10",
        ],
    );

    let conn = rusqlite::Connection::open(db_path(home.path())).expect("open sqlite");
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM transactions"), 1);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM transaction_items"), 2);
    drop(conn);

    run_ok(&home, &["account", "remove", "Checking"]);

    let conn = rusqlite::Connection::open(db_path(home.path())).expect("open sqlite");
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM accounts"), 0);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM transactions"), 0);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM transaction_items"), 0);
}

#[test]
fn removing_a_profile_cascades_its_data_and_resets_the_active_profile() {
    let home = tempfile::tempdir().expect("tempdir");

    run_ok(&home, &["profile", "checkout", "work"]);
    run_ok(
        &home,
        &["account", "add", "Biz", "--opening-balance", "100"],
    );
    run_ok(&home, &["goal", "create", "Trip", "500"]);

    run_ok(&home, &["profile", "remove", "work"]);

    let check = run_ok_out(&home, &["profile", "check"]);
    assert!(check.contains("personal"), "check: {check}");

    let conn = rusqlite::Connection::open(db_path(home.path())).expect("open sqlite");
    assert_eq!(
        count(&conn, "SELECT COUNT(*) FROM users WHERE name = 'work'"),
        0
    );
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM accounts"), 0);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM savings_goals"), 0);
}

#[test]
fn e2e_month_of_activity_keeps_every_ledger_in_agreement() {
    let home = tempfile::tempdir().expect("tempdir");

    let feb = "2026-02-10T12:00:00Z";

    run_ok(
        &home,
        &["account", "add", "Checking", "--opening-balance", "0"],
    );
    run_ok(&home, &["account", "add", "Savings"]);
    run_ok(&home, &["category", "add", "Salary", "income"]);
    run_ok(&home, &["category", "add", "Groceries", "expense"]);
    run_ok(
        &home,
        &["budget", "set", "Groceries", "400", "--month", "2026-02"],
    );
    run_ok(&home, &["goal", "create", "Vacation", "1000"]);

    // Income, spending, a stash transfer and a goal deposit.
    run_ok(
        &home,
        &[
            "tx", "add", "Paycheck", "3000", "income", "--account", "Checking", "--category",
            "Salary", "--date", feb,
        ],
    );
    run_ok(
        &home,
        &[
            "tx", "add", "Weekly shop", "150", "expense", "--account", "Checking", "--category",
            "Groceries", "--date", feb,
        ],
    );
    run_ok(
        &home,
        &[
            "tx", "transfer", "500", "--from", "Checking", "--to", "Savings", "--date", feb,
        ],
    );
    run_ok(
        &home,
        &[
            "tx", "add", "Vacation stash", "250", "expense", "--account", "Savings", "--goal",
            "Vacation", "--date", feb,
        ],
    );

    let balance = run_ok_out(&home, &["balance"]);
    assert!(balance.contains("Checking\tUSD\t2350"), "balance: {balance}");
    assert!(balance.contains("Savings\tUSD\t250"), "balance: {balance}");

    let report = run_ok_out(&home, &["budget", "report", "--month", "2026-02"]);
    assert!(
        report.contains("2026-02\tGroceries\t400\t150\t250\t0.38"),
        "report: {report}"
    );

    let goal = run_ok_out(&home, &["goal", "status", "Vacation"]);
    assert!(goal.contains("(250 / 1000 USD)"), "goal: {goal}");

    // Stored balances match a recomputation from the persisted rows.
    let conn = rusqlite::Connection::open(db_path(home.path())).expect("open sqlite");
    let mut stmt = conn
        .prepare(
            "SELECT a.name, a.balance,
                    IFNULL(SUM(CASE WHEN t.kind = 'income' THEN CAST(t.amount AS REAL)
                                    ELSE -CAST(t.amount AS REAL) END), 0)
             FROM accounts a LEFT JOIN transactions t ON t.account_id = a.id
             GROUP BY a.id",
        )
        .expect("prepare");
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
            ))
        })
        .expect("query");
    for row in rows {
        let (name, stored, recomputed) = row.expect("row");
        let stored: f64 = stored.parse().expect("stored balance");
        assert!(
            (stored - recomputed).abs() < 1e-6,
            "account {name}: stored {stored} != recomputed {recomputed}"
        );
    }
}
