mod cli;
mod config;
mod db;
mod domain;
mod error;
mod repo;
mod service;
mod watch;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDate, Utc};
use clap::Parser;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::HashMap;
use std::time::Duration;
use uuid::Uuid;

use crate::cli::{
    AccountCmd, BalanceArgs, BudgetCmd, CategoryCmd, Cli, Command, ConfigCmd, GoalCmd, ProfileCmd,
    SessionCmd, TxCmd, WatchArgs,
};
use crate::config::{AppConfig, Theme, app_paths, load_or_init_config, now_utc, write_config};
use crate::domain::{current_month, parse_item_spec};
use crate::service::{Ledger, NewLineItem, NewTransaction, TransactionFilter, TransactionPatch};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = app_paths(cli.home.clone())?;
    let (mut cfg, cfg_path) = load_or_init_config(&paths)?;

    match cli.command {
        Command::Session(args) => handle_session(args.cmd, &mut cfg, &cfg_path),
        Command::Config(args) => handle_config(args.cmd, &mut cfg, &cfg_path),
        Command::Profile(args) => handle_profile(args.cmd, &paths, &mut cfg, &cfg_path),
        cmd => {
            let (mut ledger, _db_path) = Ledger::open(&paths)?;
            let user = ledger.ensure_user(&cfg.active_profile)?;

            match cmd {
                Command::Account(args) => handle_account(args.cmd, &mut ledger, &cfg, user.id),
                Command::Category(args) => handle_category(args.cmd, &mut ledger),
                Command::Tx(args) => handle_tx(args.cmd, &mut ledger, &cfg, user.id),
                Command::Balance(args) => handle_balance(args, &ledger, &cfg, user.id),
                Command::Budget(args) => handle_budget(args.cmd, &mut ledger, &cfg),
                Command::Goal(args) => handle_goal(args.cmd, &mut ledger, &cfg, user.id),
                Command::Watch(args) => handle_watch(args, &ledger, &cfg, user.id),
                Command::Profile(_) | Command::Session(_) | Command::Config(_) => unreachable!(),
            }
        }
    }
}

fn handle_account(
    cmd: AccountCmd,
    ledger: &mut Ledger,
    cfg: &AppConfig,
    user_id: Uuid,
) -> Result<()> {
    match cmd {
        AccountCmd::Add {
            name,
            icon,
            opening_balance,
        } => {
            let opening = parse_decimal(opening_balance, "opening balance")?;
            let account = ledger.create_account(user_id, &name, icon, opening)?;
            println!(
                "Created account '{}' with balance {} {}.",
                account.name, account.balance, cfg.currency
            );
            Ok(())
        }
        AccountCmd::List => {
            let accounts = ledger.accounts(user_id)?;
            if accounts.is_empty() {
                println!("(no accounts)");
                return Ok(());
            }

            let mut rows = Vec::new();
            for a in accounts {
                rows.push(vec![
                    a.name,
                    format!("{} {}", a.balance, cfg.currency),
                    a.icon.unwrap_or_else(|| "-".to_string()),
                    a.created_at.to_rfc3339(),
                ]);
            }
            print_table(&["NAME", "BALANCE", "ICON", "CREATED"], &rows);
            Ok(())
        }
        AccountCmd::Remove { name } => {
            let account = ledger.remove_account(user_id, &name)?;
            println!(
                "Removed account '{}' and its transactions.",
                account.name
            );
            Ok(())
        }
    }
}

fn handle_category(cmd: CategoryCmd, ledger: &mut Ledger) -> Result<()> {
    match cmd {
        CategoryCmd::Add { name, kind, icon } => {
            let category = ledger.create_category(&name, kind.into(), icon)?;
            println!("Created {} category '{}'.", category.kind, category.name);
            Ok(())
        }
        CategoryCmd::List => {
            let categories = ledger.categories()?;
            if categories.is_empty() {
                println!("(no categories)");
                return Ok(());
            }

            let mut rows = Vec::new();
            for c in categories {
                rows.push(vec![
                    c.name,
                    c.kind.to_string(),
                    c.icon.unwrap_or_else(|| "-".to_string()),
                ]);
            }
            print_table(&["NAME", "KIND", "ICON"], &rows);
            Ok(())
        }
        CategoryCmd::Remove { name } => {
            ledger.remove_category(&name)?;
            println!("Removed category '{name}'. Its transactions keep no category.");
            Ok(())
        }
    }
}

fn handle_tx(cmd: TxCmd, ledger: &mut Ledger, cfg: &AppConfig, user_id: Uuid) -> Result<()> {
    match cmd {
        TxCmd::Add {
            description,
            amount,
            kind,
            account,
            category,
            goal,
            date,
            items,
        } => {
            let account = ledger.account_by_name(user_id, &account)?;
            let category_id = match category {
                None => None,
                Some(name) => Some(ledger.category_by_name(&name)?.id),
            };
            let goal_id = match goal {
                None => None,
                Some(name) => Some(ledger.goal_by_name(user_id, &name)?.id),
            };
            let amount = parse_decimal(amount, "amount")?;
            let occurred_at = parse_rfc3339_or_now(date.as_deref())?;
            let items = parse_items(&items)?;

            let record = ledger.add_transaction(NewTransaction {
                description,
                amount,
                kind: kind.into(),
                occurred_at,
                account_id: account.id,
                category_id,
                goal_id,
                items,
            })?;
            println!(
                "Recorded {} {} {} on '{}' ({}).",
                record.kind, record.amount, cfg.currency, account.name, record.id
            );
            Ok(())
        }
        TxCmd::List {
            month,
            account,
            category,
            kind,
        } => {
            let filter = TransactionFilter {
                account_id: match account {
                    None => None,
                    Some(name) => Some(ledger.account_by_name(user_id, &name)?.id),
                },
                category_id: match category {
                    None => None,
                    Some(name) => Some(ledger.category_by_name(&name)?.id),
                },
                kind: kind.map(Into::into),
                month,
            };

            let txs = ledger.transactions(user_id, &filter)?;
            if txs.is_empty() {
                println!("(no transactions)");
                return Ok(());
            }

            let accounts: HashMap<Uuid, String> = ledger
                .accounts(user_id)?
                .into_iter()
                .map(|a| (a.id, a.name))
                .collect();
            let categories: HashMap<Uuid, String> = ledger
                .categories()?
                .into_iter()
                .map(|c| (c.id, c.name))
                .collect();

            println!("id\tdate\tkind\tamount\taccount\tcategory\tdescription");
            for t in txs {
                let account = accounts
                    .get(&t.account_id)
                    .map(String::as_str)
                    .unwrap_or("?");
                let category = t
                    .category_id
                    .and_then(|id| categories.get(&id))
                    .map(String::as_str)
                    .unwrap_or("-");
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    t.id,
                    t.occurred_at.to_rfc3339(),
                    t.kind,
                    t.amount,
                    account,
                    category,
                    t.description
                );
            }
            Ok(())
        }
        TxCmd::Show { id } => {
            let id = parse_uuid_arg(&id)?;
            let t = ledger.transaction(id)?;

            let accounts: HashMap<Uuid, String> = ledger
                .accounts(user_id)?
                .into_iter()
                .map(|a| (a.id, a.name))
                .collect();
            let categories: HashMap<Uuid, String> = ledger
                .categories()?
                .into_iter()
                .map(|c| (c.id, c.name))
                .collect();
            let goals: HashMap<Uuid, String> = ledger
                .goals(user_id)?
                .into_iter()
                .map(|g| (g.id, g.name))
                .collect();

            println!("id\t{}", t.id);
            println!("date\t{}", t.occurred_at.to_rfc3339());
            println!("kind\t{}", t.kind);
            println!("amount\t{} {}", t.amount, cfg.currency);
            println!(
                "account\t{}",
                accounts.get(&t.account_id).map(String::as_str).unwrap_or("?")
            );
            println!(
                "category\t{}",
                t.category_id
                    .and_then(|cid| categories.get(&cid))
                    .map(String::as_str)
                    .unwrap_or("-")
            );
            println!(
                "goal\t{}",
                t.goal_id
                    .and_then(|gid| goals.get(&gid))
                    .map(String::as_str)
                    .unwrap_or("-")
            );
            if let Some(peer) = t.transfer_peer_id {
                println!("transfer-peer\t{peer}");
            }
            println!("description\t{}", t.description);

            let items = ledger.items(t.id)?;
            if !items.is_empty() {
                let mut rows = Vec::new();
                for item in items {
                    rows.push(vec![
                        item.name,
                        item.quantity.to_string(),
                        item.price.to_string(),
                    ]);
                }
                print_table(&["ITEM", "QTY", "PRICE"], &rows);
            }
            Ok(())
        }
        TxCmd::Edit {
            id,
            description,
            amount,
            kind,
            date,
            account,
            category,
            clear_category,
            goal,
            clear_goal,
            items,
            clear_items,
        } => {
            let id = parse_uuid_arg(&id)?;

            let amount = match amount {
                None => None,
                Some(raw) => Some(parse_decimal(raw, "amount")?),
            };
            let occurred_at = match date {
                None => None,
                Some(raw) => Some(parse_rfc3339_or_now(Some(raw.as_str()))?),
            };
            let account_id = match account {
                None => None,
                Some(name) => Some(ledger.account_by_name(user_id, &name)?.id),
            };
            let category_id = if clear_category {
                Some(None)
            } else {
                match category {
                    None => None,
                    Some(name) => Some(Some(ledger.category_by_name(&name)?.id)),
                }
            };
            let goal_id = if clear_goal {
                Some(None)
            } else {
                match goal {
                    None => None,
                    Some(name) => Some(Some(ledger.goal_by_name(user_id, &name)?.id)),
                }
            };
            let items = if clear_items {
                Some(Vec::new())
            } else if items.is_empty() {
                None
            } else {
                Some(parse_items(&items)?)
            };

            let updated = ledger.update_transaction(
                id,
                TransactionPatch {
                    description,
                    amount,
                    kind: kind.map(Into::into),
                    occurred_at,
                    account_id,
                    category_id,
                    goal_id,
                    items,
                },
            )?;
            println!("Updated transaction {}.", updated.id);
            Ok(())
        }
        TxCmd::Remove { id } => {
            let id = parse_uuid_arg(&id)?;
            let removed = ledger.delete_transaction(id)?;
            println!(
                "Deleted transaction {} and reversed its balance effect.",
                removed.id
            );
            Ok(())
        }
        TxCmd::Transfer {
            amount,
            from,
            to,
            description,
            date,
        } => {
            let from_account = ledger.account_by_name(user_id, &from)?;
            let to_account = ledger.account_by_name(user_id, &to)?;
            let amount = parse_decimal(amount, "amount")?;
            let occurred_at = parse_rfc3339_or_now(date.as_deref())?;
            let description = description.unwrap_or_else(|| "transfer".to_string());

            let (out_leg, in_leg) = ledger.transfer(
                from_account.id,
                to_account.id,
                amount,
                description,
                occurred_at,
            )?;
            println!(
                "Transferred {} {} from '{}' to '{}' ({} / {}).",
                amount, cfg.currency, from_account.name, to_account.name, out_leg.id, in_leg.id
            );
            Ok(())
        }
    }
}

fn handle_balance(
    args: BalanceArgs,
    ledger: &Ledger,
    cfg: &AppConfig,
    user_id: Uuid,
) -> Result<()> {
    match args.account {
        Some(name) => {
            let account = ledger.account_by_name(user_id, &name)?;
            println!("{}\t{}\t{}", account.name, cfg.currency, account.balance);
        }
        None => {
            let accounts = ledger.accounts(user_id)?;
            if accounts.is_empty() {
                println!("(no accounts)");
                return Ok(());
            }
            for account in accounts {
                println!("{}\t{}\t{}", account.name, cfg.currency, account.balance);
            }
        }
    }
    Ok(())
}

fn handle_budget(cmd: BudgetCmd, ledger: &mut Ledger, cfg: &AppConfig) -> Result<()> {
    match cmd {
        BudgetCmd::Set {
            category,
            amount,
            month,
        } => {
            let category = ledger.category_by_name(&category)?;
            let amount = parse_decimal(amount, "amount")?;
            let budget = ledger.set_budget(category.id, amount, &month)?;
            println!(
                "Set budget for '{}' {} {} in {}.",
                category.name, budget.amount, cfg.currency, budget.month
            );
            Ok(())
        }
        BudgetCmd::List => {
            let budgets = ledger.budgets()?;
            if budgets.is_empty() {
                println!("(no budgets)");
                return Ok(());
            }

            let mut rows = Vec::new();
            for (budget, category_name) in budgets {
                rows.push(vec![
                    budget.month,
                    category_name,
                    format!("{} {}", budget.amount, cfg.currency),
                ]);
            }
            print_table(&["MONTH", "CATEGORY", "AMOUNT"], &rows);
            Ok(())
        }
        BudgetCmd::Report { month } => {
            let month = month.unwrap_or_else(|| current_month(now_utc()));
            let rows = ledger.budget_report(&month)?;
            if rows.is_empty() {
                println!("(no budgets)");
                return Ok(());
            }

            println!("month\tcategory\tbudget\tspent\tremaining\tprogress");
            for row in rows {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    month, row.category_name, row.budget.amount, row.spent, row.remaining,
                    row.progress
                );
            }
            Ok(())
        }
        BudgetCmd::Remove { category, month } => {
            let category = ledger.category_by_name(&category)?;
            ledger.remove_budget(category.id, &month)?;
            println!("Removed budget for '{}' in {month}.", category.name);
            Ok(())
        }
    }
}

fn handle_goal(cmd: GoalCmd, ledger: &mut Ledger, cfg: &AppConfig, user_id: Uuid) -> Result<()> {
    match cmd {
        GoalCmd::Create {
            name,
            target,
            target_date,
            icon,
        } => {
            let target = parse_decimal(target, "target")?;
            let target_date = match target_date {
                None => None,
                Some(raw) => Some(parse_naive_date(&raw)?),
            };
            let goal = ledger.create_goal(user_id, &name, target, target_date, icon)?;
            println!(
                "Created goal '{}' target {} {}.",
                goal.name, goal.target_amount, cfg.currency
            );
            Ok(())
        }
        GoalCmd::List => {
            let goals = ledger.goals(user_id)?;
            if goals.is_empty() {
                println!("(no goals)");
                return Ok(());
            }

            println!("name\ttarget\tsaved\tpercent\tachieved");
            for g in goals {
                let saved_capped = g.saved_amount.min(g.target_amount);
                let percent = if g.target_amount > Decimal::ZERO {
                    (saved_capped / g.target_amount) * Decimal::from(100u32)
                } else {
                    Decimal::ZERO
                };
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    g.name,
                    g.target_amount,
                    g.saved_amount,
                    percent.round_dp(2),
                    if g.achieved { "yes" } else { "no" }
                );
            }
            Ok(())
        }
        GoalCmd::Status { name } => {
            let goal = ledger.goal_by_name(user_id, &name)?;

            let saved_capped = goal.saved_amount.min(goal.target_amount);
            let percent_f = if goal.target_amount > Decimal::ZERO {
                (saved_capped / goal.target_amount) * Decimal::from(100u32)
            } else {
                Decimal::ZERO
            };
            let percent_i = percent_f.round_dp(0).to_i32().unwrap_or(0).clamp(0, 100);

            let bar_len = 10usize;
            let filled = ((percent_i as usize) * bar_len) / 100;
            let empty = bar_len.saturating_sub(filled);
            let bar = format!("[{}{}]", "=".repeat(filled), "-".repeat(empty));

            let remaining = (goal.target_amount - goal.saved_amount).max(Decimal::ZERO);
            println!(
                "{} {}% ({} / {} {})",
                bar, percent_i, goal.saved_amount, goal.target_amount, cfg.currency
            );
            println!("remaining\t{}\t{}", cfg.currency, remaining);
            if let Some(date) = goal.target_date {
                println!("target-date\t{}", date.format("%Y-%m-%d"));
            }
            println!("achieved\t{}", if goal.achieved { "yes" } else { "no" });
            Ok(())
        }
        GoalCmd::Remove { name } => {
            let goal = ledger.remove_goal(user_id, &name)?;
            println!("Removed goal '{}'.", goal.name);
            Ok(())
        }
    }
}

fn handle_profile(
    cmd: ProfileCmd,
    paths: &crate::config::AppPaths,
    cfg: &mut AppConfig,
    cfg_path: &std::path::Path,
) -> Result<()> {
    match cmd {
        ProfileCmd::Check => {
            println!("You are currently on profile: {}", cfg.active_profile);
        }
        ProfileCmd::Add { name } => {
            let (mut ledger, _) = Ledger::open(paths)?;
            ledger.create_user(&name)?;
            println!("Added profile: {name}");
        }
        ProfileCmd::Checkout { name } => {
            let (mut ledger, _) = Ledger::open(paths)?;
            ledger.ensure_user(&name)?;
            cfg.active_profile = name.clone();
            write_config(cfg_path, cfg)?;
            println!("Checked out profile: {name}");
        }
        ProfileCmd::List => {
            let (mut ledger, _) = Ledger::open(paths)?;
            ledger.ensure_user(&cfg.active_profile)?;
            for user in ledger.users()? {
                if user.name == cfg.active_profile {
                    println!("{} (active)", user.name);
                } else {
                    println!("{}", user.name);
                }
            }
        }
        ProfileCmd::Remove { name } => {
            let (mut ledger, _) = Ledger::open(paths)?;
            ledger.remove_user(&name)?;
            if cfg.active_profile == name {
                cfg.active_profile = "personal".to_string();
                write_config(cfg_path, cfg)?;
            }
            println!("Removed profile: {name}");
        }
    }
    Ok(())
}

fn handle_session(cmd: SessionCmd, cfg: &mut AppConfig, cfg_path: &std::path::Path) -> Result<()> {
    match cmd {
        SessionCmd::Set { token } => {
            cfg.session_token = Some(token);
            write_config(cfg_path, cfg)?;
            println!("Stored session token.");
        }
        SessionCmd::Clear => {
            cfg.session_token = None;
            write_config(cfg_path, cfg)?;
            println!("Cleared session token.");
        }
        SessionCmd::Show => match &cfg.session_token {
            Some(token) => println!("{token}"),
            None => println!("(no session)"),
        },
    }
    Ok(())
}

fn handle_config(cmd: ConfigCmd, cfg: &mut AppConfig, cfg_path: &std::path::Path) -> Result<()> {
    match cmd {
        ConfigCmd::Show => {
            println!("profile\t{}", cfg.active_profile);
            println!("currency\t{}", cfg.currency);
            println!("theme\t{}", cfg.theme);
            println!(
                "locale\t{}",
                cfg.locale.as_deref().unwrap_or("(unset)")
            );
            println!(
                "session\t{}",
                if cfg.session_token.is_some() {
                    "set"
                } else {
                    "(unset)"
                }
            );
            Ok(())
        }
        ConfigCmd::Set {
            theme,
            locale,
            currency,
        } => {
            if theme.is_none() && locale.is_none() && currency.is_none() {
                return Err(anyhow!(
                    "Nothing to set. Pass --theme, --locale or --currency."
                ));
            }

            if let Some(raw) = theme {
                cfg.theme = raw.parse::<Theme>()?;
            }
            if let Some(locale) = locale {
                cfg.locale = Some(locale);
            }
            if let Some(currency) = currency {
                cfg.currency = currency.to_ascii_uppercase();
            }
            write_config(cfg_path, cfg)?;
            println!("Updated config.");
            Ok(())
        }
    }
}

fn handle_watch(args: WatchArgs, ledger: &Ledger, cfg: &AppConfig, user_id: Uuid) -> Result<()> {
    let mut last = ledger.data_version()?;
    eprintln!(
        "Watching for changes every {}ms. Ctrl-C to stop.",
        args.interval_ms
    );

    loop {
        std::thread::sleep(Duration::from_millis(args.interval_ms));

        let version = ledger.data_version()?;
        if version == last {
            continue;
        }
        last = version;

        println!("changed\t{}", now_utc().to_rfc3339());
        for account in ledger.accounts(user_id)? {
            println!("{}\t{}\t{}", account.name, cfg.currency, account.balance);
        }

        if args.once {
            break;
        }
    }
    Ok(())
}

fn parse_decimal(raw: String, field: &'static str) -> Result<Decimal> {
    raw.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal for {field}: {raw}"))
}

fn parse_rfc3339_or_now(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        None => Ok(now_utc()),
        Some(s) => Ok(DateTime::parse_from_rfc3339(s)
            .with_context(|| format!("Invalid RFC3339 timestamp: {s}"))?
            .with_timezone(&Utc)),
    }
}

fn parse_naive_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("Invalid date (expected YYYY-MM-DD): {raw}"))
}

fn parse_uuid_arg(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).with_context(|| format!("Invalid transaction id: {raw}"))
}

fn parse_items(raw: &[String]) -> Result<Vec<NewLineItem>> {
    let mut items = Vec::new();
    for spec in raw {
        let (name, quantity, price) = parse_item_spec(spec)?;
        items.push(NewLineItem {
            name,
            quantity,
            price,
        });
    }
    Ok(items)
}

fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if headers.is_empty() {
        println!("(no columns)");
        return;
    }

    let cols = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();

    for row in rows {
        for (i, cell) in row.iter().take(cols).enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    fn print_row(cells: &[String], widths: &[usize]) {
        print!("|");
        for (i, w) in widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            print!(" {:width$} |", cell, width = *w);
        }
        println!();
    }

    fn print_sep(widths: &[usize]) {
        print!("|");
        for w in widths {
            print!("{}|", "-".repeat(w + 2));
        }
        println!();
    }

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    print_row(&header_cells, &widths);
    print_sep(&widths);
    for row in rows {
        print_row(row, &widths);
    }
}
