use crate::config::AppPaths;
use crate::error::LedgerResult;
use crate::watch::{ChangeBus, Table};
use rusqlite::Connection;
use rusqlite::hooks::Action;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Owns the SQLite connection, the schema, and the transaction runner.
///
/// Every multi-statement write goes through [`Db::with_tx`]; the tables it
/// touches are recorded through the connection's update hook and published
/// to the change bus once the transaction commits. A rolled-back unit of
/// work publishes nothing.
pub struct Db {
    conn: Connection,
    touched: Arc<Mutex<HashSet<Table>>>,
    bus: ChangeBus,
}

impl Db {
    pub fn open(paths: &AppPaths) -> LedgerResult<(Self, PathBuf)> {
        fs::create_dir_all(&paths.data_dir)?;

        let db_path = paths.data_dir.join("moneta.sqlite3");
        let conn = Connection::open(&db_path)?;
        let db = Self::attach(conn)?;
        Ok((db, db_path))
    }

    #[cfg(test)]
    pub fn open_in_memory() -> LedgerResult<Self> {
        Self::attach(Connection::open_in_memory()?)
    }

    fn attach(conn: Connection) -> LedgerResult<Self> {
        let touched = Arc::new(Mutex::new(HashSet::new()));
        let hook_touched = Arc::clone(&touched);
        conn.update_hook(Some(
            move |_action: Action, _db: &str, table: &str, _rowid: i64| {
                if let Some(t) = Table::from_name(table) {
                    hook_touched.lock().expect("touched set poisoned").insert(t);
                }
            },
        ));

        let db = Self {
            conn,
            touched,
            bus: ChangeBus::new(),
        };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> LedgerResult<()> {
        self.conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS categories (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                icon TEXT,
                kind TEXT NOT NULL CHECK (kind IN ('income', 'expense')),
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS savings_goals (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                target_amount TEXT NOT NULL,
                saved_amount TEXT NOT NULL,
                target_date TEXT,
                icon TEXT,
                achieved INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );

            CREATE UNIQUE INDEX IF NOT EXISTS idx_goals_user_name
                ON savings_goals(user_id, name);

            CREATE TABLE IF NOT EXISTS accounts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                icon TEXT,
                balance TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE UNIQUE INDEX IF NOT EXISTS idx_accounts_user_name
                ON accounts(user_id, name);

            CREATE TABLE IF NOT EXISTS transactions (
                id TEXT PRIMARY KEY,
                description TEXT NOT NULL,
                amount TEXT NOT NULL,
                kind TEXT NOT NULL CHECK (kind IN ('income', 'expense')),
                occurred_at TEXT NOT NULL,
                account_id TEXT NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
                category_id TEXT REFERENCES categories(id) ON DELETE SET NULL,
                transfer_peer_id TEXT REFERENCES transactions(id) ON DELETE SET NULL,
                goal_id TEXT REFERENCES savings_goals(id) ON DELETE SET NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_transactions_account ON transactions(account_id);
            CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category_id);
            CREATE INDEX IF NOT EXISTS idx_transactions_occurred_at ON transactions(occurred_at);

            CREATE TABLE IF NOT EXISTS transaction_items (
                id TEXT PRIMARY KEY,
                transaction_id TEXT NOT NULL REFERENCES transactions(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                quantity INTEGER NOT NULL,
                price TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_items_transaction
                ON transaction_items(transaction_id);

            CREATE TABLE IF NOT EXISTS budgets (
                id TEXT PRIMARY KEY,
                category_id TEXT NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
                amount TEXT NOT NULL,
                month TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE UNIQUE INDEX IF NOT EXISTS idx_budgets_category_month
                ON budgets(category_id, month);
            "#,
        )?;
        Ok(())
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn bus(&self) -> &ChangeBus {
        &self.bus
    }

    /// Run `f` inside a single SQLite transaction. Commits on Ok and
    /// publishes the touched tables; rolls back on Err.
    pub fn with_tx<T>(
        &mut self,
        f: impl FnOnce(&rusqlite::Transaction<'_>) -> LedgerResult<T>,
    ) -> LedgerResult<T> {
        self.touched.lock().expect("touched set poisoned").clear();

        let tx = self.conn.transaction()?;
        match f(&tx) {
            Ok(value) => {
                tx.commit()?;
                let tables = std::mem::take(&mut *self.touched.lock().expect("touched set poisoned"));
                self.bus.publish(&tables);
                Ok(value)
            }
            Err(err) => {
                drop(tx);
                self.touched.lock().expect("touched set poisoned").clear();
                Err(err)
            }
        }
    }

    /// SQLite's data version counter; bumps whenever another connection
    /// commits a change to the same database file.
    pub fn data_version(&self) -> LedgerResult<i64> {
        let v = self
            .conn
            .query_row("PRAGMA data_version", [], |row| row.get(0))?;
        Ok(v)
    }
}
