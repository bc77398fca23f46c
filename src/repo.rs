//! SQL repositories, one module per table.
//!
//! Repositories stay free of business rules: they map rows and run single
//! statements. Multi-step consistency lives in the service layer, inside
//! the store's transaction runner.

use crate::domain::{Account, Budget, Category, LineItem, SavingsGoal, Transaction, TxKind, User};
use crate::error::{LedgerError, LedgerResult};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use uuid::Uuid;

fn parse_uuid(raw: &str, what: &str) -> LedgerResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| LedgerError::InvalidData(format!("bad uuid in {what}: {raw}")))
}

fn parse_opt_uuid(raw: Option<String>, what: &str) -> LedgerResult<Option<Uuid>> {
    raw.map(|s| parse_uuid(&s, what)).transpose()
}

fn parse_amount(raw: &str, what: &str) -> LedgerResult<Decimal> {
    raw.parse::<Decimal>()
        .map_err(|_| LedgerError::InvalidData(format!("bad decimal in {what}: {raw}")))
}

fn parse_ts(raw: &str, what: &str) -> LedgerResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| LedgerError::InvalidData(format!("bad timestamp in {what}: {raw}")))
}

fn parse_opt_date(raw: Option<String>, what: &str) -> LedgerResult<Option<NaiveDate>> {
    raw.map(|s| {
        NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map_err(|_| LedgerError::InvalidData(format!("bad date in {what}: {s}")))
    })
    .transpose()
}

pub mod users {
    use super::*;

    pub fn insert(conn: &Connection, user: &User) -> LedgerResult<()> {
        conn.execute(
            "INSERT INTO users (id, name, created_at) VALUES (?1, ?2, ?3)",
            params![
                user.id.to_string(),
                user.name,
                user.created_at.to_rfc3339()
            ],
        )?;
        Ok(())
    }

    pub fn get_by_name(conn: &Connection, name: &str) -> LedgerResult<Option<User>> {
        let row = conn
            .query_row(
                "SELECT id, name, created_at FROM users WHERE name = ?1",
                params![name],
                |row| {
                    let id: String = row.get(0)?;
                    let name: String = row.get(1)?;
                    let created_at: String = row.get(2)?;
                    Ok((id, name, created_at))
                },
            )
            .optional()?;

        let Some((id, name, created_at)) = row else {
            return Ok(None);
        };
        Ok(Some(User {
            id: parse_uuid(&id, "users.id")?,
            name,
            created_at: parse_ts(&created_at, "users.created_at")?,
        }))
    }

    pub fn list(conn: &Connection) -> LedgerResult<Vec<User>> {
        let mut stmt = conn.prepare("SELECT id, name, created_at FROM users ORDER BY name ASC")?;
        let rows = stmt.query_map([], |row| {
            let id: String = row.get(0)?;
            let name: String = row.get(1)?;
            let created_at: String = row.get(2)?;
            Ok((id, name, created_at))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (id, name, created_at) = row?;
            out.push(User {
                id: parse_uuid(&id, "users.id")?,
                name,
                created_at: parse_ts(&created_at, "users.created_at")?,
            });
        }
        Ok(out)
    }

    pub fn delete_by_name(conn: &Connection, name: &str) -> LedgerResult<usize> {
        let changed = conn.execute("DELETE FROM users WHERE name = ?1", params![name])?;
        Ok(changed)
    }
}

pub mod accounts {
    use super::*;

    fn from_raw(
        id: String,
        user_id: String,
        name: String,
        icon: Option<String>,
        balance: String,
        created_at: String,
    ) -> LedgerResult<Account> {
        Ok(Account {
            id: parse_uuid(&id, "accounts.id")?,
            user_id: parse_uuid(&user_id, "accounts.user_id")?,
            name,
            icon,
            balance: parse_amount(&balance, "accounts.balance")?,
            created_at: parse_ts(&created_at, "accounts.created_at")?,
        })
    }

    pub fn insert(conn: &Connection, account: &Account) -> LedgerResult<()> {
        conn.execute(
            "INSERT INTO accounts (id, user_id, name, icon, balance, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                account.id.to_string(),
                account.user_id.to_string(),
                account.name,
                account.icon,
                account.balance.to_string(),
                account.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn get(conn: &Connection, id: Uuid) -> LedgerResult<Option<Account>> {
        let row = conn
            .query_row(
                "SELECT id, user_id, name, icon, balance, created_at
                 FROM accounts WHERE id = ?1",
                params![id.to_string()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, Option<String>>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, String>(5)?,
                    ))
                },
            )
            .optional()?;

        let Some((id, user_id, name, icon, balance, created_at)) = row else {
            return Ok(None);
        };
        Ok(Some(from_raw(id, user_id, name, icon, balance, created_at)?))
    }

    pub fn get_by_name(
        conn: &Connection,
        user_id: Uuid,
        name: &str,
    ) -> LedgerResult<Option<Account>> {
        let row = conn
            .query_row(
                "SELECT id, user_id, name, icon, balance, created_at
                 FROM accounts WHERE user_id = ?1 AND name = ?2",
                params![user_id.to_string(), name],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, Option<String>>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, String>(5)?,
                    ))
                },
            )
            .optional()?;

        let Some((id, user_id, name, icon, balance, created_at)) = row else {
            return Ok(None);
        };
        Ok(Some(from_raw(id, user_id, name, icon, balance, created_at)?))
    }

    pub fn list_for_user(conn: &Connection, user_id: Uuid) -> LedgerResult<Vec<Account>> {
        let mut stmt = conn.prepare(
            "SELECT id, user_id, name, icon, balance, created_at
             FROM accounts WHERE user_id = ?1 ORDER BY name ASC",
        )?;
        let rows = stmt.query_map(params![user_id.to_string()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (id, user_id, name, icon, balance, created_at) = row?;
            out.push(from_raw(id, user_id, name, icon, balance, created_at)?);
        }
        Ok(out)
    }

    pub fn set_balance(conn: &Connection, id: Uuid, balance: &Decimal) -> LedgerResult<usize> {
        let changed = conn.execute(
            "UPDATE accounts SET balance = ?1 WHERE id = ?2",
            params![balance.to_string(), id.to_string()],
        )?;
        Ok(changed)
    }

    pub fn delete(conn: &Connection, id: Uuid) -> LedgerResult<usize> {
        let changed = conn.execute(
            "DELETE FROM accounts WHERE id = ?1",
            params![id.to_string()],
        )?;
        Ok(changed)
    }
}

pub mod categories {
    use super::*;

    fn from_raw(
        id: String,
        name: String,
        icon: Option<String>,
        kind: String,
        created_at: String,
    ) -> LedgerResult<Category> {
        Ok(Category {
            id: parse_uuid(&id, "categories.id")?,
            name,
            icon,
            kind: kind.parse::<TxKind>()?,
            created_at: parse_ts(&created_at, "categories.created_at")?,
        })
    }

    pub fn insert(conn: &Connection, category: &Category) -> LedgerResult<()> {
        conn.execute(
            "INSERT INTO categories (id, name, icon, kind, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                category.id.to_string(),
                category.name,
                category.icon,
                category.kind.as_str(),
                category.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn get(conn: &Connection, id: Uuid) -> LedgerResult<Option<Category>> {
        let row = conn
            .query_row(
                "SELECT id, name, icon, kind, created_at FROM categories WHERE id = ?1",
                params![id.to_string()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        let Some((id, name, icon, kind, created_at)) = row else {
            return Ok(None);
        };
        Ok(Some(from_raw(id, name, icon, kind, created_at)?))
    }

    pub fn get_by_name(conn: &Connection, name: &str) -> LedgerResult<Option<Category>> {
        let row = conn
            .query_row(
                "SELECT id, name, icon, kind, created_at FROM categories WHERE name = ?1",
                params![name],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        let Some((id, name, icon, kind, created_at)) = row else {
            return Ok(None);
        };
        Ok(Some(from_raw(id, name, icon, kind, created_at)?))
    }

    pub fn list(conn: &Connection) -> LedgerResult<Vec<Category>> {
        let mut stmt = conn.prepare(
            "SELECT id, name, icon, kind, created_at FROM categories ORDER BY name ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (id, name, icon, kind, created_at) = row?;
            out.push(from_raw(id, name, icon, kind, created_at)?);
        }
        Ok(out)
    }

    pub fn delete_by_name(conn: &Connection, name: &str) -> LedgerResult<usize> {
        let changed = conn.execute("DELETE FROM categories WHERE name = ?1", params![name])?;
        Ok(changed)
    }
}

pub mod transactions {
    use super::*;

    type RawTx = (
        String,
        String,
        String,
        String,
        String,
        String,
        Option<String>,
        Option<String>,
        Option<String>,
        String,
    );

    const SELECT: &str = "SELECT id, description, amount, kind, occurred_at, account_id,
                category_id, transfer_peer_id, goal_id, created_at
         FROM transactions";

    fn map_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawTx> {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
            row.get(6)?,
            row.get(7)?,
            row.get(8)?,
            row.get(9)?,
        ))
    }

    fn from_raw(raw: RawTx) -> LedgerResult<Transaction> {
        let (
            id,
            description,
            amount,
            kind,
            occurred_at,
            account_id,
            category_id,
            transfer_peer_id,
            goal_id,
            created_at,
        ) = raw;
        Ok(Transaction {
            id: parse_uuid(&id, "transactions.id")?,
            description,
            amount: parse_amount(&amount, "transactions.amount")?,
            kind: kind.parse::<TxKind>()?,
            occurred_at: parse_ts(&occurred_at, "transactions.occurred_at")?,
            account_id: parse_uuid(&account_id, "transactions.account_id")?,
            category_id: parse_opt_uuid(category_id, "transactions.category_id")?,
            transfer_peer_id: parse_opt_uuid(transfer_peer_id, "transactions.transfer_peer_id")?,
            goal_id: parse_opt_uuid(goal_id, "transactions.goal_id")?,
            created_at: parse_ts(&created_at, "transactions.created_at")?,
        })
    }

    pub fn insert(conn: &Connection, tx: &Transaction) -> LedgerResult<()> {
        conn.execute(
            "INSERT INTO transactions (id, description, amount, kind, occurred_at,
                account_id, category_id, transfer_peer_id, goal_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                tx.id.to_string(),
                tx.description,
                tx.amount.to_string(),
                tx.kind.as_str(),
                tx.occurred_at.to_rfc3339(),
                tx.account_id.to_string(),
                tx.category_id.map(|id| id.to_string()),
                tx.transfer_peer_id.map(|id| id.to_string()),
                tx.goal_id.map(|id| id.to_string()),
                tx.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn update(conn: &Connection, tx: &Transaction) -> LedgerResult<usize> {
        let changed = conn.execute(
            "UPDATE transactions SET description = ?1, amount = ?2, kind = ?3,
                occurred_at = ?4, account_id = ?5, category_id = ?6, goal_id = ?7
             WHERE id = ?8",
            params![
                tx.description,
                tx.amount.to_string(),
                tx.kind.as_str(),
                tx.occurred_at.to_rfc3339(),
                tx.account_id.to_string(),
                tx.category_id.map(|id| id.to_string()),
                tx.goal_id.map(|id| id.to_string()),
                tx.id.to_string(),
            ],
        )?;
        Ok(changed)
    }

    pub fn set_transfer_peer(conn: &Connection, id: Uuid, peer_id: Uuid) -> LedgerResult<usize> {
        let changed = conn.execute(
            "UPDATE transactions SET transfer_peer_id = ?1 WHERE id = ?2",
            params![peer_id.to_string(), id.to_string()],
        )?;
        Ok(changed)
    }

    pub fn get(conn: &Connection, id: Uuid) -> LedgerResult<Option<Transaction>> {
        let raw = conn
            .query_row(
                &format!("{SELECT} WHERE id = ?1"),
                params![id.to_string()],
                map_raw,
            )
            .optional()?;
        raw.map(from_raw).transpose()
    }

    pub fn delete(conn: &Connection, id: Uuid) -> LedgerResult<usize> {
        let changed = conn.execute(
            "DELETE FROM transactions WHERE id = ?1",
            params![id.to_string()],
        )?;
        Ok(changed)
    }

    /// All transactions against accounts of one user, oldest first.
    pub fn list_for_user(conn: &Connection, user_id: Uuid) -> LedgerResult<Vec<Transaction>> {
        let mut stmt = conn.prepare(&format!(
            "{SELECT} WHERE account_id IN (SELECT id FROM accounts WHERE user_id = ?1)
             ORDER BY occurred_at ASC, created_at ASC"
        ))?;
        let rows = stmt.query_map(params![user_id.to_string()], map_raw)?;

        let mut out = Vec::new();
        for row in rows {
            out.push(from_raw(row?)?);
        }
        Ok(out)
    }

    pub fn list_for_account(conn: &Connection, account_id: Uuid) -> LedgerResult<Vec<Transaction>> {
        let mut stmt = conn.prepare(&format!(
            "{SELECT} WHERE account_id = ?1 ORDER BY occurred_at ASC, created_at ASC"
        ))?;
        let rows = stmt.query_map(params![account_id.to_string()], map_raw)?;

        let mut out = Vec::new();
        for row in rows {
            out.push(from_raw(row?)?);
        }
        Ok(out)
    }

    pub fn list_for_category(
        conn: &Connection,
        category_id: Uuid,
    ) -> LedgerResult<Vec<Transaction>> {
        let mut stmt = conn.prepare(&format!(
            "{SELECT} WHERE category_id = ?1 ORDER BY occurred_at ASC, created_at ASC"
        ))?;
        let rows = stmt.query_map(params![category_id.to_string()], map_raw)?;

        let mut out = Vec::new();
        for row in rows {
            out.push(from_raw(row?)?);
        }
        Ok(out)
    }

    pub fn insert_item(conn: &Connection, item: &LineItem) -> LedgerResult<()> {
        conn.execute(
            "INSERT INTO transaction_items (id, transaction_id, name, quantity, price)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                item.id.to_string(),
                item.transaction_id.to_string(),
                item.name,
                item.quantity,
                item.price.to_string(),
            ],
        )?;
        Ok(())
    }

    pub fn items_for(conn: &Connection, transaction_id: Uuid) -> LedgerResult<Vec<LineItem>> {
        let mut stmt = conn.prepare(
            "SELECT id, transaction_id, name, quantity, price
             FROM transaction_items WHERE transaction_id = ?1 ORDER BY rowid ASC",
        )?;
        let rows = stmt.query_map(params![transaction_id.to_string()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (id, tx_id, name, quantity, price) = row?;
            out.push(LineItem {
                id: parse_uuid(&id, "transaction_items.id")?,
                transaction_id: parse_uuid(&tx_id, "transaction_items.transaction_id")?,
                name,
                quantity,
                price: parse_amount(&price, "transaction_items.price")?,
            });
        }
        Ok(out)
    }

    pub fn delete_items_for(conn: &Connection, transaction_id: Uuid) -> LedgerResult<usize> {
        let changed = conn.execute(
            "DELETE FROM transaction_items WHERE transaction_id = ?1",
            params![transaction_id.to_string()],
        )?;
        Ok(changed)
    }
}

pub mod budgets {
    use super::*;

    fn from_raw(
        id: String,
        category_id: String,
        amount: String,
        month: String,
        created_at: String,
    ) -> LedgerResult<Budget> {
        Ok(Budget {
            id: parse_uuid(&id, "budgets.id")?,
            category_id: parse_uuid(&category_id, "budgets.category_id")?,
            amount: parse_amount(&amount, "budgets.amount")?,
            month,
            created_at: parse_ts(&created_at, "budgets.created_at")?,
        })
    }

    /// Insert or replace the amount for (category, month).
    pub fn upsert(conn: &Connection, budget: &Budget) -> LedgerResult<()> {
        conn.execute(
            "INSERT INTO budgets (id, category_id, amount, month, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(category_id, month) DO UPDATE SET amount = excluded.amount",
            params![
                budget.id.to_string(),
                budget.category_id.to_string(),
                budget.amount.to_string(),
                budget.month,
                budget.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn get_for(
        conn: &Connection,
        category_id: Uuid,
        month: &str,
    ) -> LedgerResult<Option<Budget>> {
        let row = conn
            .query_row(
                "SELECT id, category_id, amount, month, created_at
                 FROM budgets WHERE category_id = ?1 AND month = ?2",
                params![category_id.to_string(), month],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        let Some((id, category_id, amount, month, created_at)) = row else {
            return Ok(None);
        };
        Ok(Some(from_raw(id, category_id, amount, month, created_at)?))
    }

    pub fn list(conn: &Connection) -> LedgerResult<Vec<Budget>> {
        let mut stmt = conn.prepare(
            "SELECT id, category_id, amount, month, created_at
             FROM budgets ORDER BY month ASC, created_at ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (id, category_id, amount, month, created_at) = row?;
            out.push(from_raw(id, category_id, amount, month, created_at)?);
        }
        Ok(out)
    }

    pub fn delete_for(conn: &Connection, category_id: Uuid, month: &str) -> LedgerResult<usize> {
        let changed = conn.execute(
            "DELETE FROM budgets WHERE category_id = ?1 AND month = ?2",
            params![category_id.to_string(), month],
        )?;
        Ok(changed)
    }
}

pub mod goals {
    use super::*;

    type RawGoal = (
        String,
        String,
        String,
        String,
        String,
        Option<String>,
        Option<String>,
        bool,
        String,
    );

    const SELECT: &str = "SELECT id, user_id, name, target_amount, saved_amount,
                target_date, icon, achieved, created_at
         FROM savings_goals";

    fn map_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawGoal> {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
            row.get(6)?,
            row.get(7)?,
            row.get(8)?,
        ))
    }

    fn from_raw(raw: RawGoal) -> LedgerResult<SavingsGoal> {
        let (id, user_id, name, target, saved, target_date, icon, achieved, created_at) = raw;
        Ok(SavingsGoal {
            id: parse_uuid(&id, "savings_goals.id")?,
            user_id: parse_uuid(&user_id, "savings_goals.user_id")?,
            name,
            target_amount: parse_amount(&target, "savings_goals.target_amount")?,
            saved_amount: parse_amount(&saved, "savings_goals.saved_amount")?,
            target_date: parse_opt_date(target_date, "savings_goals.target_date")?,
            icon,
            achieved,
            created_at: parse_ts(&created_at, "savings_goals.created_at")?,
        })
    }

    pub fn insert(conn: &Connection, goal: &SavingsGoal) -> LedgerResult<()> {
        conn.execute(
            "INSERT INTO savings_goals (id, user_id, name, target_amount, saved_amount,
                target_date, icon, achieved, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                goal.id.to_string(),
                goal.user_id.to_string(),
                goal.name,
                goal.target_amount.to_string(),
                goal.saved_amount.to_string(),
                goal.target_date.map(|d| d.format("%Y-%m-%d").to_string()),
                goal.icon,
                goal.achieved,
                goal.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn get(conn: &Connection, id: Uuid) -> LedgerResult<Option<SavingsGoal>> {
        let raw = conn
            .query_row(
                &format!("{SELECT} WHERE id = ?1"),
                params![id.to_string()],
                map_raw,
            )
            .optional()?;
        raw.map(from_raw).transpose()
    }

    pub fn get_by_name(
        conn: &Connection,
        user_id: Uuid,
        name: &str,
    ) -> LedgerResult<Option<SavingsGoal>> {
        let raw = conn
            .query_row(
                &format!("{SELECT} WHERE user_id = ?1 AND name = ?2"),
                params![user_id.to_string(), name],
                map_raw,
            )
            .optional()?;
        raw.map(from_raw).transpose()
    }

    pub fn list_for_user(conn: &Connection, user_id: Uuid) -> LedgerResult<Vec<SavingsGoal>> {
        let mut stmt = conn.prepare(&format!("{SELECT} WHERE user_id = ?1 ORDER BY name ASC"))?;
        let rows = stmt.query_map(params![user_id.to_string()], map_raw)?;

        let mut out = Vec::new();
        for row in rows {
            out.push(from_raw(row?)?);
        }
        Ok(out)
    }

    pub fn set_saved(
        conn: &Connection,
        id: Uuid,
        saved: &Decimal,
        achieved: bool,
    ) -> LedgerResult<usize> {
        let changed = conn.execute(
            "UPDATE savings_goals SET saved_amount = ?1, achieved = ?2 WHERE id = ?3",
            params![saved.to_string(), achieved, id.to_string()],
        )?;
        Ok(changed)
    }

    pub fn delete(conn: &Connection, id: Uuid) -> LedgerResult<usize> {
        let changed = conn.execute(
            "DELETE FROM savings_goals WHERE id = ?1",
            params![id.to_string()],
        )?;
        Ok(changed)
    }
}
