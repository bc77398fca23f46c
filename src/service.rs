//! Use-cases over the repositories.
//!
//! Everything that touches more than one row runs inside [`Db::with_tx`]:
//! posting a transaction adjusts the account balance (and optionally a
//! savings goal) in the same unit of work, and updates/deletes reverse the
//! previously stored effect before applying a new one. Budget and savings
//! progress are derived on read and never persisted.

use crate::config::AppPaths;
use crate::db::Db;
use crate::domain::{
    Account, Budget, Category, LineItem, SavingsGoal, Transaction, TxKind, User, month_range,
};
use crate::error::{LedgerError, LedgerResult};
use crate::repo;
use crate::watch::ChangeBus;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewLineItem {
    pub name: String,
    pub quantity: i64,
    pub price: Decimal,
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub description: String,
    pub amount: Decimal,
    pub kind: TxKind,
    pub occurred_at: DateTime<Utc>,
    pub account_id: Uuid,
    pub category_id: Option<Uuid>,
    pub goal_id: Option<Uuid>,
    pub items: Vec<NewLineItem>,
}

/// Field-wise edit of a stored transaction. `None` leaves a field alone;
/// the nested options clear or replace the reference.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub kind: Option<TxKind>,
    pub occurred_at: Option<DateTime<Utc>>,
    pub account_id: Option<Uuid>,
    pub category_id: Option<Option<Uuid>>,
    pub goal_id: Option<Option<Uuid>>,
    pub items: Option<Vec<NewLineItem>>,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub account_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub kind: Option<TxKind>,
    pub month: Option<String>,
}

/// One row of the budget report: spent and progress are recomputed from
/// the expense transactions in the budget's category and month.
#[derive(Debug, Clone)]
pub struct BudgetProgress {
    pub budget: Budget,
    pub category_name: String,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub progress: Decimal,
}

pub struct Ledger {
    db: Db,
}

impl Ledger {
    pub fn open(paths: &AppPaths) -> LedgerResult<(Self, PathBuf)> {
        let (db, db_path) = Db::open(paths)?;
        Ok((Self { db }, db_path))
    }

    #[cfg(test)]
    pub fn in_memory() -> LedgerResult<Self> {
        Ok(Self {
            db: Db::open_in_memory()?,
        })
    }

    pub fn bus(&self) -> &ChangeBus {
        self.db.bus()
    }

    pub fn data_version(&self) -> LedgerResult<i64> {
        self.db.data_version()
    }

    fn conn(&self) -> &Connection {
        self.db.conn()
    }

    // ----- users ------------------------------------------------------

    /// Fetch the named user, creating it on first use.
    pub fn ensure_user(&mut self, name: &str) -> LedgerResult<User> {
        if let Some(user) = repo::users::get_by_name(self.conn(), name)? {
            return Ok(user);
        }
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.db.with_tx(|tx| {
            repo::users::insert(tx, &user)?;
            Ok(())
        })?;
        Ok(user)
    }

    pub fn create_user(&mut self, name: &str) -> LedgerResult<User> {
        if repo::users::get_by_name(self.conn(), name)?.is_some() {
            return Err(LedgerError::Duplicate {
                entity: "User",
                name: name.to_string(),
            });
        }
        self.ensure_user(name)
    }

    pub fn users(&self) -> LedgerResult<Vec<User>> {
        repo::users::list(self.conn())
    }

    /// Deletes the user; accounts, their transactions and the user's goals
    /// go with it through the schema's cascade rules.
    pub fn remove_user(&mut self, name: &str) -> LedgerResult<()> {
        let name = name.to_string();
        self.db.with_tx(|tx| {
            let changed = repo::users::delete_by_name(tx, &name)?;
            if changed == 0 {
                return Err(LedgerError::user_not_found(name.clone()));
            }
            Ok(())
        })
    }

    // ----- accounts ---------------------------------------------------

    pub fn create_account(
        &mut self,
        user_id: Uuid,
        name: &str,
        icon: Option<String>,
        opening_balance: Decimal,
    ) -> LedgerResult<Account> {
        if repo::accounts::get_by_name(self.conn(), user_id, name)?.is_some() {
            return Err(LedgerError::Duplicate {
                entity: "Account",
                name: name.to_string(),
            });
        }
        let account = Account {
            id: Uuid::new_v4(),
            user_id,
            name: name.to_string(),
            icon,
            balance: opening_balance,
            created_at: Utc::now(),
        };
        self.db.with_tx(|tx| {
            repo::accounts::insert(tx, &account)?;
            Ok(())
        })?;
        Ok(account)
    }

    pub fn accounts(&self, user_id: Uuid) -> LedgerResult<Vec<Account>> {
        repo::accounts::list_for_user(self.conn(), user_id)
    }

    pub fn account_by_name(&self, user_id: Uuid, name: &str) -> LedgerResult<Account> {
        repo::accounts::get_by_name(self.conn(), user_id, name)?
            .ok_or_else(|| LedgerError::account_not_found(name))
    }

    /// Removes the account and, through the schema, its transactions.
    /// Savings-goal increments funded from this account are reversed first
    /// so goal progress keeps matching the transactions that remain.
    pub fn remove_account(&mut self, user_id: Uuid, name: &str) -> LedgerResult<Account> {
        let name = name.to_string();
        self.db.with_tx(move |tx| {
            let account = repo::accounts::get_by_name(tx, user_id, &name)?
                .ok_or_else(|| LedgerError::account_not_found(name.clone()))?;

            for t in repo::transactions::list_for_account(tx, account.id)? {
                if t.kind == TxKind::Expense {
                    if let Some(goal_id) = t.goal_id {
                        reverse_goal_increment(tx, goal_id, t.amount)?;
                    }
                }
            }

            repo::accounts::delete(tx, account.id)?;
            Ok(account)
        })
    }

    // ----- categories -------------------------------------------------

    pub fn create_category(
        &mut self,
        name: &str,
        kind: TxKind,
        icon: Option<String>,
    ) -> LedgerResult<Category> {
        if repo::categories::get_by_name(self.conn(), name)?.is_some() {
            return Err(LedgerError::Duplicate {
                entity: "Category",
                name: name.to_string(),
            });
        }
        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            icon,
            kind,
            created_at: Utc::now(),
        };
        self.db.with_tx(|tx| {
            repo::categories::insert(tx, &category)?;
            Ok(())
        })?;
        Ok(category)
    }

    pub fn categories(&self) -> LedgerResult<Vec<Category>> {
        repo::categories::list(self.conn())
    }

    pub fn category_by_name(&self, name: &str) -> LedgerResult<Category> {
        repo::categories::get_by_name(self.conn(), name)?
            .ok_or_else(|| LedgerError::category_not_found(name))
    }

    /// Transaction references null out (schema SET NULL); the category's
    /// budgets cascade away.
    pub fn remove_category(&mut self, name: &str) -> LedgerResult<()> {
        let name = name.to_string();
        self.db.with_tx(|tx| {
            let changed = repo::categories::delete_by_name(tx, &name)?;
            if changed == 0 {
                return Err(LedgerError::category_not_found(name.clone()));
            }
            Ok(())
        })
    }

    // ----- transactions -----------------------------------------------

    /// Post a transaction: persist it with its line items, move the account
    /// balance, and bump a linked savings goal, all in one unit of work.
    pub fn add_transaction(&mut self, new: NewTransaction) -> LedgerResult<Transaction> {
        if new.amount <= Decimal::ZERO {
            return Err(LedgerError::Validation(
                "Transaction amount must be > 0".into(),
            ));
        }

        self.db.with_tx(move |tx| {
            let account = repo::accounts::get(tx, new.account_id)?
                .ok_or_else(|| LedgerError::account_not_found(new.account_id.to_string()))?;

            check_category(tx, new.category_id, new.kind)?;
            check_goal(tx, new.goal_id, new.kind)?;

            let record = Transaction {
                id: Uuid::new_v4(),
                description: new.description,
                amount: new.amount,
                kind: new.kind,
                occurred_at: new.occurred_at,
                account_id: new.account_id,
                category_id: new.category_id,
                transfer_peer_id: None,
                goal_id: new.goal_id,
                created_at: Utc::now(),
            };
            repo::transactions::insert(tx, &record)?;
            insert_items(tx, record.id, &new.items)?;

            let balance = account.balance + record.kind.signed(record.amount);
            repo::accounts::set_balance(tx, account.id, &balance)?;

            if let Some(goal_id) = record.goal_id {
                apply_goal_increment(tx, goal_id, record.amount)?;
            }

            Ok(record)
        })
    }

    /// Edit a stored transaction. The previously *stored* amount, kind and
    /// account decide what gets reversed; the patched values decide what
    /// gets applied. Both mutations share one unit of work.
    pub fn update_transaction(
        &mut self,
        id: Uuid,
        patch: TransactionPatch,
    ) -> LedgerResult<Transaction> {
        self.db.with_tx(move |tx| {
            let stored = repo::transactions::get(tx, id)?
                .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;

            let mut updated = stored.clone();
            if let Some(description) = patch.description {
                updated.description = description;
            }
            if let Some(amount) = patch.amount {
                if amount <= Decimal::ZERO {
                    return Err(LedgerError::Validation(
                        "Transaction amount must be > 0".into(),
                    ));
                }
                updated.amount = amount;
            }
            if let Some(kind) = patch.kind {
                updated.kind = kind;
            }
            if let Some(occurred_at) = patch.occurred_at {
                updated.occurred_at = occurred_at;
            }
            if let Some(account_id) = patch.account_id {
                updated.account_id = account_id;
            }
            if let Some(category_id) = patch.category_id {
                updated.category_id = category_id;
            }
            if let Some(goal_id) = patch.goal_id {
                updated.goal_id = goal_id;
            }

            if stored.transfer_peer_id.is_some() {
                let structural_change = updated.kind != stored.kind
                    || updated.account_id != stored.account_id
                    || updated.category_id != stored.category_id
                    || updated.goal_id != stored.goal_id;
                if structural_change {
                    return Err(LedgerError::Validation(
                        "A transfer leg only allows description, amount and date edits".into(),
                    ));
                }
            }

            check_category(tx, updated.category_id, updated.kind)?;
            check_goal(tx, updated.goal_id, updated.kind)?;
            if updated.account_id != stored.account_id
                && repo::accounts::get(tx, updated.account_id)?.is_none()
            {
                return Err(LedgerError::account_not_found(
                    updated.account_id.to_string(),
                ));
            }

            // Reverse the stored effect, then apply the new one. The second
            // fetch sees the reversal when both hit the same account.
            let old_account = repo::accounts::get(tx, stored.account_id)?
                .ok_or_else(|| LedgerError::account_not_found(stored.account_id.to_string()))?;
            let reversed = old_account.balance - stored.kind.signed(stored.amount);
            repo::accounts::set_balance(tx, old_account.id, &reversed)?;

            let new_account = repo::accounts::get(tx, updated.account_id)?
                .ok_or_else(|| LedgerError::account_not_found(updated.account_id.to_string()))?;
            let applied = new_account.balance + updated.kind.signed(updated.amount);
            repo::accounts::set_balance(tx, new_account.id, &applied)?;

            if let Some(goal_id) = stored.goal_id {
                reverse_goal_increment(tx, goal_id, stored.amount)?;
            }
            if let Some(goal_id) = updated.goal_id {
                apply_goal_increment(tx, goal_id, updated.amount)?;
            }

            repo::transactions::update(tx, &updated)?;

            if let Some(items) = patch.items {
                repo::transactions::delete_items_for(tx, updated.id)?;
                insert_items(tx, updated.id, &items)?;
            }

            // Keep the amounts of a transfer pair in lockstep.
            if let Some(peer_id) = stored.transfer_peer_id {
                if updated.amount != stored.amount {
                    let peer = repo::transactions::get(tx, peer_id)?
                        .ok_or_else(|| LedgerError::transaction_not_found(peer_id.to_string()))?;
                    let peer_account = repo::accounts::get(tx, peer.account_id)?.ok_or_else(
                        || LedgerError::account_not_found(peer.account_id.to_string()),
                    )?;
                    let rebalanced = peer_account.balance - peer.kind.signed(peer.amount)
                        + peer.kind.signed(updated.amount);
                    repo::accounts::set_balance(tx, peer_account.id, &rebalanced)?;

                    let mut peer = peer;
                    peer.amount = updated.amount;
                    repo::transactions::update(tx, &peer)?;
                }
            }

            Ok(updated)
        })
    }

    /// Remove a transaction, reversing its balance effect (and a linked
    /// goal increment). Deleting one leg of a transfer removes the peer
    /// leg too, with its own reversal, in the same unit of work.
    pub fn delete_transaction(&mut self, id: Uuid) -> LedgerResult<Transaction> {
        self.db.with_tx(move |tx| {
            let stored = repo::transactions::get(tx, id)?
                .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;

            if let Some(peer_id) = stored.transfer_peer_id {
                if let Some(peer) = repo::transactions::get(tx, peer_id)? {
                    reverse_balance_effect(tx, &peer)?;
                    repo::transactions::delete(tx, peer.id)?;
                }
            }

            reverse_balance_effect(tx, &stored)?;
            if let Some(goal_id) = stored.goal_id {
                reverse_goal_increment(tx, goal_id, stored.amount)?;
            }
            repo::transactions::delete(tx, stored.id)?;

            Ok(stored)
        })
    }

    /// Move money between two accounts of the same user as a linked pair
    /// of transactions: an expense leg in the source, an income leg in the
    /// destination.
    pub fn transfer(
        &mut self,
        from_account_id: Uuid,
        to_account_id: Uuid,
        amount: Decimal,
        description: String,
        occurred_at: DateTime<Utc>,
    ) -> LedgerResult<(Transaction, Transaction)> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::Validation(
                "Transfer amount must be > 0".into(),
            ));
        }
        if from_account_id == to_account_id {
            return Err(LedgerError::Validation(
                "Transfer accounts must differ".into(),
            ));
        }

        self.db.with_tx(move |tx| {
            let from = repo::accounts::get(tx, from_account_id)?
                .ok_or_else(|| LedgerError::account_not_found(from_account_id.to_string()))?;
            let to = repo::accounts::get(tx, to_account_id)?
                .ok_or_else(|| LedgerError::account_not_found(to_account_id.to_string()))?;

            let created_at = Utc::now();
            let mut out_leg = Transaction {
                id: Uuid::new_v4(),
                description: description.clone(),
                amount,
                kind: TxKind::Expense,
                occurred_at,
                account_id: from.id,
                category_id: None,
                transfer_peer_id: None,
                goal_id: None,
                created_at,
            };
            let mut in_leg = Transaction {
                id: Uuid::new_v4(),
                description,
                amount,
                kind: TxKind::Income,
                occurred_at,
                account_id: to.id,
                category_id: None,
                transfer_peer_id: None,
                goal_id: None,
                created_at,
            };

            // Both rows must exist before the self-referencing pair links.
            repo::transactions::insert(tx, &out_leg)?;
            repo::transactions::insert(tx, &in_leg)?;
            repo::transactions::set_transfer_peer(tx, out_leg.id, in_leg.id)?;
            repo::transactions::set_transfer_peer(tx, in_leg.id, out_leg.id)?;
            out_leg.transfer_peer_id = Some(in_leg.id);
            in_leg.transfer_peer_id = Some(out_leg.id);

            repo::accounts::set_balance(tx, from.id, &(from.balance - amount))?;
            repo::accounts::set_balance(tx, to.id, &(to.balance + amount))?;

            Ok((out_leg, in_leg))
        })
    }

    pub fn transaction(&self, id: Uuid) -> LedgerResult<Transaction> {
        repo::transactions::get(self.conn(), id)?
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))
    }

    pub fn items(&self, transaction_id: Uuid) -> LedgerResult<Vec<LineItem>> {
        repo::transactions::items_for(self.conn(), transaction_id)
    }

    pub fn transactions(
        &self,
        user_id: Uuid,
        filter: &TransactionFilter,
    ) -> LedgerResult<Vec<Transaction>> {
        let mut txs = if let Some(account_id) = filter.account_id {
            repo::transactions::list_for_account(self.conn(), account_id)?
        } else {
            repo::transactions::list_for_user(self.conn(), user_id)?
        };

        if let Some(category_id) = filter.category_id {
            txs.retain(|t| t.category_id == Some(category_id));
        }
        if let Some(kind) = filter.kind {
            txs.retain(|t| t.kind == kind);
        }
        if let Some(month) = &filter.month {
            let (start, end) = month_range(month)?;
            txs.retain(|t| t.occurred_at >= start && t.occurred_at <= end);
        }

        Ok(txs)
    }

    // ----- budgets ----------------------------------------------------

    pub fn set_budget(
        &mut self,
        category_id: Uuid,
        amount: Decimal,
        month: &str,
    ) -> LedgerResult<Budget> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::Validation("Budget amount must be > 0".into()));
        }
        month_range(month)?;

        let budget = Budget {
            id: Uuid::new_v4(),
            category_id,
            amount,
            month: month.to_string(),
            created_at: Utc::now(),
        };
        self.db.with_tx(|tx| {
            if repo::categories::get(tx, budget.category_id)?.is_none() {
                return Err(LedgerError::category_not_found(
                    budget.category_id.to_string(),
                ));
            }
            repo::budgets::upsert(tx, &budget)?;
            Ok(())
        })?;
        Ok(budget)
    }

    pub fn budgets(&self) -> LedgerResult<Vec<(Budget, String)>> {
        let mut out = Vec::new();
        for budget in repo::budgets::list(self.conn())? {
            let category = repo::categories::get(self.conn(), budget.category_id)?
                .ok_or_else(|| LedgerError::category_not_found(budget.category_id.to_string()))?;
            out.push((budget, category.name));
        }
        Ok(out)
    }

    pub fn remove_budget(&mut self, category_id: Uuid, month: &str) -> LedgerResult<()> {
        let month = month.to_string();
        self.db.with_tx(move |tx| {
            let changed = repo::budgets::delete_for(tx, category_id, &month)?;
            if changed == 0 {
                return Err(LedgerError::budget_not_found(month.clone()));
            }
            Ok(())
        })
    }

    /// Derived display math, recomputed on each call and never persisted.
    pub fn budget_report(&self, month: &str) -> LedgerResult<Vec<BudgetProgress>> {
        let (start, end) = month_range(month)?;

        let mut rows = Vec::new();
        for budget in repo::budgets::list(self.conn())? {
            if budget.month != month {
                continue;
            }
            let category = repo::categories::get(self.conn(), budget.category_id)?
                .ok_or_else(|| LedgerError::category_not_found(budget.category_id.to_string()))?;

            let mut spent = Decimal::ZERO;
            for t in repo::transactions::list_for_category(self.conn(), budget.category_id)? {
                if t.kind == TxKind::Expense && t.occurred_at >= start && t.occurred_at <= end {
                    spent += t.amount;
                }
            }

            let progress = if budget.amount > Decimal::ZERO {
                (spent / budget.amount).round_dp(2)
            } else {
                Decimal::ZERO
            };
            rows.push(BudgetProgress {
                remaining: budget.amount - spent,
                category_name: category.name,
                budget,
                spent,
                progress,
            });
        }

        rows.sort_by(|a, b| a.category_name.cmp(&b.category_name));
        Ok(rows)
    }

    // ----- savings goals ----------------------------------------------

    pub fn create_goal(
        &mut self,
        user_id: Uuid,
        name: &str,
        target_amount: Decimal,
        target_date: Option<NaiveDate>,
        icon: Option<String>,
    ) -> LedgerResult<SavingsGoal> {
        if target_amount <= Decimal::ZERO {
            return Err(LedgerError::Validation(
                "Goal target amount must be > 0".into(),
            ));
        }
        if repo::goals::get_by_name(self.conn(), user_id, name)?.is_some() {
            return Err(LedgerError::Duplicate {
                entity: "Savings goal",
                name: name.to_string(),
            });
        }

        let goal = SavingsGoal {
            id: Uuid::new_v4(),
            user_id,
            name: name.to_string(),
            target_amount,
            saved_amount: Decimal::ZERO,
            target_date,
            icon,
            achieved: false,
            created_at: Utc::now(),
        };
        self.db.with_tx(|tx| {
            repo::goals::insert(tx, &goal)?;
            Ok(())
        })?;
        Ok(goal)
    }

    pub fn goals(&self, user_id: Uuid) -> LedgerResult<Vec<SavingsGoal>> {
        repo::goals::list_for_user(self.conn(), user_id)
    }

    pub fn goal_by_name(&self, user_id: Uuid, name: &str) -> LedgerResult<SavingsGoal> {
        repo::goals::get_by_name(self.conn(), user_id, name)?
            .ok_or_else(|| LedgerError::goal_not_found(name))
    }

    /// Transaction references null out (schema SET NULL); balances stay as
    /// they are, since the money already moved.
    pub fn remove_goal(&mut self, user_id: Uuid, name: &str) -> LedgerResult<SavingsGoal> {
        let name = name.to_string();
        self.db.with_tx(move |tx| {
            let goal = repo::goals::get_by_name(tx, user_id, &name)?
                .ok_or_else(|| LedgerError::goal_not_found(name.clone()))?;
            repo::goals::delete(tx, goal.id)?;
            Ok(goal)
        })
    }
}

fn insert_items(
    tx: &rusqlite::Transaction<'_>,
    transaction_id: Uuid,
    items: &[NewLineItem],
) -> LedgerResult<()> {
    for item in items {
        repo::transactions::insert_item(
            tx,
            &LineItem {
                id: Uuid::new_v4(),
                transaction_id,
                name: item.name.clone(),
                quantity: item.quantity,
                price: item.price,
            },
        )?;
    }
    Ok(())
}

fn check_category(
    tx: &rusqlite::Transaction<'_>,
    category_id: Option<Uuid>,
    kind: TxKind,
) -> LedgerResult<()> {
    let Some(category_id) = category_id else {
        return Ok(());
    };
    let category = repo::categories::get(tx, category_id)?
        .ok_or_else(|| LedgerError::category_not_found(category_id.to_string()))?;
    if category.kind != kind {
        return Err(LedgerError::Validation(format!(
            "Category '{}' is tagged {} but the transaction is {}",
            category.name, category.kind, kind
        )));
    }
    Ok(())
}

fn check_goal(
    tx: &rusqlite::Transaction<'_>,
    goal_id: Option<Uuid>,
    kind: TxKind,
) -> LedgerResult<()> {
    let Some(goal_id) = goal_id else {
        return Ok(());
    };
    if kind != TxKind::Expense {
        return Err(LedgerError::Validation(
            "Only expense transactions can fund a savings goal".into(),
        ));
    }
    if repo::goals::get(tx, goal_id)?.is_none() {
        return Err(LedgerError::goal_not_found(goal_id.to_string()));
    }
    Ok(())
}

fn reverse_balance_effect(
    tx: &rusqlite::Transaction<'_>,
    t: &Transaction,
) -> LedgerResult<()> {
    let account = repo::accounts::get(tx, t.account_id)?
        .ok_or_else(|| LedgerError::account_not_found(t.account_id.to_string()))?;
    let balance = account.balance - t.kind.signed(t.amount);
    repo::accounts::set_balance(tx, account.id, &balance)?;
    Ok(())
}

fn apply_goal_increment(
    tx: &rusqlite::Transaction<'_>,
    goal_id: Uuid,
    amount: Decimal,
) -> LedgerResult<()> {
    let goal = repo::goals::get(tx, goal_id)?
        .ok_or_else(|| LedgerError::goal_not_found(goal_id.to_string()))?;
    let saved = goal.saved_amount + amount;
    repo::goals::set_saved(tx, goal.id, &saved, saved >= goal.target_amount)?;
    Ok(())
}

fn reverse_goal_increment(
    tx: &rusqlite::Transaction<'_>,
    goal_id: Uuid,
    amount: Decimal,
) -> LedgerResult<()> {
    let goal = repo::goals::get(tx, goal_id)?
        .ok_or_else(|| LedgerError::goal_not_found(goal_id.to_string()))?;
    let saved = goal.saved_amount - amount;
    repo::goals::set_saved(tx, goal.id, &saved, saved >= goal.target_amount)?;
    Ok(())
}
