//! Change notification for reactive reads.
//!
//! Writers publish the set of tables a committed unit of work touched;
//! subscribers hold the receiving end of a channel and re-read whatever
//! they are displaying when a notification arrives. Subscribers that have
//! hung up are dropped on the next publish.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::mpsc::{Receiver, Sender, channel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    Users,
    Accounts,
    Categories,
    Transactions,
    TransactionItems,
    Budgets,
    SavingsGoals,
}

impl Table {
    pub fn from_name(name: &str) -> Option<Table> {
        match name {
            "users" => Some(Table::Users),
            "accounts" => Some(Table::Accounts),
            "categories" => Some(Table::Categories),
            "transactions" => Some(Table::Transactions),
            "transaction_items" => Some(Table::TransactionItems),
            "budgets" => Some(Table::Budgets),
            "savings_goals" => Some(Table::SavingsGoals),
            _ => None,
        }
    }
}

struct Subscriber {
    /// None subscribes to every table.
    tables: Option<HashSet<Table>>,
    sender: Sender<Vec<Table>>,
}

#[derive(Default)]
pub struct ChangeBus {
    subscribers: Mutex<Vec<Subscriber>>,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to changes on the given tables.
    pub fn subscribe(&self, tables: &[Table]) -> Receiver<Vec<Table>> {
        self.add(Some(tables.iter().copied().collect()))
    }

    /// Subscribe to changes on every table.
    pub fn subscribe_all(&self) -> Receiver<Vec<Table>> {
        self.add(None)
    }

    fn add(&self, tables: Option<HashSet<Table>>) -> Receiver<Vec<Table>> {
        let (sender, receiver) = channel();
        self.subscribers
            .lock()
            .expect("change bus poisoned")
            .push(Subscriber { tables, sender });
        receiver
    }

    /// Publish one committed unit of work. Subscribers whose receiver is
    /// gone are removed here.
    pub fn publish(&self, touched: &HashSet<Table>) {
        if touched.is_empty() {
            return;
        }

        let mut subs = self.subscribers.lock().expect("change bus poisoned");
        subs.retain(|sub| {
            let mut relevant: Vec<Table> = match &sub.tables {
                None => touched.iter().copied().collect(),
                Some(wanted) => touched.intersection(wanted).copied().collect(),
            };
            if relevant.is_empty() {
                return true;
            }
            relevant.sort();
            sub.sender.send(relevant).is_ok()
        });
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.subscribers.lock().expect("change bus poisoned").len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touched(tables: &[Table]) -> HashSet<Table> {
        tables.iter().copied().collect()
    }

    #[test]
    fn subscriber_sees_only_its_tables() {
        let bus = ChangeBus::new();
        let rx = bus.subscribe(&[Table::Accounts]);

        bus.publish(&touched(&[Table::Transactions, Table::Accounts]));
        assert_eq!(rx.try_recv().unwrap(), vec![Table::Accounts]);

        bus.publish(&touched(&[Table::Budgets]));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn subscribe_all_sees_everything_sorted() {
        let bus = ChangeBus::new();
        let rx = bus.subscribe_all();

        bus.publish(&touched(&[Table::Transactions, Table::Accounts]));
        assert_eq!(
            rx.try_recv().unwrap(),
            vec![Table::Accounts, Table::Transactions]
        );
    }

    #[test]
    fn hung_up_subscriber_is_dropped_on_publish() {
        let bus = ChangeBus::new();
        let rx = bus.subscribe_all();
        drop(rx);
        assert_eq!(bus.subscriber_count(), 1);

        bus.publish(&touched(&[Table::Accounts]));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn empty_publish_is_a_noop() {
        let bus = ChangeBus::new();
        let rx = bus.subscribe_all();
        bus.publish(&HashSet::new());
        assert!(rx.try_recv().is_err());
    }
}
