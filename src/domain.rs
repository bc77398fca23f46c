use crate::error::{LedgerError, LedgerResult};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Whether a transaction moves money into or out of its account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }

    /// Signed balance effect of a transaction amount with this kind.
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            TxKind::Income => amount,
            TxKind::Expense => -amount,
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            other => Err(LedgerError::InvalidData(format!(
                "unknown transaction kind: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub icon: Option<String>,
    /// Maintained running balance, mutated by every transaction write.
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub icon: Option<String>,
    pub kind: TxKind,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: Uuid,
    pub description: String,
    /// Always positive; direction comes from `kind`.
    pub amount: Decimal,
    pub kind: TxKind,
    pub occurred_at: DateTime<Utc>,
    pub account_id: Uuid,
    pub category_id: Option<Uuid>,
    pub transfer_peer_id: Option<Uuid>,
    pub goal_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct LineItem {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub name: String,
    pub quantity: i64,
    pub price: Decimal,
}

#[derive(Debug, Clone)]
pub struct Budget {
    pub id: Uuid,
    pub category_id: Uuid,
    pub amount: Decimal,
    /// Calendar period as YYYY-MM.
    pub month: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SavingsGoal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub target_amount: Decimal,
    pub saved_amount: Decimal,
    pub target_date: Option<NaiveDate>,
    pub icon: Option<String>,
    pub achieved: bool,
    pub created_at: DateTime<Utc>,
}

/// Line item as given on the command line: `<name>:<quantity>:<price>`.
pub fn parse_item_spec(raw: &str) -> LedgerResult<(String, i64, Decimal)> {
    let (rest, price_raw) = raw.rsplit_once(':').ok_or_else(|| {
        LedgerError::Validation(format!(
            "Invalid --item '{raw}'. Expected <name>:<quantity>:<price>"
        ))
    })?;
    let (name, qty_raw) = rest.rsplit_once(':').ok_or_else(|| {
        LedgerError::Validation(format!(
            "Invalid --item '{raw}'. Expected <name>:<quantity>:<price>"
        ))
    })?;

    if name.is_empty() {
        return Err(LedgerError::Validation(format!(
            "Invalid --item '{raw}': empty name"
        )));
    }
    let quantity: i64 = qty_raw
        .parse()
        .map_err(|_| LedgerError::Validation(format!("Invalid quantity in '{raw}'")))?;
    if quantity <= 0 {
        return Err(LedgerError::Validation(format!(
            "Invalid --item '{raw}': quantity must be > 0"
        )));
    }
    let price = price_raw
        .parse::<Decimal>()
        .map_err(|_| LedgerError::Validation(format!("Invalid price in '{raw}'")))?;
    if price.is_sign_negative() {
        return Err(LedgerError::Validation(format!(
            "Invalid --item '{raw}': price must be >= 0"
        )));
    }

    Ok((name.to_string(), quantity, price))
}

/// Inclusive UTC range covered by a `YYYY-MM` month string.
pub fn month_range(raw: &str) -> LedgerResult<(DateTime<Utc>, DateTime<Utc>)> {
    let (y, m) = raw
        .split_once('-')
        .ok_or_else(|| LedgerError::Validation("Invalid month. Expected YYYY-MM".into()))?;
    let year: i32 = y
        .parse()
        .map_err(|_| LedgerError::Validation("Invalid month. Expected YYYY-MM".into()))?;
    let month: u32 = m
        .parse()
        .map_err(|_| LedgerError::Validation("Invalid month. Expected YYYY-MM".into()))?;
    if !(1..=12).contains(&month) {
        return Err(LedgerError::Validation("Invalid month value".into()));
    }

    let start_date = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| LedgerError::Validation("Invalid month value".into()))?;
    let start = Utc.from_utc_datetime(&NaiveDateTime::new(
        start_date,
        NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
    ));

    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let next_start = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .ok_or_else(|| LedgerError::Validation("Invalid month value".into()))?;
    let end = Utc.from_utc_datetime(&NaiveDateTime::new(
        next_start,
        NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
    )) - chrono::Duration::seconds(1);

    Ok((start, end))
}

pub fn current_month(now: DateTime<Utc>) -> String {
    format!("{:04}-{:02}", now.year(), now.month())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_str() {
        assert_eq!("income".parse::<TxKind>().unwrap(), TxKind::Income);
        assert_eq!(TxKind::Expense.to_string(), "expense");
        assert!("transfer".parse::<TxKind>().is_err());
    }

    #[test]
    fn signed_effect_follows_kind() {
        let amount = Decimal::from(25_000);
        assert_eq!(TxKind::Income.signed(amount), amount);
        assert_eq!(TxKind::Expense.signed(amount), -amount);
    }

    #[test]
    fn item_spec_parses_and_keeps_colons_in_name() {
        let (name, qty, price) = parse_item_spec("milk 2%:3:1.25").unwrap();
        assert_eq!(name, "milk 2%");
        assert_eq!(qty, 3);
        assert_eq!(price, "1.25".parse::<Decimal>().unwrap());

        let (name, _, _) = parse_item_spec("a:b:c:2:10").unwrap();
        assert_eq!(name, "a:b:c");

        assert!(parse_item_spec("noseparators").is_err());
        assert!(parse_item_spec("x:0:5").is_err());
        assert!(parse_item_spec("x:1:-5").is_err());
    }

    #[test]
    fn month_range_covers_whole_month() {
        let (start, end) = month_range("2026-02").unwrap();
        assert_eq!(start.to_rfc3339(), "2026-02-01T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2026-02-28T23:59:59+00:00");
        assert!(month_range("2026-13").is_err());
        assert!(month_range("garbage").is_err());
    }
}
