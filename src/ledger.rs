//! Ledger
//!
//! Petty-cash book of dated income and expense entries.

use std::fmt;

use jiff::civil::Date;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::debug;

/// Errors raised while recording entries or totalling the ledger.
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    /// Entry amount was negative.
    #[error("Transaction {0} has a negative amount")]
    NegativeAmount(u32),

    /// Entry currency differs from the ledger currency (entry currency, ledger currency).
    #[error("Transaction has currency {0}, but ledger has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// A total does not fit in minor units.
    #[error("Ledger total overflowed")]
    Overflow,
}

/// What kind of movement an entry records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    /// Money received
    Income {
        /// Where the money came from (e.g. "Salary")
        origin: String,
    },

    /// Money spent
    Expense {
        /// What it was spent on (e.g. "Travel")
        category: String,
    },
}

impl TransactionKind {
    fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income { .. } => "Income",
            TransactionKind::Expense { .. } => "Expense",
        }
    }

    fn detail(&self) -> &str {
        match self {
            TransactionKind::Income { origin } => origin,
            TransactionKind::Expense { category } => category,
        }
    }
}

/// One ledger entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction<'a> {
    /// Entry identifier
    pub id: u32,

    /// Day the money moved
    pub date: Date,

    /// Amount moved, never negative
    pub amount: Money<'a, Currency>,

    /// Free-text description
    pub details: String,

    /// Income or expense, with its origin or category
    pub kind: TransactionKind,
}

impl<'a> Transaction<'a> {
    /// Create an income entry.
    pub fn income(
        id: u32,
        date: Date,
        amount: Money<'a, Currency>,
        details: impl Into<String>,
        origin: impl Into<String>,
    ) -> Self {
        Self {
            id,
            date,
            amount,
            details: details.into(),
            kind: TransactionKind::Income {
                origin: origin.into(),
            },
        }
    }

    /// Create an expense entry.
    pub fn expense(
        id: u32,
        date: Date,
        amount: Money<'a, Currency>,
        details: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            date,
            amount,
            details: details.into(),
            kind: TransactionKind::Expense {
                category: category.into(),
            },
        }
    }

    /// Whether this entry records money received.
    pub fn is_income(&self) -> bool {
        matches!(self.kind, TransactionKind::Income { .. })
    }

    /// One-line summary: `ID: 1 | Income | Salary | March pay | 2024-03-01 | amount`.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Transaction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {} | {} | {} | {} | {} | {}",
            self.id,
            self.kind.label(),
            self.kind.detail(),
            self.details,
            self.date,
            self.amount
        )
    }
}

/// Entries recorded in a single currency, in insertion order.
#[derive(Debug, Clone)]
pub struct Ledger<'a> {
    currency: &'a Currency,
    entries: Vec<Transaction<'a>>,
}

impl<'a> Ledger<'a> {
    /// Create an empty ledger.
    pub fn new(currency: &'a Currency) -> Self {
        Self {
            currency,
            entries: Vec::new(),
        }
    }

    /// Record an entry.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NegativeAmount`]: the amount is below zero.
    /// - [`LedgerError::CurrencyMismatch`]: the entry uses another currency.
    pub fn add_entry(&mut self, entry: Transaction<'a>) -> Result<(), LedgerError> {
        if entry.amount.to_minor_units() < 0 {
            return Err(LedgerError::NegativeAmount(entry.id));
        }

        let entry_currency = entry.amount.currency();

        if entry_currency != self.currency {
            return Err(LedgerError::CurrencyMismatch(
                entry_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        debug!(entry_id = entry.id, kind = entry.kind.label(), "ledger entry added");

        self.entries.push(entry);

        Ok(())
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[Transaction<'a>] {
        &self.entries
    }

    /// Entries dated `date`.
    pub fn on_date(&self, date: Date) -> impl Iterator<Item = &Transaction<'a>> {
        self.entries.iter().filter(move |entry| entry.date == date)
    }

    /// Sum of income entries.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Overflow`] if the sum does not fit in minor units.
    pub fn total_income(&self) -> Result<Money<'a, Currency>, LedgerError> {
        self.sum(|entry| entry.is_income())
    }

    /// Sum of expense entries.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Overflow`] if the sum does not fit in minor units.
    pub fn total_expense(&self) -> Result<Money<'a, Currency>, LedgerError> {
        self.sum(|entry| !entry.is_income())
    }

    /// Income minus expenses; negative when more was spent than received.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Overflow`] if a total does not fit in minor units.
    pub fn net_balance(&self) -> Result<Money<'a, Currency>, LedgerError> {
        let net = self
            .total_income()?
            .to_minor_units()
            .checked_sub(self.total_expense()?.to_minor_units())
            .ok_or(LedgerError::Overflow)?;

        Ok(Money::from_minor(net, self.currency))
    }

    /// Ledger currency
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }

    fn sum(
        &self,
        include: impl Fn(&Transaction<'a>) -> bool,
    ) -> Result<Money<'a, Currency>, LedgerError> {
        let minor = self
            .entries
            .iter()
            .filter(|entry| include(entry))
            .try_fold(0_i64, |acc, entry| {
                acc.checked_add(entry.amount.to_minor_units())
                    .ok_or(LedgerError::Overflow)
            })?;

        Ok(Money::from_minor(minor, self.currency))
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rusty_money::iso::{GBP, INR};
    use testresult::TestResult;

    use super::*;

    fn ledger() -> Result<Ledger<'static>, LedgerError> {
        let mut ledger = Ledger::new(INR);

        ledger.add_entry(Transaction::income(
            1,
            date(2024, 3, 1),
            Money::from_minor(500_000, INR),
            "March pay",
            "Salary",
        ))?;
        ledger.add_entry(Transaction::expense(
            2,
            date(2024, 3, 1),
            Money::from_minor(12_050, INR),
            "Train",
            "Travel",
        ))?;
        ledger.add_entry(Transaction::expense(
            3,
            date(2024, 3, 2),
            Money::from_minor(40_000, INR),
            "Groceries",
            "Food",
        ))?;

        Ok(ledger)
    }

    #[test]
    fn totals_split_by_kind() -> TestResult {
        let ledger = ledger()?;

        assert_eq!(ledger.total_income()?, Money::from_minor(500_000, INR));
        assert_eq!(ledger.total_expense()?, Money::from_minor(52_050, INR));
        assert_eq!(ledger.net_balance()?, Money::from_minor(447_950, INR));

        Ok(())
    }

    #[test]
    fn net_balance_can_go_negative() -> TestResult {
        let mut ledger = Ledger::new(INR);

        ledger.add_entry(Transaction::expense(
            1,
            date(2024, 1, 1),
            Money::from_minor(1_000, INR),
            "Lunch",
            "Food",
        ))?;

        assert_eq!(ledger.total_income()?, Money::from_minor(0, INR));
        assert_eq!(ledger.net_balance()?, Money::from_minor(-1_000, INR));

        Ok(())
    }

    #[test]
    fn on_date_filters_entries() -> TestResult {
        let ledger = ledger()?;

        let ids: Vec<u32> = ledger.on_date(date(2024, 3, 1)).map(|e| e.id).collect();

        assert_eq!(ids, vec![1, 2]);
        assert_eq!(ledger.on_date(date(2025, 1, 1)).count(), 0);

        Ok(())
    }

    #[test]
    fn summary_names_kind_detail_and_date() -> TestResult {
        let ledger = ledger()?;

        let mut summaries = ledger.entries().iter().map(Transaction::summary);

        let income = summaries.next().ok_or("missing income entry")?;
        let expense = summaries.next().ok_or("missing expense entry")?;

        assert!(income.starts_with("ID: 1 | Income | Salary | March pay | 2024-03-01 | "));
        assert!(expense.starts_with("ID: 2 | Expense | Travel | Train | 2024-03-01 | "));

        Ok(())
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let mut ledger = Ledger::new(INR);

        let result = ledger.add_entry(Transaction::income(
            7,
            date(2024, 1, 1),
            Money::from_minor(-1, INR),
            "Refund",
            "Shop",
        ));

        assert_eq!(result, Err(LedgerError::NegativeAmount(7)));
        assert!(ledger.entries().is_empty());
    }

    #[test]
    fn other_currencies_are_rejected() {
        let mut ledger = Ledger::new(INR);

        let result = ledger.add_entry(Transaction::expense(
            1,
            date(2024, 1, 1),
            Money::from_minor(100, GBP),
            "Tea",
            "Food",
        ));

        assert_eq!(result, Err(LedgerError::CurrencyMismatch("GBP", "INR")));
    }
}
