use std::{
    io::{self, Write},
    str::FromStr,
};

use clap::Args;
use jiff::{Zoned, civil::Date};
use orderflow::{
    ledger::{Ledger, Transaction},
    money::parse_amount,
    session::Session,
};
use rusty_money::Money;

use crate::{
    cli::{ArgError, fields},
    config::StoreConfig,
};

#[derive(Debug, Args)]
pub(crate) struct LedgerArgs {
    /// Income entry as AMOUNT:ORIGIN:DETAILS (repeatable)
    #[arg(long)]
    income: Vec<EntryArg>,

    /// Expense entry as AMOUNT:CATEGORY:DETAILS (repeatable)
    #[arg(long)]
    expense: Vec<EntryArg>,

    /// Date to book entries on (YYYY-MM-DD); today when omitted
    #[arg(long)]
    date: Option<Date>,
}

/// An amount, a label (origin or category) and free-text details.
#[derive(Debug, Clone)]
pub(crate) struct EntryArg {
    amount: i64,
    label: String,
    details: String,
}

impl FromStr for EntryArg {
    type Err = ArgError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let [amount, label, details] = fields::<3>(value, "AMOUNT:LABEL:DETAILS")?;

        Ok(Self {
            amount: parse_amount(amount)?,
            label: label.to_string(),
            details: details.to_string(),
        })
    }
}

pub(crate) fn run(store: &StoreConfig, args: &LedgerArgs) -> anyhow::Result<()> {
    let currency = store.currency()?;
    let date = args.date.unwrap_or_else(|| Zoned::now().date());

    let mut ledger = Ledger::new(currency);
    let mut last = Session::new();

    let incomes = args.income.iter().map(|entry| (true, entry));
    let expenses = args.expense.iter().map(|entry| (false, entry));

    for ((is_income, entry), id) in incomes.chain(expenses).zip(1..) {
        let amount = Money::from_minor(entry.amount, currency);

        let transaction = if is_income {
            Transaction::income(id, date, amount, &entry.details, &entry.label)
        } else {
            Transaction::expense(id, date, amount, &entry.details, &entry.label)
        };

        ledger.add_entry(transaction.clone())?;
        last.record(transaction);
    }

    let mut out = io::stdout().lock();

    for transaction in ledger.entries() {
        writeln!(out, "{}", transaction.summary())?;
    }

    writeln!(out, "\nTotal received: {}", ledger.total_income()?)?;
    writeln!(out, "Total spent: {}", ledger.total_expense()?)?;
    writeln!(out, "Net balance: {}", ledger.net_balance()?)?;

    match last.last() {
        Some(transaction) => writeln!(out, "Last entry: {}", transaction.summary())?,
        None => writeln!(out, "No entries recorded")?,
    }

    Ok(())
}
