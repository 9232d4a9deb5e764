use clap::{Parser, Subcommand};
use orderflow::money::MoneyParseError;
use thiserror::Error;

use crate::config::{LoggingConfig, StoreConfig};

mod billing;
mod ledger;
mod orders;
mod payroll;
mod sales;

#[derive(Debug, Parser)]
#[command(
    name = "orderflow",
    about = "Order workflow with clinic billing, sales, ledger and payroll calculators",
    long_about = None
)]
pub(crate) struct Cli {
    #[command(flatten)]
    logging: LoggingConfig,

    #[command(flatten)]
    store: StoreConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Drive the seeded orders through fulfilment and print their reports
    Orders(orders::OrdersArgs),

    /// Price a patient bill
    Billing(billing::BillingArgs),

    /// Work out profit or loss on a sale
    Sales(sales::SalesArgs),

    /// Total a petty-cash ledger
    Ledger(ledger::LedgerArgs),

    /// Run payroll
    Payroll(payroll::PayrollArgs),
}

impl Cli {
    pub(crate) fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub(crate) fn run(self) -> anyhow::Result<()> {
        match &self.command {
            Commands::Orders(args) => orders::run(&self.store, args),
            Commands::Billing(args) => billing::run(&self.store, args),
            Commands::Sales(args) => sales::run(&self.store, args),
            Commands::Ledger(args) => ledger::run(&self.store, args),
            Commands::Payroll(args) => payroll::run(&self.store, args),
        }
    }
}

/// Errors raised while parsing compound `A:B:C` arguments.
#[derive(Debug, Error)]
pub(crate) enum ArgError {
    /// Wrong number of `:`-separated fields.
    #[error("expected {expected}, got '{value}'")]
    Format {
        expected: &'static str,
        value: String,
    },

    /// A field that should be a whole number was not.
    #[error("invalid number '{0}'")]
    Number(String),

    /// A field that should be an amount was not.
    #[error(transparent)]
    Amount(#[from] MoneyParseError),
}

/// Split `value` into exactly `N` `:`-separated fields. The last field keeps any further
/// colons.
pub(crate) fn fields<'a, const N: usize>(
    value: &'a str,
    expected: &'static str,
) -> Result<[&'a str; N], ArgError> {
    let parts: Vec<&'a str> = value.splitn(N, ':').map(str::trim).collect();

    <[&'a str; N]>::try_from(parts).map_err(|_parts| ArgError::Format {
        expected,
        value: value.to_string(),
    })
}

pub(crate) fn number(value: &str) -> Result<u32, ArgError> {
    value
        .parse()
        .map_err(|_err| ArgError::Number(value.to_string()))
}
