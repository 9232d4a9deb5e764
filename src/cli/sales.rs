use std::io::{self, Write};

use clap::Args;
use orderflow::{money::parse_amount, sales::SaleTransaction};
use rusty_money::Money;

use crate::config::StoreConfig;

#[derive(Debug, Args)]
pub(crate) struct SalesArgs {
    /// Invoice number
    #[arg(long)]
    invoice: String,

    /// Customer name
    #[arg(long)]
    customer: String,

    /// Item sold
    #[arg(long)]
    item: String,

    /// Units sold
    #[arg(long)]
    quantity: u32,

    /// What the stock cost
    #[arg(long, value_parser = parse_amount)]
    purchase: i64,

    /// What the stock sold for
    #[arg(long, value_parser = parse_amount)]
    selling: i64,
}

pub(crate) fn run(store: &StoreConfig, args: &SalesArgs) -> anyhow::Result<()> {
    let currency = store.currency()?;

    let sale = SaleTransaction::new(
        &args.invoice,
        &args.customer,
        &args.item,
        args.quantity,
        Money::from_minor(args.purchase, currency),
        Money::from_minor(args.selling, currency),
    )?;

    let outcome = sale.outcome()?;
    let mut out = io::stdout().lock();

    writeln!(out, "Invoice: {}", sale.invoice_no())?;
    writeln!(out, "Customer: {}", sale.customer_name())?;
    writeln!(out, "Item: {} x{}", sale.item_name(), sale.quantity())?;
    writeln!(out, "Purchase Amount: {}", sale.purchase_amount())?;
    writeln!(out, "Selling Amount: {}", sale.selling_amount())?;
    writeln!(out, "Status: {outcome}")?;

    if let Some(amount) = outcome.amount() {
        writeln!(out, "{outcome} Amount: {amount}")?;
    }

    writeln!(out, "Margin: {}%", sale.margin_percent()?)?;

    Ok(())
}
