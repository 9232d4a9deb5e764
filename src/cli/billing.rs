use std::io::{self, Write};

use clap::Args;
use orderflow::{
    billing::{Charges, PatientBill},
    money::parse_amount,
};
use rusty_money::Money;

use crate::config::StoreConfig;

#[derive(Debug, Args)]
pub(crate) struct BillingArgs {
    /// Bill identifier
    #[arg(long)]
    bill_id: String,

    /// Patient name
    #[arg(long)]
    patient: String,

    /// Consultation fee
    #[arg(long, value_parser = parse_amount)]
    consultation: i64,

    /// Laboratory charges
    #[arg(long, value_parser = parse_amount, default_value = "0")]
    lab: i64,

    /// Medicine charges
    #[arg(long, value_parser = parse_amount, default_value = "0")]
    medicine: i64,

    /// Patient is insured
    #[arg(long)]
    insured: bool,
}

pub(crate) fn run(store: &StoreConfig, args: &BillingArgs) -> anyhow::Result<()> {
    let currency = store.currency()?;

    let bill = PatientBill::new(
        &args.bill_id,
        &args.patient,
        args.insured,
        Charges {
            consultation: Money::from_minor(args.consultation, currency),
            lab: Money::from_minor(args.lab, currency),
            medicine: Money::from_minor(args.medicine, currency),
        },
    )?;

    let mut out = io::stdout().lock();

    writeln!(out, "Bill ID: {}", bill.bill_id())?;
    writeln!(out, "Patient: {}", bill.patient_name())?;
    writeln!(out, "Insured: {}", if bill.has_insurance() { "Yes" } else { "No" })?;
    writeln!(out, "Gross Amount: {}", bill.gross()?)?;
    writeln!(out, "Discount: {}", bill.discount()?)?;
    writeln!(out, "Final Payable: {}", bill.final_payable()?)?;

    Ok(())
}
