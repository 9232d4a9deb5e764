use std::{
    io::{self, Write},
    rc::Rc,
    str::FromStr,
};

use clap::Args;
use orderflow::{
    money::parse_amount,
    payroll::{Employee, FinanceNotifier, HrNotifier, PayrollProcessor},
};
use rusty_money::Money;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::{
    cli::{ArgError, fields, number},
    config::StoreConfig,
};

#[derive(Debug, Args)]
pub(crate) struct PayrollArgs {
    /// Salaried employee as ID:NAME:MONTHLY_SALARY (repeatable)
    #[arg(long)]
    full_time: Vec<FullTimeArg>,

    /// Contractor as ID:NAME:DAILY_RATE:DAYS (repeatable)
    #[arg(long)]
    contract: Vec<ContractArg>,
}

#[derive(Debug, Clone)]
pub(crate) struct FullTimeArg {
    id: u32,
    name: String,
    salary: i64,
}

impl FromStr for FullTimeArg {
    type Err = ArgError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let [id, name, salary] = fields::<3>(value, "ID:NAME:MONTHLY_SALARY")?;

        Ok(Self {
            id: number(id)?,
            name: name.to_string(),
            salary: parse_amount(salary)?,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ContractArg {
    id: u32,
    name: String,
    rate: i64,
    days: u32,
}

impl FromStr for ContractArg {
    type Err = ArgError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let [id, name, rate, days] = fields::<4>(value, "ID:NAME:DAILY_RATE:DAYS")?;

        Ok(Self {
            id: number(id)?,
            name: name.to_string(),
            rate: parse_amount(rate)?,
            days: number(days)?,
        })
    }
}

pub(crate) fn run(store: &StoreConfig, args: &PayrollArgs) -> anyhow::Result<()> {
    let currency = store.currency()?;

    let mut employees = Vec::with_capacity(args.full_time.len() + args.contract.len());

    for arg in &args.full_time {
        employees.push(Employee::full_time(
            arg.id,
            arg.name.as_str(),
            Money::from_minor(arg.salary, currency),
        )?);
    }

    for arg in &args.contract {
        employees.push(Employee::contract(
            arg.id,
            arg.name.as_str(),
            Money::from_minor(arg.rate, currency),
            arg.days,
        )?);
    }

    let mut processor = PayrollProcessor::new();
    processor.subscribe(Rc::new(HrNotifier::new(io::stdout())));
    processor.subscribe(Rc::new(FinanceNotifier::new(io::stdout())));

    let slips = processor.process(&employees)?;

    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Type", "Gross", "Deductions", "Net"]);

    for slip in &slips {
        builder.push_record([
            slip.employee_id.to_string(),
            slip.name.clone(),
            slip.kind.to_string(),
            format!("{}", slip.gross),
            format!("{}", slip.deductions),
            format!("{}", slip.net),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..6), Alignment::right());

    writeln!(io::stdout().lock(), "\n{table}")?;

    Ok(())
}
