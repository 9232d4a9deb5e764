use std::{
    io::{self, Write},
    rc::Rc,
};

use clap::Args;
use orderflow::{
    catalog::Catalog,
    orders::{Order, OrderStatus},
    report::OrderReport,
    workflow::{CustomerNotifier, LogisticsNotifier, OrderWorkflow, WorkflowError},
};
use anyhow::bail;
use tracing::info;

use crate::config::StoreConfig;

#[derive(Debug, Args)]
pub(crate) struct OrdersArgs {
    /// Catalog fixture set to load; the built-in demo catalog when omitted
    #[arg(long)]
    set: Option<String>,

    /// Order to cancel once paid instead of fulfilling
    #[arg(long)]
    cancel: Option<u32>,
}

pub(crate) fn run(store: &StoreConfig, args: &OrdersArgs) -> anyhow::Result<()> {
    let catalog = match &args.set {
        Some(name) => {
            let mut catalog = Catalog::with_base_path(&store.fixtures);
            catalog.load(name)?;
            catalog
        }
        None => Catalog::builtin(),
    };

    let mut orders = catalog.open_orders()?;

    info!(orders = orders.len(), "orders opened");

    check_cancel_target(&orders, args.cancel)?;

    let mut workflow = OrderWorkflow::new();
    workflow.subscribe(Rc::new(CustomerNotifier::new(io::stdout())));
    workflow.subscribe(Rc::new(LogisticsNotifier::new(io::stdout())));

    for order in &mut orders {
        if args.cancel == Some(order.id().0) {
            workflow.request_transition(order, OrderStatus::Paid)?;
            workflow.cancel(order)?;
        } else {
            fulfil(&workflow, order)?;
        }
    }

    let mut out = io::stdout().lock();

    // Fulfilled and cancelled orders must refuse to be paid again.
    let repeat = orders
        .first_mut()
        .map(|order| workflow.request_transition(order, OrderStatus::Paid));

    if let Some(Err(error)) = repeat {
        writeln!(out, "Rejected: {error}")?;
    }

    for order in &orders {
        OrderReport::write_to(&mut out, order)?;
    }

    Ok(())
}

/// The order named by `--cancel` must be one of the opened orders.
fn check_cancel_target(orders: &[Order<'_>], cancel: Option<u32>) -> anyhow::Result<()> {
    match cancel {
        Some(id) if !orders.iter().any(|order| order.id().0 == id) => {
            bail!("--cancel {id}: no such order in the catalog")
        }
        _ => Ok(()),
    }
}

fn fulfil(workflow: &OrderWorkflow, order: &mut Order<'_>) -> Result<(), WorkflowError> {
    for &target in OrderStatus::PATH.iter().skip(1) {
        workflow.request_transition(order, target)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn cancel_target_must_be_an_opened_order() -> TestResult {
        let catalog = Catalog::builtin();
        let orders = catalog.open_orders()?;

        check_cancel_target(&orders, None)?;
        check_cancel_target(&orders, Some(102))?;

        let error = check_cancel_target(&orders, Some(999))
            .err()
            .ok_or("Expected order 999 to be rejected")?;

        assert_eq!(error.to_string(), "--cancel 999: no such order in the catalog");

        Ok(())
    }
}
