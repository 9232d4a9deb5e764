//! Order Report

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::orders::{Order, OrderError};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The order total could not be computed.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// Writing to the output failed.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

/// Renders an order as a table of lines followed by its total and status history.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderReport;

impl OrderReport {
    /// Write the report for `order` to `out`.
    ///
    /// # Errors
    ///
    /// - [`ReportError::Order`]: a line value or the total overflowed.
    /// - [`ReportError::Io`]: the writer failed.
    pub fn write_to(mut out: impl io::Write, order: &Order<'_>) -> Result<(), ReportError> {
        let customer = order.customer();

        writeln!(
            out,
            "\nOrder {} for {} <{}>",
            order.id(),
            customer.name,
            customer.email
        )?;

        let mut builder = Builder::default();

        builder.push_record(["#", "Product", "Category", "Unit Price", "Qty", "Line Total"]);

        for (idx, line) in order.lines().iter().enumerate() {
            let product = line.product();

            builder.push_record([
                (idx + 1).to_string(),
                product.name.clone(),
                product.category.clone(),
                format!("{}", product.price),
                line.quantity().to_string(),
                format!("{}", line.value()?),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(
            1,
            HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
        );

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(3..6), Alignment::right());

        writeln!(out, "{table}")?;
        writeln!(out, " Total: {}", order.total()?)?;
        writeln!(out, " Status: {}", order.status())?;

        if order.status_history().is_empty() {
            writeln!(out, " History: none")?;
        } else {
            writeln!(out, " History:")?;

            for entry in order.status_history() {
                writeln!(
                    out,
                    "   {} → {} at {}",
                    entry.previous, entry.next, entry.changed_at
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::INR};
    use testresult::TestResult;

    use crate::{
        customers::{Customer, CustomerId},
        orders::{OrderId, OrderStatus},
        products::{Product, ProductId},
        workflow::OrderWorkflow,
    };

    use super::*;

    #[test]
    fn write_to_renders_lines_total_and_history() -> TestResult {
        let customer = Customer::new(CustomerId(2), "Klaus", "klaus@mail.com");
        let book = Product::new(ProductId(3), "Book", Money::from_minor(50_000, INR), "Education");
        let phone = Product::new(
            ProductId(2),
            "Phone",
            Money::from_minor(3_000_000, INR),
            "Electronics",
        );

        let mut order = Order::new(OrderId(102), &customer, INR);
        order.add_line(&book, 2)?;
        order.add_line(&phone, 1)?;

        OrderWorkflow::new().request_transition(&mut order, OrderStatus::Paid)?;

        let mut out = Vec::new();
        OrderReport::write_to(&mut out, &order)?;

        let output = String::from_utf8(out)?;

        assert!(output.contains("Order 102 for Klaus <klaus@mail.com>"));
        assert!(output.contains("Book"));
        assert!(output.contains("Electronics"));
        assert!(output.contains(&format!(" Total: {}", order.total()?)));
        assert!(output.contains(" Status: Paid"));
        assert!(output.contains("Created → Paid at "));

        Ok(())
    }

    #[test]
    fn write_to_handles_empty_orders() -> TestResult {
        let customer = Customer::new(CustomerId(1), "Elijah", "elijah@mail.com");
        let order = Order::new(OrderId(101), &customer, INR);

        let mut out = Vec::new();
        OrderReport::write_to(&mut out, &order)?;

        let output = String::from_utf8(out)?;

        assert!(output.contains(" Status: Created"));
        assert!(output.contains(" History: none"));

        Ok(())
    }

    #[test]
    fn write_to_reports_overflowing_totals() -> TestResult {
        let customer = Customer::new(CustomerId(1), "Elijah", "elijah@mail.com");
        let huge = Product::new(ProductId(1), "Huge", Money::from_minor(i64::MAX, INR), "Test");

        let mut order = Order::new(OrderId(1), &customer, INR);
        order.add_line(&huge, 2)?;

        let result = OrderReport::write_to(Vec::new(), &order);

        assert!(matches!(result, Err(ReportError::Order(OrderError::Overflow))));

        Ok(())
    }
}
