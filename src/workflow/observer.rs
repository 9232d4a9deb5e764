//! Status Observers

use std::io;

use tracing::info;

use crate::{
    notifications::{ObserverError, Sink},
    orders::{Order, OrderStatus},
};

/// Observer notified after an order status change has been committed.
///
/// Observers run synchronously, in registration order, on the thread that requested
/// the change. Returning an error stops the remaining observers from running; the
/// status change itself stays committed.
pub trait StatusObserver {
    /// Called once per committed status change.
    ///
    /// # Errors
    ///
    /// Returns an [`ObserverError`] if the observer could not handle the change.
    fn on_status_changed(
        &self,
        order: &Order<'_>,
        previous: OrderStatus,
        next: OrderStatus,
    ) -> Result<(), ObserverError>;
}

impl<F> StatusObserver for F
where
    F: Fn(&Order<'_>, OrderStatus, OrderStatus) -> Result<(), ObserverError>,
{
    fn on_status_changed(
        &self,
        order: &Order<'_>,
        previous: OrderStatus,
        next: OrderStatus,
    ) -> Result<(), ObserverError> {
        self(order, previous, next)
    }
}

/// Tells the customer about every status change.
#[derive(Debug)]
pub struct CustomerNotifier<W> {
    sink: Sink<W>,
}

impl<W: io::Write> CustomerNotifier<W> {
    /// Create a notifier writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            sink: Sink::new(out),
        }
    }

    /// Notifications written so far.
    pub fn sink(&self) -> &Sink<W> {
        &self.sink
    }
}

impl<W: io::Write> StatusObserver for CustomerNotifier<W> {
    fn on_status_changed(
        &self,
        order: &Order<'_>,
        _previous: OrderStatus,
        next: OrderStatus,
    ) -> Result<(), ObserverError> {
        let customer = order.customer();

        info!(
            order_id = %order.id(),
            customer = %customer.email,
            status = %next,
            "customer notified"
        );

        self.sink
            .line(format_args!("[Customer] Order {} is now {next}", order.id()))
    }
}

/// Asks logistics to dispatch an order once it has shipped.
#[derive(Debug)]
pub struct LogisticsNotifier<W> {
    sink: Sink<W>,
}

impl<W: io::Write> LogisticsNotifier<W> {
    /// Create a notifier writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            sink: Sink::new(out),
        }
    }

    /// Dispatch requests written so far.
    pub fn sink(&self) -> &Sink<W> {
        &self.sink
    }
}

impl<W: io::Write> StatusObserver for LogisticsNotifier<W> {
    fn on_status_changed(
        &self,
        order: &Order<'_>,
        _previous: OrderStatus,
        next: OrderStatus,
    ) -> Result<(), ObserverError> {
        if next != OrderStatus::Shipped {
            return Ok(());
        }

        info!(order_id = %order.id(), "dispatch requested");

        self.sink
            .line(format_args!("[Logistics] Dispatch order {}", order.id()))
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::INR;
    use testresult::TestResult;

    use crate::{
        customers::{Customer, CustomerId},
        orders::OrderId,
    };

    use super::*;

    #[test]
    fn customer_notifier_reports_every_status() -> TestResult {
        let customer = Customer::new(CustomerId(1), "Klaus", "klaus@mail.com");
        let order = Order::new(OrderId(102), &customer, INR);
        let notifier = CustomerNotifier::new(Vec::new());

        notifier.on_status_changed(&order, OrderStatus::Created, OrderStatus::Paid)?;
        notifier.on_status_changed(&order, OrderStatus::Paid, OrderStatus::Packed)?;

        assert_eq!(
            String::from_utf8(notifier.sink().get().clone())?,
            "[Customer] Order 102 is now Paid\n[Customer] Order 102 is now Packed\n"
        );

        Ok(())
    }

    #[test]
    fn logistics_notifier_only_reacts_to_shipped() -> TestResult {
        let customer = Customer::new(CustomerId(1), "Kol", "kol@mail.com");
        let order = Order::new(OrderId(103), &customer, INR);
        let notifier = LogisticsNotifier::new(Vec::new());

        notifier.on_status_changed(&order, OrderStatus::Created, OrderStatus::Paid)?;
        notifier.on_status_changed(&order, OrderStatus::Packed, OrderStatus::Shipped)?;
        notifier.on_status_changed(&order, OrderStatus::Shipped, OrderStatus::Delivered)?;

        assert_eq!(
            String::from_utf8(notifier.sink().get().clone())?,
            "[Logistics] Dispatch order 103\n"
        );

        Ok(())
    }

    fn reject(_: &Order<'_>, _: OrderStatus, next: OrderStatus) -> Result<(), ObserverError> {
        Err(ObserverError::Rejected(format!("no {next}")))
    }

    #[test]
    fn functions_are_observers() -> TestResult {
        let customer = Customer::new(CustomerId(1), "Kol", "kol@mail.com");
        let order = Order::new(OrderId(1), &customer, INR);

        let result = reject.on_status_changed(&order, OrderStatus::Created, OrderStatus::Paid);

        assert!(matches!(result, Err(ObserverError::Rejected(reason)) if reason == "no Paid"));

        Ok(())
    }
}
