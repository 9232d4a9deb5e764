//! Order Workflow
//!
//! Validates order status transitions and notifies registered observers once a
//! transition has been committed.

use std::{fmt, rc::Rc};

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    notifications::ObserverError,
    orders::{Order, OrderId, OrderStatus},
};

mod observer;

pub use observer::{CustomerNotifier, LogisticsNotifier, StatusObserver};

/// Errors raised by the order workflow.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The requested status is not reachable from the current one.
    ///
    /// The order is left unchanged and no observer is notified.
    #[error("Invalid transition for order {order}: {from} -> {to}")]
    InvalidTransition {
        /// Order the request was made against
        order: OrderId,
        /// Status at the time of the request
        from: OrderStatus,
        /// Requested status
        to: OrderStatus,
    },

    /// An observer failed after the transition was committed.
    ///
    /// The order keeps its new status and log entry; observers registered after the
    /// failing one were not notified.
    #[error("Observer failed for order {order}: {source}")]
    Observer {
        /// Order whose transition was being announced
        order: OrderId,
        /// The observer's error
        source: ObserverError,
    },
}

/// Drives orders through their status lifecycle and notifies observers.
#[derive(Default)]
pub struct OrderWorkflow {
    observers: Vec<Rc<dyn StatusObserver>>,
}

impl fmt::Debug for OrderWorkflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderWorkflow")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl OrderWorkflow {
    /// Create a workflow with no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. Observers are notified in registration order.
    pub fn subscribe(&mut self, observer: Rc<dyn StatusObserver>) {
        self.observers.push(observer);
    }

    /// Register a function or closure as an observer.
    pub fn subscribe_fn<F>(&mut self, observer: F)
    where
        F: Fn(&Order<'_>, OrderStatus, OrderStatus) -> Result<(), ObserverError> + 'static,
    {
        self.subscribe(Rc::new(observer));
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Move `order` to `target`, which must be the legal successor of its current status.
    ///
    /// # Errors
    ///
    /// - [`WorkflowError::InvalidTransition`]: the order is cancelled, or `target` is not
    ///   the next status on the fulfilment path. Nothing is changed.
    /// - [`WorkflowError::Observer`]: the transition was committed but an observer failed.
    pub fn request_transition(
        &self,
        order: &mut Order<'_>,
        target: OrderStatus,
    ) -> Result<(), WorkflowError> {
        let current = order.status();

        let allowed =
            current != OrderStatus::Cancelled && current.legal_successor() == Some(target);

        if !allowed {
            return Err(reject(order, target));
        }

        self.commit(order, target)
    }

    /// Cancel `order`. Any status that is not terminal can be cancelled.
    ///
    /// # Errors
    ///
    /// - [`WorkflowError::InvalidTransition`]: the order is already delivered or cancelled.
    /// - [`WorkflowError::Observer`]: the cancellation was committed but an observer failed.
    pub fn cancel(&self, order: &mut Order<'_>) -> Result<(), WorkflowError> {
        if order.status().is_terminal() {
            return Err(reject(order, OrderStatus::Cancelled));
        }

        self.commit(order, OrderStatus::Cancelled)
    }

    fn commit(&self, order: &mut Order<'_>, target: OrderStatus) -> Result<(), WorkflowError> {
        let previous = order.apply_status(target);

        info!(order_id = %order.id(), from = %previous, to = %target, "order status changed");

        for observer in &self.observers {
            observer
                .on_status_changed(order, previous, target)
                .map_err(|source| {
                    warn!(order_id = %order.id(), error = %source, "status observer failed");

                    WorkflowError::Observer {
                        order: order.id(),
                        source,
                    }
                })?;
        }

        Ok(())
    }
}

fn reject(order: &Order<'_>, target: OrderStatus) -> WorkflowError {
    warn!(
        order_id = %order.id(),
        from = %order.status(),
        to = %target,
        "invalid status transition"
    );

    WorkflowError::InvalidTransition {
        order: order.id(),
        from: order.status(),
        to: target,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use rusty_money::iso::INR;
    use testresult::TestResult;

    use crate::customers::{Customer, CustomerId};

    use super::*;

    type Calls = Rc<RefCell<Vec<(&'static str, OrderStatus, OrderStatus)>>>;

    fn customer() -> Customer {
        Customer::new(CustomerId(1), "Elijah", "elijah@mail.com")
    }

    fn recording(workflow: &mut OrderWorkflow, name: &'static str, calls: &Calls) {
        let calls = Rc::clone(calls);

        workflow.subscribe_fn(move |_, previous, next| {
            calls.borrow_mut().push((name, previous, next));
            Ok(())
        });
    }

    #[test]
    fn skipping_a_step_is_rejected_without_side_effects() {
        let customer = customer();
        let mut order = Order::new(OrderId(1), &customer, INR);
        let calls = Calls::default();

        let mut workflow = OrderWorkflow::new();
        recording(&mut workflow, "first", &calls);

        let result = workflow.request_transition(&mut order, OrderStatus::Packed);

        assert!(matches!(
            result,
            Err(WorkflowError::InvalidTransition {
                from: OrderStatus::Created,
                to: OrderStatus::Packed,
                ..
            })
        ));
        assert_eq!(order.status(), OrderStatus::Created);
        assert!(order.status_history().is_empty());
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn legal_transition_logs_and_notifies_once() -> TestResult {
        let customer = customer();
        let mut order = Order::new(OrderId(1), &customer, INR);
        let calls = Calls::default();

        let mut workflow = OrderWorkflow::new();
        recording(&mut workflow, "first", &calls);
        recording(&mut workflow, "second", &calls);

        workflow.request_transition(&mut order, OrderStatus::Paid)?;

        assert_eq!(order.status(), OrderStatus::Paid);
        assert_eq!(order.status_history().len(), 1);
        assert_eq!(
            *calls.borrow(),
            vec![
                ("first", OrderStatus::Created, OrderStatus::Paid),
                ("second", OrderStatus::Created, OrderStatus::Paid),
            ]
        );

        Ok(())
    }

    #[test]
    fn repeating_current_status_is_rejected() -> TestResult {
        let customer = customer();
        let mut order = Order::new(OrderId(1), &customer, INR);
        let workflow = OrderWorkflow::new();

        workflow.request_transition(&mut order, OrderStatus::Paid)?;

        let result = workflow.request_transition(&mut order, OrderStatus::Paid);

        assert!(matches!(
            result,
            Err(WorkflowError::InvalidTransition { .. })
        ));
        assert_eq!(order.status_history().len(), 1);

        Ok(())
    }

    #[test]
    fn moving_backwards_is_rejected() -> TestResult {
        let customer = customer();
        let mut order = Order::new(OrderId(1), &customer, INR);
        let workflow = OrderWorkflow::new();

        workflow.request_transition(&mut order, OrderStatus::Paid)?;
        workflow.request_transition(&mut order, OrderStatus::Packed)?;

        let result = workflow.request_transition(&mut order, OrderStatus::Paid);

        assert!(matches!(
            result,
            Err(WorkflowError::InvalidTransition {
                from: OrderStatus::Packed,
                to: OrderStatus::Paid,
                ..
            })
        ));
        assert_eq!(order.status(), OrderStatus::Packed);

        Ok(())
    }

    #[test]
    fn cancelled_cannot_be_requested_as_a_transition() {
        let customer = customer();
        let mut order = Order::new(OrderId(1), &customer, INR);
        let workflow = OrderWorkflow::new();

        let result = workflow.request_transition(&mut order, OrderStatus::Cancelled);

        assert!(matches!(
            result,
            Err(WorkflowError::InvalidTransition { .. })
        ));
        assert_eq!(order.status(), OrderStatus::Created);
    }

    #[test]
    fn cancel_is_logged_and_notified() -> TestResult {
        let customer = customer();
        let mut order = Order::new(OrderId(1), &customer, INR);
        let calls = Calls::default();

        let mut workflow = OrderWorkflow::new();
        recording(&mut workflow, "first", &calls);

        workflow.request_transition(&mut order, OrderStatus::Paid)?;
        workflow.cancel(&mut order)?;

        assert_eq!(order.status(), OrderStatus::Cancelled);
        assert_eq!(
            calls.borrow().last(),
            Some(&("first", OrderStatus::Paid, OrderStatus::Cancelled))
        );

        Ok(())
    }

    #[test]
    fn cancelled_orders_reject_everything() -> TestResult {
        let customer = customer();
        let mut order = Order::new(OrderId(1), &customer, INR);
        let workflow = OrderWorkflow::new();

        workflow.cancel(&mut order)?;

        for target in OrderStatus::PATH {
            assert!(
                workflow.request_transition(&mut order, target).is_err(),
                "{target} should be rejected after cancellation"
            );
        }

        assert!(matches!(
            workflow.cancel(&mut order),
            Err(WorkflowError::InvalidTransition {
                from: OrderStatus::Cancelled,
                ..
            })
        ));
        assert_eq!(order.status_history().len(), 1);

        Ok(())
    }

    #[test]
    fn delivered_orders_cannot_be_cancelled() -> TestResult {
        let customer = customer();
        let mut order = Order::new(OrderId(1), &customer, INR);
        let workflow = OrderWorkflow::new();

        for target in [
            OrderStatus::Paid,
            OrderStatus::Packed,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
        ] {
            workflow.request_transition(&mut order, target)?;
        }

        assert!(workflow.cancel(&mut order).is_err(), "delivered is terminal");
        assert_eq!(order.status(), OrderStatus::Delivered);

        Ok(())
    }

    #[test]
    fn failing_observer_keeps_transition_and_stops_chain() {
        let customer = customer();
        let mut order = Order::new(OrderId(7), &customer, INR);
        let calls = Calls::default();

        let mut workflow = OrderWorkflow::new();
        recording(&mut workflow, "before", &calls);
        workflow.subscribe_fn(|_, _, _| Err(ObserverError::Rejected("offline".to_string())));
        recording(&mut workflow, "after", &calls);

        let result = workflow.request_transition(&mut order, OrderStatus::Paid);

        assert!(matches!(
            result,
            Err(WorkflowError::Observer {
                order: OrderId(7),
                source: ObserverError::Rejected(_),
            })
        ));
        assert_eq!(order.status(), OrderStatus::Paid);
        assert_eq!(order.status_history().len(), 1);
        assert_eq!(
            *calls.borrow(),
            vec![("before", OrderStatus::Created, OrderStatus::Paid)]
        );
    }

    #[test]
    fn debug_reports_observer_count() {
        let mut workflow = OrderWorkflow::new();
        workflow.subscribe_fn(|_, _, _| Ok(()));

        assert_eq!(workflow.observer_count(), 1);
        assert_eq!(format!("{workflow:?}"), "OrderWorkflow { observers: 1 }");
    }
}
