//! Orders

use std::fmt;

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::{customers::Customer, products::Product};

mod history;
mod status;

pub use history::StatusLogEntry;
pub use status::OrderStatus;

/// Unique order identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderId(pub u32);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised while building an order or computing its totals.
#[derive(Debug, Error, PartialEq)]
pub enum OrderError {
    /// Line quantities must be positive.
    #[error("Invalid line quantity {quantity}; quantity must be greater than zero")]
    InvalidLine {
        /// Rejected quantity
        quantity: u32,
    },

    /// A product's currency differs from the order currency (product currency, order currency).
    #[error("Product has currency {0}, but order has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// A line or order total does not fit in minor units.
    #[error("Order total overflowed")]
    Overflow,
}

/// A product and the quantity ordered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderLine<'a> {
    product: &'a Product<'a>,
    quantity: u32,
}

impl<'a> OrderLine<'a> {
    /// The ordered product.
    pub fn product(&self) -> &'a Product<'a> {
        self.product
    }

    /// Quantity ordered, always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Overflow`] if the value does not fit in minor units.
    pub fn value(&self) -> Result<Money<'a, Currency>, OrderError> {
        let price = &self.product.price;

        let minor = price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .ok_or(OrderError::Overflow)?;

        Ok(Money::from_minor(minor, price.currency()))
    }
}

/// An order: its lines, current status and the log of status changes.
///
/// Status is only ever changed through [`crate::workflow::OrderWorkflow`].
#[derive(Debug, Clone)]
pub struct Order<'a> {
    id: OrderId,
    customer: &'a Customer,
    currency: &'static Currency,
    lines: Vec<OrderLine<'a>>,
    status: OrderStatus,
    history: SmallVec<[StatusLogEntry; 5]>,
}

impl<'a> Order<'a> {
    /// Create an empty order in `Created` status.
    pub fn new(id: OrderId, customer: &'a Customer, currency: &'static Currency) -> Self {
        Self {
            id,
            customer,
            currency,
            lines: Vec::new(),
            status: OrderStatus::Created,
            history: SmallVec::new(),
        }
    }

    /// Append a line for `quantity` units of `product`.
    ///
    /// Adding a product that is already on the order appends a second line.
    ///
    /// # Errors
    ///
    /// - [`OrderError::InvalidLine`]: `quantity` is zero.
    /// - [`OrderError::CurrencyMismatch`]: the product is priced in another currency.
    pub fn add_line(&mut self, product: &'a Product<'a>, quantity: u32) -> Result<(), OrderError> {
        if quantity == 0 {
            return Err(OrderError::InvalidLine { quantity });
        }

        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(OrderError::CurrencyMismatch(
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        debug!(order_id = %self.id, product_id = %product.id, quantity, "adding order line");

        self.lines.push(OrderLine { product, quantity });

        Ok(())
    }

    /// Sum of every line value.
    ///
    /// An order without lines totals zero in the order currency.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Overflow`] if the total does not fit in minor units.
    pub fn total(&self) -> Result<Money<'a, Currency>, OrderError> {
        let minor = self.lines.iter().try_fold(0_i64, |acc, line| {
            acc.checked_add(line.value()?.to_minor_units())
                .ok_or(OrderError::Overflow)
        })?;

        Ok(Money::from_minor(minor, self.currency))
    }

    /// Order identifier
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// The customer who placed the order.
    pub fn customer(&self) -> &'a Customer {
        self.customer
    }

    /// Currency every line is priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Current status
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[OrderLine<'a>] {
        &self.lines
    }

    /// Committed status changes, oldest first.
    pub fn status_history(&self) -> &[StatusLogEntry] {
        &self.history
    }

    /// Log the change and move to `next`, returning the previous status.
    pub(crate) fn apply_status(&mut self, next: OrderStatus) -> OrderStatus {
        let previous = self.status;

        self.history.push(StatusLogEntry::now(previous, next));
        self.status = next;

        previous
    }
}
