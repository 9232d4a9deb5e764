//! Sales
//!
//! Profit or loss on a single retail sale.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy, prelude::FromPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors raised while recording a sale.
#[derive(Debug, Error, PartialEq)]
pub enum SalesError {
    /// Invoice number was empty or whitespace.
    #[error("Invoice number cannot be empty")]
    MissingInvoice,

    /// Quantity must be greater than zero.
    #[error("Quantity must be greater than zero")]
    InvalidQuantity,

    /// Purchase amount must be greater than zero.
    #[error("Purchase amount must be greater than zero")]
    InvalidPurchaseAmount,

    /// Selling amount cannot be negative.
    #[error("Selling amount cannot be negative")]
    InvalidSellingAmount,

    /// Purchase and selling amounts use different currencies.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Result of comparing selling and purchase amounts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfitOrLoss<'a> {
    /// Sold for more than it cost, by this amount.
    Profit(Money<'a, Currency>),

    /// Sold for less than it cost, by this amount.
    Loss(Money<'a, Currency>),

    /// Sold for exactly what it cost.
    BreakEven,
}

impl<'a> ProfitOrLoss<'a> {
    /// Size of the profit or loss, ignoring direction. `None` when breaking even.
    pub fn amount(&self) -> Option<Money<'a, Currency>> {
        match self {
            ProfitOrLoss::Profit(amount) | ProfitOrLoss::Loss(amount) => Some(*amount),
            ProfitOrLoss::BreakEven => None,
        }
    }
}

impl fmt::Display for ProfitOrLoss<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfitOrLoss::Profit(_) => f.write_str("PROFIT"),
            ProfitOrLoss::Loss(_) => f.write_str("LOSS"),
            ProfitOrLoss::BreakEven => f.write_str("BREAK-EVEN"),
        }
    }
}

/// One sale: what was bought, what it cost and what it sold for.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleTransaction<'a> {
    invoice_no: String,
    customer_name: String,
    item_name: String,
    quantity: u32,
    purchase_amount: Money<'a, Currency>,
    selling_amount: Money<'a, Currency>,
}

impl<'a> SaleTransaction<'a> {
    /// Create a validated sale. Text fields are trimmed.
    ///
    /// # Errors
    ///
    /// - [`SalesError::MissingInvoice`]: the invoice number is blank.
    /// - [`SalesError::InvalidQuantity`]: quantity is zero.
    /// - [`SalesError::InvalidPurchaseAmount`]: purchase amount is not positive.
    /// - [`SalesError::InvalidSellingAmount`]: selling amount is negative.
    /// - [`SalesError::Money`]: the amounts use different currencies.
    pub fn new(
        invoice_no: &str,
        customer_name: &str,
        item_name: &str,
        quantity: u32,
        purchase_amount: Money<'a, Currency>,
        selling_amount: Money<'a, Currency>,
    ) -> Result<Self, SalesError> {
        let invoice_no = invoice_no.trim();

        if invoice_no.is_empty() {
            return Err(SalesError::MissingInvoice);
        }

        if quantity == 0 {
            return Err(SalesError::InvalidQuantity);
        }

        if purchase_amount.to_minor_units() <= 0 {
            return Err(SalesError::InvalidPurchaseAmount);
        }

        if selling_amount.to_minor_units() < 0 {
            return Err(SalesError::InvalidSellingAmount);
        }

        if purchase_amount.currency() != selling_amount.currency() {
            return Err(SalesError::Money(MoneyError::CurrencyMismatch {
                expected: purchase_amount.currency().iso_alpha_code,
                actual: selling_amount.currency().iso_alpha_code,
            }));
        }

        Ok(Self {
            invoice_no: invoice_no.to_string(),
            customer_name: customer_name.trim().to_string(),
            item_name: item_name.trim().to_string(),
            quantity,
            purchase_amount,
            selling_amount,
        })
    }

    /// Whether the sale made a profit, a loss, or broke even.
    ///
    /// # Errors
    ///
    /// Returns [`SalesError::Money`] if the subtraction fails.
    pub fn outcome(&self) -> Result<ProfitOrLoss<'a>, SalesError> {
        let selling = self.selling_amount.to_minor_units();
        let purchase = self.purchase_amount.to_minor_units();

        Ok(match selling.cmp(&purchase) {
            std::cmp::Ordering::Greater => {
                ProfitOrLoss::Profit(self.selling_amount.sub(self.purchase_amount)?)
            }
            std::cmp::Ordering::Less => {
                ProfitOrLoss::Loss(self.purchase_amount.sub(self.selling_amount)?)
            }
            std::cmp::Ordering::Equal => ProfitOrLoss::BreakEven,
        })
    }

    /// Profit or loss as a percentage of the purchase amount, to two decimal places.
    ///
    /// # Errors
    ///
    /// Returns [`SalesError::Money`] if the outcome cannot be computed.
    pub fn margin_percent(&self) -> Result<Decimal, SalesError> {
        let Some(amount) = self.outcome()?.amount() else {
            return Ok(Decimal::ZERO);
        };

        let margin = Decimal::from_i64(amount.to_minor_units())
            .zip(Decimal::from_i64(self.purchase_amount.to_minor_units()))
            .and_then(|(amount, purchase)| amount.checked_div(purchase))
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO);

        Ok(margin.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Invoice number
    pub fn invoice_no(&self) -> &str {
        &self.invoice_no
    }

    /// Customer name
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Item sold
    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    /// Units sold
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// What the stock cost
    pub fn purchase_amount(&self) -> Money<'a, Currency> {
        self.purchase_amount
    }

    /// What the stock sold for
    pub fn selling_amount(&self) -> Money<'a, Currency> {
        self.selling_amount
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{INR, USD};
    use testresult::TestResult;

    use super::*;

    fn sale(purchase: i64, selling: i64) -> Result<SaleTransaction<'static>, SalesError> {
        SaleTransaction::new(
            "INV-1",
            "Caroline",
            "Lamp",
            2,
            Money::from_minor(purchase, INR),
            Money::from_minor(selling, INR),
        )
    }

    #[test]
    fn profit_and_margin() -> TestResult {
        let sale = sale(100_000, 125_000)?;

        assert_eq!(
            sale.outcome()?,
            ProfitOrLoss::Profit(Money::from_minor(25_000, INR))
        );
        assert_eq!(sale.margin_percent()?, Decimal::new(2500, 2));

        Ok(())
    }

    #[test]
    fn loss_and_margin() -> TestResult {
        let sale = sale(30_000, 20_000)?;

        assert_eq!(
            sale.outcome()?,
            ProfitOrLoss::Loss(Money::from_minor(10_000, INR))
        );
        assert_eq!(sale.margin_percent()?, Decimal::new(3333, 2));
        assert_eq!(sale.outcome()?.to_string(), "LOSS");

        Ok(())
    }

    #[test]
    fn margin_rounds_half_away_from_zero() -> TestResult {
        let sale = sale(800, 799)?;

        assert_eq!(sale.margin_percent()?, Decimal::new(13, 2));

        Ok(())
    }

    #[test]
    fn break_even_has_zero_margin() -> TestResult {
        let sale = sale(5_000, 5_000)?;

        assert_eq!(sale.outcome()?, ProfitOrLoss::BreakEven);
        assert_eq!(sale.outcome()?.amount(), None);
        assert_eq!(sale.margin_percent()?, Decimal::ZERO);
        assert_eq!(sale.outcome()?.to_string(), "BREAK-EVEN");

        Ok(())
    }

    #[test]
    fn selling_for_nothing_is_a_total_loss() -> TestResult {
        let sale = sale(5_000, 0)?;

        assert_eq!(sale.margin_percent()?, Decimal::new(10_000, 2));

        Ok(())
    }

    #[test]
    fn validation_errors() {
        assert_eq!(
            SaleTransaction::new(
                " ",
                "",
                "",
                1,
                Money::from_minor(1, INR),
                Money::from_minor(1, INR)
            ),
            Err(SalesError::MissingInvoice)
        );
        assert_eq!(
            SaleTransaction::new(
                "INV",
                "",
                "",
                0,
                Money::from_minor(1, INR),
                Money::from_minor(1, INR)
            ),
            Err(SalesError::InvalidQuantity)
        );
        assert_eq!(sale(0, 1), Err(SalesError::InvalidPurchaseAmount));
        assert_eq!(sale(1, -1), Err(SalesError::InvalidSellingAmount));
    }

    #[test]
    fn currency_mismatch_is_rejected() {
        let result = SaleTransaction::new(
            "INV",
            "",
            "",
            1,
            Money::from_minor(100, INR),
            Money::from_minor(100, USD),
        );

        assert!(matches!(result, Err(SalesError::Money(_))));
    }

    #[test]
    fn text_fields_are_trimmed() -> TestResult {
        let sale = SaleTransaction::new(
            " INV-9 ",
            " Bonnie ",
            " Grimoire ",
            1,
            Money::from_minor(100, INR),
            Money::from_minor(150, INR),
        )?;

        assert_eq!(sale.invoice_no(), "INV-9");
        assert_eq!(sale.customer_name(), "Bonnie");
        assert_eq!(sale.item_name(), "Grimoire");

        Ok(())
    }
}
