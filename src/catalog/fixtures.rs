//! Catalog Fixtures

use rusty_money::Money;
use serde::Deserialize;

use crate::{
    catalog::{CatalogError, OrderSeed},
    customers::{Customer, CustomerId},
    money::parse_price,
    orders::OrderId,
    products::{Product, ProductId},
};

/// Wrapper for a catalog set in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Currency code every price must use (e.g., "INR")
    #[serde(default)]
    pub currency: Option<String>,

    /// Products, in listing order
    #[serde(default)]
    pub products: Vec<ProductFixture>,

    /// Customers, in listing order
    #[serde(default)]
    pub customers: Vec<CustomerFixture>,

    /// Orders to open against the catalog
    #[serde(default)]
    pub orders: Vec<OrderFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product identifier
    pub id: u32,

    /// Product name
    pub name: String,

    /// Product price (e.g., "60000.00 INR")
    pub price: String,

    /// Product category
    pub category: String,
}

/// Customer Fixture
#[derive(Debug, Deserialize)]
pub struct CustomerFixture {
    /// Customer identifier
    pub id: u32,

    /// Customer name
    pub name: String,

    /// Contact email
    pub email: String,
}

/// Order Fixture
#[derive(Debug, Deserialize)]
pub struct OrderFixture {
    /// Order identifier
    pub id: u32,

    /// Customer placing the order
    pub customer: u32,

    /// Lines, in order
    #[serde(default)]
    pub lines: Vec<LineFixture>,
}

/// Order Line Fixture
#[derive(Debug, Deserialize)]
pub struct LineFixture {
    /// Product identifier
    pub product: u32,

    /// Units ordered
    pub quantity: u32,
}

impl TryFrom<ProductFixture> for Product<'_> {
    type Error = CatalogError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        Ok(Product::new(
            ProductId(fixture.id),
            fixture.name,
            Money::from_minor(minor_units, currency),
            fixture.category,
        ))
    }
}

impl From<CustomerFixture> for Customer {
    fn from(fixture: CustomerFixture) -> Self {
        Customer::new(CustomerId(fixture.id), fixture.name, fixture.email)
    }
}

impl From<OrderFixture> for OrderSeed {
    fn from(fixture: OrderFixture) -> Self {
        OrderSeed {
            id: OrderId(fixture.id),
            customer: CustomerId(fixture.customer),
            lines: fixture
                .lines
                .into_iter()
                .map(|line| (ProductId(line.product), line.quantity))
                .collect(),
        }
    }
}
