//! Catalog
//!
//! Products and customers available to orders, loaded from YAML fixture sets or
//! taken from the built-in demo data.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{Currency, INR},
};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::{
    customers::{Customer, CustomerId},
    money::{MoneyParseError, currency_from_code},
    orders::{Order, OrderError, OrderId},
    products::{Product, ProductId},
};

pub mod fixtures;

/// Catalog loading and lookup errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price
    #[error(transparent)]
    Price(#[from] MoneyParseError),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Two products share an id
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(ProductId),

    /// Two customers share an id
    #[error("Duplicate customer id: {0}")]
    DuplicateCustomer(CustomerId),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Customer not found
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// Two order seeds share an id
    #[error("Duplicate order id: {0}")]
    DuplicateOrder(OrderId),

    /// A seeded order line was rejected
    #[error("Order {0} could not be opened: {1}")]
    Order(OrderId, #[source] OrderError),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,
}

/// An order to open against the catalog: who placed it and what they asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSeed {
    /// Order identifier
    pub id: OrderId,

    /// Customer placing the order
    pub customer: CustomerId,

    /// Product and quantity per line
    pub lines: SmallVec<[(ProductId, u32); 4]>,
}

/// Catalog
#[derive(Debug)]
pub struct Catalog<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Products and customers in the order they were added
    products: Vec<Product<'a>>,
    customers: Vec<Customer>,

    /// Id -> position mappings for lookups
    product_index: FxHashMap<ProductId, usize>,
    customer_index: FxHashMap<CustomerId, usize>,

    /// Currency shared by every product
    currency: Option<&'static Currency>,

    /// Orders to open, in listing order
    order_seeds: Vec<OrderSeed>,
}

impl<'a> Catalog<'a> {
    /// Create a new empty catalog with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty catalog with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: Vec::new(),
            customers: Vec::new(),
            product_index: FxHashMap::default(),
            customer_index: FxHashMap::default(),
            currency: None,
            order_seeds: Vec::new(),
        }
    }

    /// Load products and customers from `catalog/<name>.yml` under the base path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a price is invalid,
    /// if an id is already taken, or if currencies are mixed.
    pub fn load(&mut self, name: &str) -> Result<&mut Self, CatalogError> {
        let file_path = self.base_path.join("catalog").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: fixtures::CatalogFixture = serde_norway::from_str(&contents)?;

        if let Some(code) = &fixture.currency {
            self.declare_currency(currency_from_code(code)?)?;
        }

        for product_fixture in fixture.products {
            self.add_product(product_fixture.try_into()?)?;
        }

        for customer_fixture in fixture.customers {
            self.add_customer(customer_fixture.into())?;
        }

        for order_fixture in fixture.orders {
            self.add_order_seed(order_fixture.into())?;
        }

        debug!(
            set = name,
            products = self.products.len(),
            customers = self.customers.len(),
            orders = self.order_seeds.len(),
            "catalog loaded"
        );

        Ok(self)
    }

    /// Load a catalog set from the default base path.
    ///
    /// # Errors
    ///
    /// Returns an error if the set cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();

        catalog.load(name)?;

        Ok(catalog)
    }

    /// Add a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is already taken, the price currency is not one the
    /// catalog supports, or it differs from products already in the catalog.
    pub fn add_product(&mut self, product: Product<'a>) -> Result<&mut Self, CatalogError> {
        if self.product_index.contains_key(&product.id) {
            return Err(CatalogError::DuplicateProduct(product.id));
        }

        let currency = currency_from_code(product.price.currency().iso_alpha_code)?;
        self.declare_currency(currency)?;

        self.product_index.insert(product.id, self.products.len());
        self.products.push(product);

        Ok(self)
    }

    /// Fix the catalog currency, or check `currency` against the one already fixed.
    fn declare_currency(&mut self, currency: &'static Currency) -> Result<(), CatalogError> {
        match self.currency {
            Some(existing) if existing != currency => Err(CatalogError::CurrencyMismatch(
                existing.iso_alpha_code.to_string(),
                currency.iso_alpha_code.to_string(),
            )),
            Some(_) => Ok(()),
            None => {
                self.currency = Some(currency);
                Ok(())
            }
        }
    }

    /// Add a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is already taken.
    pub fn add_customer(&mut self, customer: Customer) -> Result<&mut Self, CatalogError> {
        if self.customer_index.contains_key(&customer.id) {
            return Err(CatalogError::DuplicateCustomer(customer.id));
        }

        self.customer_index
            .insert(customer.id, self.customers.len());
        self.customers.push(customer);

        Ok(self)
    }

    /// Add an order seed. Products and customers are only looked up when the order is
    /// opened.
    ///
    /// # Errors
    ///
    /// Returns an error if another seed already uses the id.
    pub fn add_order_seed(&mut self, seed: OrderSeed) -> Result<&mut Self, CatalogError> {
        if self.order_seeds.iter().any(|existing| existing.id == seed.id) {
            return Err(CatalogError::DuplicateOrder(seed.id));
        }

        self.order_seeds.push(seed);

        Ok(self)
    }

    /// Order seeds, in listing order
    pub fn order_seeds(&self) -> &[OrderSeed] {
        &self.order_seeds
    }

    /// Open a `Created` order for every seed, borrowing customers and products from the
    /// catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if a seed names an unknown customer or product, if a line is
    /// rejected by the order, or if no currency is known.
    pub fn open_orders(&self) -> Result<Vec<Order<'_>>, CatalogError> {
        self.order_seeds
            .iter()
            .map(|seed| self.open_order(seed))
            .collect()
    }

    fn open_order(&self, seed: &OrderSeed) -> Result<Order<'_>, CatalogError> {
        let mut order = Order::new(seed.id, self.customer(seed.customer)?, self.currency()?);

        for &(product_id, quantity) in &seed.lines {
            order
                .add_line(self.product(product_id)?, quantity)
                .map_err(|source| CatalogError::Order(seed.id, source))?;
        }

        Ok(order)
    }

    /// Get a product by id
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, id: ProductId) -> Result<&Product<'a>, CatalogError> {
        self.product_index
            .get(&id)
            .and_then(|&idx| self.products.get(idx))
            .ok_or(CatalogError::ProductNotFound(id))
    }

    /// Get a customer by id
    ///
    /// # Errors
    ///
    /// Returns an error if the customer is not found.
    pub fn customer(&self, id: CustomerId) -> Result<&Customer, CatalogError> {
        self.customer_index
            .get(&id)
            .and_then(|&idx| self.customers.get(idx))
            .ok_or(CatalogError::CustomerNotFound(id))
    }

    /// All products, in the order they were added
    pub fn products(&self) -> &[Product<'a>] {
        &self.products
    }

    /// All customers, in the order they were added
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been added yet.
    pub fn currency(&self) -> Result<&'static Currency, CatalogError> {
        self.currency.ok_or(CatalogError::NoCurrency)
    }
}

impl Catalog<'static> {
    /// The demo store: five products priced in rupees and three customers.
    pub fn builtin() -> Self {
        let products = [
            (1, "Laptop", 6_000_000, "Electronics"),
            (2, "Phone", 3_000_000, "Electronics"),
            (3, "Book", 50_000, "Education"),
            (4, "Headphones", 200_000, "Accessories"),
            (5, "Keyboard", 150_000, "Accessories"),
        ];

        let customers = [
            (1, "Elijah", "elijah@mail.com"),
            (2, "Klaus", "klaus@mail.com"),
            (3, "Kol", "kol@mail.com"),
        ];

        let mut catalog = Self::new();

        for (idx, (id, name, minor, category)) in products.into_iter().enumerate() {
            catalog.product_index.insert(ProductId(id), idx);
            catalog.products.push(Product::new(
                ProductId(id),
                name,
                Money::from_minor(minor, INR),
                category,
            ));
        }

        for (idx, (id, name, email)) in customers.into_iter().enumerate() {
            catalog.customer_index.insert(CustomerId(id), idx);
            catalog
                .customers
                .push(Customer::new(CustomerId(id), name, email));
        }

        catalog.currency = Some(INR);

        let orders = [
            (101, 1, [(1, 1), (3, 2)].as_slice()),
            (102, 2, [(2, 3)].as_slice()),
            (103, 3, [(4, 1), (5, 1)].as_slice()),
        ];

        catalog.order_seeds = orders
            .into_iter()
            .map(|(id, customer, lines)| OrderSeed {
                id: OrderId(id),
                customer: CustomerId(customer),
                lines: lines
                    .iter()
                    .map(|&(product, quantity)| (ProductId(product), quantity))
                    .collect(),
            })
            .collect();

        catalog
    }
}

impl Default for Catalog<'_> {
    fn default() -> Self {
        Self::new()
    }
}
