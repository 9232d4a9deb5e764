//! Customers

use std::fmt;

/// Catalog identifier of a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CustomerId(pub u32);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Customer identifier
    pub id: CustomerId,

    /// Customer name
    pub name: String,

    /// Contact email address
    pub email: String,
}

impl Customer {
    /// Create a new customer.
    pub fn new(id: CustomerId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}
