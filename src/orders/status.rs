//! Order Status

use std::fmt;

/// Lifecycle status of an order.
///
/// Orders move along `Created → Paid → Packed → Shipped → Delivered`. `Cancelled`
/// is absorbing and can be entered from any status that is not terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Order has been created
    Created,

    /// Order has been paid
    Paid,

    /// Order has been packed
    Packed,

    /// Order has been shipped
    Shipped,

    /// Order has been delivered
    Delivered,

    /// Order has been cancelled
    Cancelled,
}

impl OrderStatus {
    /// The linear fulfilment path, in order.
    pub const PATH: [OrderStatus; 5] = [
        OrderStatus::Created,
        OrderStatus::Paid,
        OrderStatus::Packed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ];

    /// The only status permitted to follow this one, if any.
    pub fn legal_successor(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Created => Some(OrderStatus::Paid),
            OrderStatus::Paid => Some(OrderStatus::Packed),
            OrderStatus::Packed => Some(OrderStatus::Shipped),
            OrderStatus::Shipped => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    /// Whether no further status change is possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderStatus::Created => "Created",
            OrderStatus::Paid => "Paid",
            OrderStatus::Packed => "Packed",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        };

        f.write_str(name)
    }
}
