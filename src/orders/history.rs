//! Status History

use jiff::Timestamp;

use crate::orders::OrderStatus;

/// One committed status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLogEntry {
    /// Status before the change
    pub previous: OrderStatus,

    /// Status after the change
    pub next: OrderStatus,

    /// When the change was committed
    pub changed_at: Timestamp,
}

impl StatusLogEntry {
    /// Create a log entry stamped with the current time.
    pub fn now(previous: OrderStatus, next: OrderStatus) -> Self {
        Self {
            previous,
            next,
            changed_at: Timestamp::now(),
        }
    }
}
