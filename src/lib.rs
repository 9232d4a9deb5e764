//! Orderflow
//!
//! Orderflow moves customer orders through a fixed fulfilment lifecycle, notifying
//! observers after every committed status change, and ships the small back-office
//! calculators that sit next to it: clinic billing, sales profit and loss, a petty-cash
//! ledger and payroll.

pub mod billing;
pub mod catalog;
pub mod customers;
pub mod discounts;
pub mod ledger;
pub mod money;
pub mod notifications;
pub mod orders;
pub mod payroll;
pub mod prelude;
pub mod products;
pub mod report;
pub mod sales;
pub mod session;
pub mod workflow;
