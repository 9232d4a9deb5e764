//! Orderflow prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    billing::{BillingError, Charges, PatientBill},
    catalog::{Catalog, CatalogError, OrderSeed},
    customers::{Customer, CustomerId},
    discounts::DiscountError,
    ledger::{Ledger, LedgerError, Transaction, TransactionKind},
    money::MoneyParseError,
    notifications::{ObserverError, Sink},
    orders::{Order, OrderError, OrderId, OrderLine, OrderStatus, StatusLogEntry},
    payroll::{
        Employee, FinanceNotifier, HrNotifier, Pay, PayKind, PayrollError, PayrollProcessor,
        Payslip, PayslipObserver,
    },
    products::{Product, ProductId},
    report::{OrderReport, ReportError},
    sales::{ProfitOrLoss, SaleTransaction, SalesError},
    session::Session,
    workflow::{CustomerNotifier, LogisticsNotifier, OrderWorkflow, StatusObserver, WorkflowError},
};
