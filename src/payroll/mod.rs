//! Payroll
//!
//! Monthly payslips for full-time and contract staff, announced to observers as each
//! slip is produced.

use std::{fmt, rc::Rc};

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    discounts::{DiscountError, percent_of},
    notifications::ObserverError,
};

mod observer;

pub use observer::{FinanceNotifier, HrNotifier, PayslipObserver};

/// Most days a contractor can bill in one month.
pub const MAX_WORKING_DAYS: u32 = 31;

/// Errors raised while validating staff or running payroll.
#[derive(Debug, Error)]
pub enum PayrollError {
    /// Monthly salary was negative.
    #[error("Salary cannot be negative")]
    NegativeSalary,

    /// Daily rate was negative.
    #[error("Daily rate cannot be negative")]
    NegativeRate,

    /// Working days were outside `0..=31`.
    #[error("Invalid working days {0}; expected 0 to {MAX_WORKING_DAYS}")]
    InvalidWorkingDays(u32),

    /// Gross pay does not fit in minor units.
    #[error("Gross pay overflowed for employee {0}")]
    Overflow(u32),

    /// Deduction could not be calculated.
    #[error(transparent)]
    Deduction(#[from] DiscountError),

    /// An observer failed after a payslip was produced.
    ///
    /// Processing stops; employees after this one get no payslip.
    #[error("Observer failed for employee {employee}: {source}")]
    Observer {
        /// Employee whose payslip was being announced
        employee: u32,
        /// The observer's error
        source: ObserverError,
    },
}

/// How an employee is paid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pay<'a> {
    /// Fixed monthly salary, 10% deducted.
    FullTime {
        /// Gross monthly salary
        monthly_salary: Money<'a, Currency>,
    },

    /// Daily rate for the days worked, 5% deducted.
    Contract {
        /// Pay per working day
        daily_rate: Money<'a, Currency>,
        /// Days worked this month
        working_days: u32,
    },
}

impl Pay<'_> {
    /// Employment type
    pub fn kind(&self) -> PayKind {
        match self {
            Pay::FullTime { .. } => PayKind::FullTime,
            Pay::Contract { .. } => PayKind::Contract,
        }
    }
}

/// Employment type shown on a payslip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayKind {
    /// Salaried staff
    FullTime,

    /// Day-rate contractors
    Contract,
}

impl PayKind {
    /// Share of gross pay withheld.
    pub fn deduction_rate(self) -> Percentage {
        match self {
            PayKind::FullTime => Percentage::from(0.10),
            PayKind::Contract => Percentage::from(0.05),
        }
    }
}

impl fmt::Display for PayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayKind::FullTime => f.write_str("FullTime"),
            PayKind::Contract => f.write_str("Contract"),
        }
    }
}

/// A member of staff.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee<'a> {
    id: u32,
    name: String,
    pay: Pay<'a>,
}

impl<'a> Employee<'a> {
    /// Create a salaried employee.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::NegativeSalary`] if the salary is below zero.
    pub fn full_time(
        id: u32,
        name: impl Into<String>,
        monthly_salary: Money<'a, Currency>,
    ) -> Result<Self, PayrollError> {
        if monthly_salary.to_minor_units() < 0 {
            return Err(PayrollError::NegativeSalary);
        }

        Ok(Self {
            id,
            name: name.into(),
            pay: Pay::FullTime { monthly_salary },
        })
    }

    /// Create a contractor.
    ///
    /// # Errors
    ///
    /// - [`PayrollError::NegativeRate`]: the daily rate is below zero.
    /// - [`PayrollError::InvalidWorkingDays`]: more than [`MAX_WORKING_DAYS`] days.
    pub fn contract(
        id: u32,
        name: impl Into<String>,
        daily_rate: Money<'a, Currency>,
        working_days: u32,
    ) -> Result<Self, PayrollError> {
        if daily_rate.to_minor_units() < 0 {
            return Err(PayrollError::NegativeRate);
        }

        if working_days > MAX_WORKING_DAYS {
            return Err(PayrollError::InvalidWorkingDays(working_days));
        }

        Ok(Self {
            id,
            name: name.into(),
            pay: Pay::Contract {
                daily_rate,
                working_days,
            },
        })
    }

    /// Employee identifier
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Employee name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How the employee is paid
    pub fn pay(&self) -> Pay<'a> {
        self.pay
    }

    /// Gross pay for the month.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::Overflow`] if rate times days does not fit in minor units.
    pub fn gross(&self) -> Result<Money<'a, Currency>, PayrollError> {
        match self.pay {
            Pay::FullTime { monthly_salary } => Ok(monthly_salary),
            Pay::Contract {
                daily_rate,
                working_days,
            } => {
                let minor = daily_rate
                    .to_minor_units()
                    .checked_mul(i64::from(working_days))
                    .ok_or(PayrollError::Overflow(self.id))?;

                Ok(Money::from_minor(minor, daily_rate.currency()))
            }
        }
    }

    /// Work out this month's payslip.
    ///
    /// # Errors
    ///
    /// Returns an error if gross pay or the deduction cannot be calculated.
    pub fn payslip(&self) -> Result<Payslip<'a>, PayrollError> {
        let kind = self.pay.kind();
        let gross = self.gross()?;
        let deductions = percent_of(&kind.deduction_rate(), &gross)?;

        let net = gross
            .to_minor_units()
            .checked_sub(deductions.to_minor_units())
            .ok_or(PayrollError::Overflow(self.id))?;

        Ok(Payslip {
            employee_id: self.id,
            name: self.name.clone(),
            kind,
            gross,
            deductions,
            net: Money::from_minor(net, gross.currency()),
        })
    }
}

/// Pay for one employee for one month.
#[derive(Debug, Clone, PartialEq)]
pub struct Payslip<'a> {
    /// Employee identifier
    pub employee_id: u32,

    /// Employee name
    pub name: String,

    /// Employment type
    pub kind: PayKind,

    /// Pay before deductions
    pub gross: Money<'a, Currency>,

    /// Amount withheld
    pub deductions: Money<'a, Currency>,

    /// Pay after deductions
    pub net: Money<'a, Currency>,
}

/// Produces payslips and notifies observers as each one is ready.
#[derive(Default)]
pub struct PayrollProcessor {
    observers: Vec<Rc<dyn PayslipObserver>>,
}

impl fmt::Debug for PayrollProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayrollProcessor")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl PayrollProcessor {
    /// Create a processor with no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. Observers are notified in registration order.
    pub fn subscribe(&mut self, observer: Rc<dyn PayslipObserver>) {
        self.observers.push(observer);
    }

    /// Register a function or closure as an observer.
    pub fn subscribe_fn<F>(&mut self, observer: F)
    where
        F: Fn(&Payslip<'_>) -> Result<(), ObserverError> + 'static,
    {
        self.subscribe(Rc::new(observer));
    }

    /// Produce a payslip per employee, in input order.
    ///
    /// Every observer sees each slip before the next employee is processed.
    ///
    /// # Errors
    ///
    /// - Validation or arithmetic errors from [`Employee::payslip`].
    /// - [`PayrollError::Observer`]: an observer failed; later observers and employees
    ///   are skipped.
    pub fn process<'a>(&self, employees: &[Employee<'a>]) -> Result<Vec<Payslip<'a>>, PayrollError> {
        let mut slips = Vec::with_capacity(employees.len());

        for employee in employees {
            let slip = employee.payslip()?;

            debug!(employee_id = employee.id, kind = %slip.kind, "payslip produced");

            for observer in &self.observers {
                observer.on_payslip(&slip).map_err(|source| {
                    warn!(employee_id = employee.id, error = %source, "payslip observer failed");

                    PayrollError::Observer {
                        employee: employee.id,
                        source,
                    }
                })?;
            }

            slips.push(slip);
        }

        Ok(slips)
    }
}
