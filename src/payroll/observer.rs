//! Payslip Observers

use std::io;

use tracing::info;

use crate::{
    notifications::{ObserverError, Sink},
    payroll::Payslip,
};

/// Observer notified as each payslip is produced.
pub trait PayslipObserver {
    /// Called once per payslip.
    ///
    /// # Errors
    ///
    /// Returns an [`ObserverError`] if the observer could not handle the slip.
    fn on_payslip(&self, slip: &Payslip<'_>) -> Result<(), ObserverError>;
}

impl<F> PayslipObserver for F
where
    F: Fn(&Payslip<'_>) -> Result<(), ObserverError>,
{
    fn on_payslip(&self, slip: &Payslip<'_>) -> Result<(), ObserverError> {
        self(slip)
    }
}

/// Tells HR whose pay has been processed.
#[derive(Debug)]
pub struct HrNotifier<W> {
    sink: Sink<W>,
}

impl<W: io::Write> HrNotifier<W> {
    /// Create a notifier writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            sink: Sink::new(out),
        }
    }

    /// Notifications written so far.
    pub fn sink(&self) -> &Sink<W> {
        &self.sink
    }
}

impl<W: io::Write> PayslipObserver for HrNotifier<W> {
    fn on_payslip(&self, slip: &Payslip<'_>) -> Result<(), ObserverError> {
        info!(employee_id = slip.employee_id, kind = %slip.kind, "hr notified");

        self.sink
            .line(format_args!("[HR] Processed {} ({})", slip.name, slip.kind))
    }
}

/// Tells finance how much to pay out.
#[derive(Debug)]
pub struct FinanceNotifier<W> {
    sink: Sink<W>,
}

impl<W: io::Write> FinanceNotifier<W> {
    /// Create a notifier writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            sink: Sink::new(out),
        }
    }

    /// Notifications written so far.
    pub fn sink(&self) -> &Sink<W> {
        &self.sink
    }
}

impl<W: io::Write> PayslipObserver for FinanceNotifier<W> {
    fn on_payslip(&self, slip: &Payslip<'_>) -> Result<(), ObserverError> {
        self.sink
            .line(format_args!("[Finance] Net Salary: {}", slip.net))
    }
}
