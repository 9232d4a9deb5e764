//! Billing
//!
//! Clinic bills: consultation, lab and medicine charges, with an insurance discount.

use decimal_percentage::Percentage;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::discounts::{DiscountError, percent_of};

/// Errors raised while creating or pricing a bill.
#[derive(Debug, Error, PartialEq)]
pub enum BillingError {
    /// Bill id was empty or whitespace.
    #[error("Bill id cannot be empty")]
    MissingBillId,

    /// Consultation fee must be greater than zero.
    #[error("Consultation fee must be greater than zero")]
    InvalidConsultationFee,

    /// A charge was negative (charge name).
    #[error("{0} cannot be negative")]
    NegativeCharge(&'static str),

    /// Charges were given in different currencies.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Discount could not be calculated.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// Charges making up a bill, before validation.
#[derive(Debug, Clone, Copy)]
pub struct Charges<'a> {
    /// Consultation fee
    pub consultation: Money<'a, Currency>,

    /// Laboratory charges
    pub lab: Money<'a, Currency>,

    /// Medicine charges
    pub medicine: Money<'a, Currency>,
}

/// A patient bill.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientBill<'a> {
    bill_id: String,
    patient_name: String,
    has_insurance: bool,
    consultation_fee: Money<'a, Currency>,
    lab_charges: Money<'a, Currency>,
    medicine_charges: Money<'a, Currency>,
}

impl<'a> PatientBill<'a> {
    /// Share of the gross amount insured patients do not pay.
    pub fn insurance_discount() -> Percentage {
        Percentage::from(0.10)
    }

    /// Create a validated bill.
    ///
    /// # Errors
    ///
    /// - [`BillingError::MissingBillId`]: the id is blank.
    /// - [`BillingError::InvalidConsultationFee`]: the consultation fee is not positive.
    /// - [`BillingError::NegativeCharge`]: lab or medicine charges are negative.
    /// - [`BillingError::Money`]: charges use different currencies.
    pub fn new(
        bill_id: &str,
        patient_name: &str,
        has_insurance: bool,
        charges: Charges<'a>,
    ) -> Result<Self, BillingError> {
        let bill_id = bill_id.trim();

        if bill_id.is_empty() {
            return Err(BillingError::MissingBillId);
        }

        if charges.consultation.to_minor_units() <= 0 {
            return Err(BillingError::InvalidConsultationFee);
        }

        if charges.lab.to_minor_units() < 0 {
            return Err(BillingError::NegativeCharge("Lab charges"));
        }

        if charges.medicine.to_minor_units() < 0 {
            return Err(BillingError::NegativeCharge("Medicine charges"));
        }

        let bill = Self {
            bill_id: bill_id.to_string(),
            patient_name: patient_name.trim().to_string(),
            has_insurance,
            consultation_fee: charges.consultation,
            lab_charges: charges.lab,
            medicine_charges: charges.medicine,
        };

        bill.gross()?;

        Ok(bill)
    }

    /// Total charges before discount.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::Money`] if the charges use different currencies.
    pub fn gross(&self) -> Result<Money<'a, Currency>, BillingError> {
        Ok(self
            .consultation_fee
            .add(self.lab_charges)?
            .add(self.medicine_charges)?)
    }

    /// Insurance discount: a tenth of the gross amount when insured, otherwise zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the gross amount cannot be computed.
    pub fn discount(&self) -> Result<Money<'a, Currency>, BillingError> {
        let gross = self.gross()?;

        if self.has_insurance {
            Ok(percent_of(&Self::insurance_discount(), &gross)?)
        } else {
            Ok(Money::from_minor(0, gross.currency()))
        }
    }

    /// Amount the patient pays.
    ///
    /// # Errors
    ///
    /// Returns an error if the gross amount or discount cannot be computed.
    pub fn final_payable(&self) -> Result<Money<'a, Currency>, BillingError> {
        Ok(self.gross()?.sub(self.discount()?)?)
    }

    /// Bill identifier
    pub fn bill_id(&self) -> &str {
        &self.bill_id
    }

    /// Patient name
    pub fn patient_name(&self) -> &str {
        &self.patient_name
    }

    /// Whether the patient is insured
    pub fn has_insurance(&self) -> bool {
        self.has_insurance
    }

    /// The charges the bill was created with.
    pub fn charges(&self) -> Charges<'a> {
        Charges {
            consultation: self.consultation_fee,
            lab: self.lab_charges,
            medicine: self.medicine_charges,
        }
    }
}
