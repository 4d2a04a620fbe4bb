//! Payroll run aggregate models.
//!
//! This module contains the [`PayrollRun`] aggregate root and its child
//! records: one [`EmployeePayment`] per employee plus the itemized
//! [`PayrollBonusLine`] and [`PayrollDeductionLine`] entries.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One generated batch of employee payments for a resolved pay period.
///
/// A run owns all of its child records. All children become visible
/// atomically when the generating transaction commits; a reader never
/// observes a run with some employees present and others missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// Unique identifier for the run.
    pub id: Uuid,
    /// The resolved period label (e.g. "First Biweekly June 2024").
    /// Unique across all runs; a period cannot be generated twice.
    pub period_label: String,
    /// The pay date the run was generated for.
    pub pay_date: NaiveDate,
    /// A human-readable description of the run.
    pub description: String,
    /// When the run was persisted.
    pub generated_at: DateTime<Utc>,
    /// One payment per employee included in the run.
    pub payments: Vec<EmployeePayment>,
    /// Itemized bonus lines, employee-scoped or run-scoped.
    pub bonuses: Vec<PayrollBonusLine>,
    /// Itemized deduction lines, employee-scoped or run-scoped.
    pub deductions: Vec<PayrollDeductionLine>,
}

impl PayrollRun {
    /// Creates an empty run shell for the given period.
    pub fn new(
        id: Uuid,
        period_label: impl Into<String>,
        pay_date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        PayrollRun {
            id,
            period_label: period_label.into(),
            pay_date,
            description: description.into(),
            generated_at: Utc::now(),
            payments: Vec::new(),
            bonuses: Vec::new(),
            deductions: Vec::new(),
        }
    }

    /// Returns the payment for the given employee, if present.
    pub fn payment_for(&self, employee_id: &str) -> Option<&EmployeePayment> {
        self.payments.iter().find(|p| p.employee_id == employee_id)
    }
}

/// One employee's pay within a run.
///
/// The amounts satisfy `net_amount = gross_amount - total_deductions +
/// total_bonuses` exactly; [`EmployeePayment::net_identity_holds`] checks
/// the invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeePayment {
    /// The employee this payment is for. Unique within a run.
    pub employee_id: String,
    /// The employee's base salary for the period.
    pub base_salary: Decimal,
    /// Meal voucher bonus amount.
    pub meal_voucher: Decimal,
    /// Responsibility bonus amount.
    pub responsibility_bonus: Decimal,
    /// Punctuality bonus amount.
    pub punctuality_bonus: Decimal,
    /// Year-end bonus amount (nonzero only in December runs).
    pub year_end_bonus: Decimal,
    /// Vacation bonus amount.
    pub vacation_bonus: Decimal,
    /// Severance accrual amount.
    pub severance_accrual: Decimal,
    /// Vacation days paid out in this run.
    pub vacation_days: u32,
    /// Amount paid for vacation days.
    pub vacation_amount: Decimal,
    /// Sum of all bonus amounts.
    pub total_bonuses: Decimal,
    /// Sum of all deduction amounts.
    pub total_deductions: Decimal,
    /// Gross pay before bonuses and deductions.
    pub gross_amount: Decimal,
    /// Net pay: `gross - deductions + bonuses`.
    pub net_amount: Decimal,
}

impl EmployeePayment {
    /// Checks the net pay identity.
    pub fn net_identity_holds(&self) -> bool {
        self.net_amount == self.gross_amount - self.total_deductions + self.total_bonuses
    }
}

/// An itemized bonus entry within a run.
///
/// Lines with an `employee_id` are scoped to that employee's payment;
/// lines without one apply to the run as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollBonusLine {
    /// The employee this line belongs to, or `None` for a run-scoped line.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// The name of the bonus (the benefit configuration's name).
    pub name: String,
    /// The bonus amount.
    pub amount: Decimal,
}

/// An itemized deduction entry within a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollDeductionLine {
    /// The employee this line belongs to, or `None` for a run-scoped line.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// The name of the deduction (e.g. "Social Security").
    pub name: String,
    /// The deduction amount.
    pub amount: Decimal,
}
