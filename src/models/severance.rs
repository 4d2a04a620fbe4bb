//! Severance settlement models.
//!
//! This module contains the [`SeveranceSettlement`] record persisted when a
//! departing employee's settlement is created, and the transient
//! [`SeveranceEstimate`] produced by the pure calculation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a severance settlement.
///
/// The only transition is `Pending` to `Paid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    /// Created but not yet paid out.
    Pending,
    /// Paid out; `paid_date` records when.
    Paid,
}

/// A persisted severance settlement for a departing employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeveranceSettlement {
    /// Unique identifier for the settlement.
    pub id: Uuid,
    /// The departing employee.
    pub employee_id: String,
    /// First day of employment.
    pub start_date: NaiveDate,
    /// Last day of employment.
    pub end_date: NaiveDate,
    /// The stated reason for departure.
    pub reason: String,
    /// Tenure in fractional years.
    pub years_of_service: Decimal,
    /// The average salary used for the computation.
    pub average_salary: Decimal,
    /// Severance pay component.
    pub severance_pay: Decimal,
    /// Prorated year-end bonus component.
    pub year_end_bonus: Decimal,
    /// Vacation bonus component.
    pub vacation_bonus: Decimal,
    /// Unused vacation days owed.
    pub pending_vacation_days: u32,
    /// Payment for unused vacation days.
    pub pending_vacation_pay: Decimal,
    /// Any additional negotiated benefits.
    pub other_benefits: Decimal,
    /// Sum of all components including `other_benefits`.
    pub total_amount: Decimal,
    /// Lifecycle status.
    pub status: SettlementStatus,
    /// When the settlement was paid, once `status` is `Paid`.
    pub paid_date: Option<NaiveDate>,
}

impl SeveranceSettlement {
    /// Re-derives `total_amount` from the component fields.
    ///
    /// The persisted total always includes `other_benefits`, unlike the
    /// estimate total.
    pub fn recompute_total(&mut self) {
        self.total_amount = self.severance_pay
            + self.year_end_bonus
            + self.vacation_bonus
            + self.pending_vacation_pay
            + self.other_benefits;
    }
}

/// The result of a severance estimate, before anything is persisted.
///
/// `total_amount` here excludes `other_benefits`; those are only supplied
/// when a settlement is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeveranceEstimate {
    /// The departing employee.
    pub employee_id: String,
    /// First day of employment.
    pub start_date: NaiveDate,
    /// Last day of employment.
    pub end_date: NaiveDate,
    /// The stated reason for departure.
    pub reason: String,
    /// Tenure in fractional years.
    pub years_of_service: Decimal,
    /// The average salary used for the computation.
    pub average_salary: Decimal,
    /// Severance pay component.
    pub severance_pay: Decimal,
    /// Prorated year-end bonus component.
    pub year_end_bonus: Decimal,
    /// Vacation bonus component.
    pub vacation_bonus: Decimal,
    /// Unused vacation days owed.
    pub pending_vacation_days: u32,
    /// Payment for unused vacation days.
    pub pending_vacation_pay: Decimal,
    /// Sum of the estimated components.
    pub total_amount: Decimal,
}
