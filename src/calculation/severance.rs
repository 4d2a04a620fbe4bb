//! Severance settlement arithmetic.
//!
//! Computes the components of a severance estimate from tenure length and
//! the per-classification average salary table. The computation is pure;
//! "today" is injected by the caller because year-end proration is based on
//! the calendar month at computation time.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, SeveranceEstimate};

use super::base_salary_for;

const DAYS_PER_YEAR: Decimal = Decimal::from_parts(36525, 0, 0, false, 2);
const DAYS_PER_MONTH: Decimal = Decimal::from_parts(30, 0, 0, false, 0);
const VACATION_DAYS_PER_YEAR: Decimal = Decimal::from_parts(15, 0, 0, false, 0);
const YEAR_END_MONTHS: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// Computes tenure as fractional years between two dates.
///
/// Uses the mean year length of 365.25 days, so four full calendar years
/// spanning one leap day come out to exactly 4.
///
/// # Errors
///
/// Returns a `Validation` error when `end` precedes `start`.
pub fn fractional_years(start: NaiveDate, end: NaiveDate) -> EngineResult<Decimal> {
    if end < start {
        return Err(EngineError::validation(format!(
            "end date {} precedes start date {}",
            end, start
        )));
    }
    let days = (end - start).num_days();
    Ok(Decimal::from(days) / DAYS_PER_YEAR)
}

/// Computes a severance estimate for a departing employee.
///
/// Components:
/// - severance pay: one month of average salary per year of service,
///   fractional years included
/// - year-end bonus: three months of salary prorated by `today`'s calendar
///   month over twelve
/// - pending vacation: fifteen accrued days per year of service (floored to
///   whole days), paid at the daily rate
/// - vacation bonus: fifteen days at the daily rate
///
/// The estimate total is the sum of those four components; negotiated
/// extras only enter the total once a settlement is persisted.
///
/// Divisions are ordered last so the worked amounts stay exact in decimal
/// arithmetic.
///
/// # Errors
///
/// Returns a `Validation` error when the employee is not a payroll
/// classification or the dates are inverted.
pub fn estimate_settlement(
    employee: &Employee,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: &str,
    today: NaiveDate,
) -> EngineResult<SeveranceEstimate> {
    let average_salary = base_salary_for(employee.employee_type).ok_or_else(|| {
        EngineError::validation(format!(
            "employee '{}' is not a payroll classification",
            employee.id
        ))
    })?;

    let years_of_service = fractional_years(start_date, end_date)?;

    let severance_pay = average_salary * years_of_service;

    let current_month = Decimal::from(today.month());
    let year_end_bonus =
        average_salary * YEAR_END_MONTHS * current_month / Decimal::from_parts(12, 0, 0, false, 0);

    let pending_vacation_days = (VACATION_DAYS_PER_YEAR * years_of_service)
        .floor()
        .to_u32()
        .unwrap_or(0);
    let pending_vacation_pay =
        average_salary * Decimal::from(pending_vacation_days) / DAYS_PER_MONTH;

    let vacation_bonus = average_salary * VACATION_DAYS_PER_YEAR / DAYS_PER_MONTH;

    let total_amount = severance_pay + year_end_bonus + pending_vacation_pay + vacation_bonus;

    Ok(SeveranceEstimate {
        employee_id: employee.id.clone(),
        start_date,
        end_date,
        reason: reason.to_string(),
        years_of_service,
        average_salary,
        severance_pay,
        year_end_bonus,
        vacation_bonus,
        pending_vacation_days,
        pending_vacation_pay,
        total_amount,
    })
}
