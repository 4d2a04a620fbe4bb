//! Base salary lookup.
//!
//! Base salaries are a flat per-classification table rather than per-employee
//! data; the table is the single source for both payroll generation and
//! severance averages.

use rust_decimal::Decimal;

use crate::models::EmployeeType;

/// Monthly base salary per payroll classification.
///
/// Kept as an enum-keyed table so the rule set stays data-driven and
/// testable in isolation.
const BASE_SALARIES: [(EmployeeType, Decimal); 3] = [
    (EmployeeType::Teacher, Decimal::from_parts(500, 0, 0, false, 0)),
    (
        EmployeeType::Administrative,
        Decimal::from_parts(400, 0, 0, false, 0),
    ),
    (EmployeeType::Laborer, Decimal::from_parts(300, 0, 0, false, 0)),
];

/// Returns the base salary for a payroll classification.
///
/// Non-payroll classifications have no salary; callers record those
/// employees with zero amounts and skip benefit accrual.
///
/// # Examples
///
/// ```
/// use school_payroll_engine::calculation::base_salary_for;
/// use school_payroll_engine::models::EmployeeType;
/// use rust_decimal::Decimal;
///
/// assert_eq!(base_salary_for(EmployeeType::Teacher), Some(Decimal::from(500)));
/// assert_eq!(base_salary_for(EmployeeType::Other), None);
/// ```
pub fn base_salary_for(employee_type: EmployeeType) -> Option<Decimal> {
    BASE_SALARIES
        .iter()
        .find(|(t, _)| *t == employee_type)
        .map(|(_, salary)| *salary)
}
