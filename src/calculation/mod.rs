//! Calculation logic for the Payroll and Severance Engine.
//!
//! This module contains the pure computation functions: base salary lookup,
//! biweekly period resolution, per-employee benefit and deduction
//! evaluation, and severance settlement arithmetic. Nothing in here touches
//! storage; orchestration and persistence live in [`crate::engine`].

mod base_salary;
mod benefit_evaluation;
mod pay_period;
mod severance;

pub use base_salary::base_salary_for;
pub use benefit_evaluation::{
    BenefitEvaluation, BonusLine, DeductionLine, INCOME_TAX_LINE, SOCIAL_SECURITY_LINE, evaluate,
};
pub use pay_period::{BiweeklyHalf, ResolvedPeriod, last_day_of_month, resolve_period};
pub use severance::{estimate_settlement, fractional_years};
