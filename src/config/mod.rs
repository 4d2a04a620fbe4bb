//! Configuration types for payroll generation.
//!
//! Two kinds of configuration drive a payroll run: the single active
//! [`PayrollConfiguration`] (pay-period geometry and statutory deduction
//! rates) and any number of independently active [`BenefitConfiguration`]
//! rules (bonus definitions scoped to an employee type).

mod benefit;
mod payroll;

pub use benefit::{AppliesTo, BenefitConfiguration, BenefitType};
pub use payroll::PayrollConfiguration;
