//! Domain models for the Payroll and Severance Engine.

mod employee;
mod payroll_run;
mod severance;

pub use employee::{Employee, EmployeeType};
pub use payroll_run::{
    EmployeePayment, PayrollBonusLine, PayrollDeductionLine, PayrollRun,
};
pub use severance::{SettlementStatus, SeveranceEstimate, SeveranceSettlement};
