//! Payroll run generation.
//!
//! One generation call resolves the pay period, guards against a duplicate
//! run, evaluates every employee in the roster, and persists the run with
//! all of its children inside a single transaction. A failure anywhere
//! rolls the whole run back; no partial run is ever observable.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::calculation::{evaluate, resolve_period};
use crate::config::BenefitConfiguration;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    EmployeePayment, EmployeeType, PayrollBonusLine, PayrollDeductionLine, PayrollRun,
};

use super::PayrollEngine;

/// Pre-computed payloads for a manual payroll run.
///
/// Unlike generation, the caller supplies the payments and lines directly;
/// the engine only validates employee classifications and enforces the
/// transactional and uniqueness contracts.
#[derive(Debug, Clone)]
pub struct NewPayrollRun {
    /// The period label for the run. Unique across all runs.
    pub period_label: String,
    /// The pay date for the run.
    pub pay_date: NaiveDate,
    /// A human-readable description of the run.
    pub description: String,
    /// One payment per employee.
    pub payments: Vec<EmployeePayment>,
    /// Itemized bonus lines.
    pub bonuses: Vec<PayrollBonusLine>,
    /// Itemized deduction lines.
    pub deductions: Vec<PayrollDeductionLine>,
}

impl PayrollEngine {
    /// Generates the payroll run for a pay date.
    ///
    /// Employees default to every payroll classification. The run is
    /// persisted with one payment per employee plus one line per non-zero
    /// bonus and deduction, all in one transaction.
    ///
    /// # Errors
    ///
    /// - `NotFound` when no payroll configuration is active
    /// - `Validation` when the pay date is not a configured pay day
    /// - `Conflict` when the resolved period already has a run; re-invoking
    ///   for the same period is rejected rather than being a no-op
    pub fn generate_payroll(
        &self,
        pay_date: NaiveDate,
        employee_types: Option<Vec<EmployeeType>>,
    ) -> EngineResult<PayrollRun> {
        let config = self
            .store
            .active_payroll_configuration()
            .ok_or_else(|| EngineError::not_found("no active payroll configuration"))?;

        let period = resolve_period(pay_date, &config)?;

        if self.store.find_run_by_period(&period.label).is_some() {
            return Err(EngineError::conflict(format!(
                "payroll for period '{}' already exists",
                period.label
            )));
        }

        let types = employee_types.unwrap_or_else(|| EmployeeType::PAYROLL_TYPES.to_vec());
        let employees = self.directory.list_by_types(&types);

        let mut rules: HashMap<EmployeeType, Vec<BenefitConfiguration>> = HashMap::new();
        for employee_type in &types {
            rules
                .entry(*employee_type)
                .or_insert_with(|| self.store.active_benefit_configurations(*employee_type));
        }

        let run_id = Uuid::new_v4();
        let empty_rules = Vec::new();
        let run = self.store.transaction(|tx| {
            tx.insert_run(PayrollRun::new(
                run_id,
                period.label.clone(),
                pay_date,
                format!("Generated payroll for {}", period.label),
            ))?;

            for employee in &employees {
                let benefits = rules.get(&employee.employee_type).unwrap_or(&empty_rules);
                let evaluation = evaluate(employee, &config, benefits, pay_date);

                tx.insert_payment(run_id, evaluation.to_payment(employee.id.clone()))?;

                for bonus in &evaluation.bonuses {
                    if bonus.amount != Decimal::ZERO {
                        tx.insert_bonus_line(
                            run_id,
                            PayrollBonusLine {
                                employee_id: Some(employee.id.clone()),
                                name: bonus.name.clone(),
                                amount: bonus.amount,
                            },
                        )?;
                    }
                }
                for deduction in &evaluation.deductions {
                    if deduction.amount != Decimal::ZERO {
                        tx.insert_deduction_line(
                            run_id,
                            PayrollDeductionLine {
                                employee_id: Some(employee.id.clone()),
                                name: deduction.name.clone(),
                                amount: deduction.amount,
                            },
                        )?;
                    }
                }
            }

            tx.run(run_id)
                .ok_or_else(|| EngineError::not_found(format!("payroll run '{}'", run_id)))
        })?;

        info!(
            period = %run.period_label,
            employees = run.payments.len(),
            "payroll run generated"
        );
        Ok(run)
    }

    /// Persists a manual payroll run from pre-computed payloads.
    ///
    /// Shares generation's contracts: the whole run commits or nothing
    /// does, and an employee can appear at most once.
    ///
    /// # Errors
    ///
    /// - `NotFound` when a referenced employee does not exist
    /// - `Validation`, naming the first offending id, when a referenced
    ///   employee is not a payroll classification
    /// - `Conflict` on a duplicate period label or duplicate employee
    pub fn create_payroll_run(&self, new_run: NewPayrollRun) -> EngineResult<PayrollRun> {
        for payment in &new_run.payments {
            let employee = self.directory.get_by_id(&payment.employee_id).ok_or_else(|| {
                EngineError::not_found(format!("employee '{}'", payment.employee_id))
            })?;
            if !employee.employee_type.is_payroll_type() {
                return Err(EngineError::validation(format!(
                    "employee '{}' is not a payroll classification",
                    payment.employee_id
                )));
            }
        }

        let run_id = Uuid::new_v4();
        let run = self.store.transaction(|tx| {
            tx.insert_run(PayrollRun::new(
                run_id,
                new_run.period_label.clone(),
                new_run.pay_date,
                new_run.description.clone(),
            ))?;
            for payment in &new_run.payments {
                tx.insert_payment(run_id, payment.clone())?;
            }
            for line in &new_run.bonuses {
                tx.insert_bonus_line(run_id, line.clone())?;
            }
            for line in &new_run.deductions {
                tx.insert_deduction_line(run_id, line.clone())?;
            }
            tx.run(run_id)
                .ok_or_else(|| EngineError::not_found(format!("payroll run '{}'", run_id)))
        })?;

        info!(
            period = %run.period_label,
            employees = run.payments.len(),
            "manual payroll run created"
        );
        Ok(run)
    }
}
