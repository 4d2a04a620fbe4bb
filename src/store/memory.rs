//! In-process transactional store.
//!
//! [`MemoryStore`] holds the engine's persisted aggregates behind a mutex
//! and provides snapshot-based transactions: a closure runs against the live
//! data, and when it errors the pre-transaction snapshot is restored, so a
//! failed operation leaves nothing behind. Uniqueness constraints (period
//! label, employee-per-run) are enforced at insert time inside the
//! transaction rather than only by caller pre-checks.

use std::sync::{Mutex, PoisonError};

use uuid::Uuid;

use crate::config::{BenefitConfiguration, PayrollConfiguration};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    EmployeePayment, EmployeeType, PayrollBonusLine, PayrollDeductionLine, PayrollRun,
    SeveranceSettlement,
};

#[derive(Debug, Clone, Default)]
struct StoreData {
    payroll_configurations: Vec<PayrollConfiguration>,
    benefit_configurations: Vec<BenefitConfiguration>,
    runs: Vec<PayrollRun>,
    settlements: Vec<SeveranceSettlement>,
}

/// The engine's transactional storage collaborator, realized in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<StoreData>,
}

/// A handle to the store's data inside a transaction.
///
/// Writes made through the handle become visible atomically when the
/// transaction closure returns `Ok`; any `Err` rolls everything back.
pub struct StoreTx<'a> {
    data: &'a mut StoreData,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Runs `f` as one transaction.
    ///
    /// The closure receives a [`StoreTx`] handle; if it returns an error the
    /// store is restored to its pre-transaction state before the error is
    /// surfaced. Transactions are serialized by the store's lock, so a
    /// constraint checked inside a transaction cannot race another writer.
    pub fn transaction<T>(
        &self,
        f: impl FnOnce(&mut StoreTx<'_>) -> EngineResult<T>,
    ) -> EngineResult<T> {
        let mut guard = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        let snapshot = guard.clone();
        let result = f(&mut StoreTx { data: &mut *guard });
        if result.is_err() {
            *guard = snapshot;
        }
        result
    }

    fn read<T>(&self, f: impl FnOnce(&StoreData) -> T) -> T {
        let guard = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    // Payroll configuration -------------------------------------------------

    /// Returns the active payroll configuration, if any.
    pub fn active_payroll_configuration(&self) -> Option<PayrollConfiguration> {
        self.read(|data| {
            data.payroll_configurations
                .iter()
                .find(|c| c.active)
                .cloned()
        })
    }

    /// Returns every payroll configuration.
    pub fn payroll_configurations(&self) -> Vec<PayrollConfiguration> {
        self.read(|data| data.payroll_configurations.clone())
    }

    /// Makes `config` the single active payroll configuration.
    ///
    /// Every other configuration is deactivated and this one activated in
    /// the same transaction, so no state with zero or multiple active
    /// configurations is ever observable. A configuration with the same id
    /// is updated in place; otherwise the configuration is inserted.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error when the configuration's numeric fields
    /// are out of range.
    pub fn set_active_payroll_configuration(
        &self,
        config: PayrollConfiguration,
    ) -> EngineResult<PayrollConfiguration> {
        config.validate()?;
        self.transaction(|tx| {
            for existing in tx.data.payroll_configurations.iter_mut() {
                existing.active = false;
            }
            let mut config = config.clone();
            config.active = true;
            match tx
                .data
                .payroll_configurations
                .iter_mut()
                .find(|c| c.id == config.id)
            {
                Some(existing) => *existing = config.clone(),
                None => tx.data.payroll_configurations.push(config.clone()),
            }
            Ok(config)
        })
    }

    /// Deletes a payroll configuration.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id and `Conflict` when the
    /// configuration is the active one.
    pub fn delete_payroll_configuration(&self, id: Uuid) -> EngineResult<()> {
        self.transaction(|tx| {
            let config = tx
                .data
                .payroll_configurations
                .iter()
                .find(|c| c.id == id)
                .ok_or_else(|| {
                    EngineError::not_found(format!("payroll configuration '{}'", id))
                })?;
            if config.active {
                return Err(EngineError::conflict(
                    "cannot delete the active payroll configuration; activate another configuration first",
                ));
            }
            tx.data.payroll_configurations.retain(|c| c.id != id);
            Ok(())
        })
    }

    // Benefit configuration -------------------------------------------------

    /// Returns every benefit configuration.
    pub fn benefit_configurations(&self) -> Vec<BenefitConfiguration> {
        self.read(|data| data.benefit_configurations.clone())
    }

    /// Returns the active benefit configurations applicable to the given
    /// classification, in stable insertion order.
    pub fn active_benefit_configurations(
        &self,
        employee_type: EmployeeType,
    ) -> Vec<BenefitConfiguration> {
        self.read(|data| {
            data.benefit_configurations
                .iter()
                .filter(|b| b.active && b.applies_to.matches(employee_type))
                .cloned()
                .collect()
        })
    }

    /// Inserts a benefit configuration.
    pub fn insert_benefit_configuration(
        &self,
        config: BenefitConfiguration,
    ) -> EngineResult<BenefitConfiguration> {
        config.validate()?;
        self.transaction(|tx| {
            if tx
                .data
                .benefit_configurations
                .iter()
                .any(|b| b.id == config.id)
            {
                return Err(EngineError::conflict(format!(
                    "benefit configuration '{}' already exists",
                    config.id
                )));
            }
            tx.data.benefit_configurations.push(config.clone());
            Ok(config.clone())
        })
    }

    /// Replaces the benefit configuration with the same id.
    pub fn update_benefit_configuration(
        &self,
        config: BenefitConfiguration,
    ) -> EngineResult<BenefitConfiguration> {
        config.validate()?;
        self.transaction(|tx| {
            let existing = tx
                .data
                .benefit_configurations
                .iter_mut()
                .find(|b| b.id == config.id)
                .ok_or_else(|| {
                    EngineError::not_found(format!("benefit configuration '{}'", config.id))
                })?;
            *existing = config.clone();
            Ok(config.clone())
        })
    }

    /// Deletes a benefit configuration. Benefit rules are independently
    /// deactivatable, so deletion has no active-flag guard.
    pub fn delete_benefit_configuration(&self, id: Uuid) -> EngineResult<()> {
        self.transaction(|tx| {
            let before = tx.data.benefit_configurations.len();
            tx.data.benefit_configurations.retain(|b| b.id != id);
            if tx.data.benefit_configurations.len() == before {
                return Err(EngineError::not_found(format!(
                    "benefit configuration '{}'",
                    id
                )));
            }
            Ok(())
        })
    }

    // Payroll runs ----------------------------------------------------------

    /// Returns every payroll run.
    pub fn runs(&self) -> Vec<PayrollRun> {
        self.read(|data| data.runs.clone())
    }

    /// Looks up a run by id, children included.
    pub fn run(&self, id: Uuid) -> Option<PayrollRun> {
        self.read(|data| data.runs.iter().find(|r| r.id == id).cloned())
    }

    /// Looks up a run by its period label.
    pub fn find_run_by_period(&self, period_label: &str) -> Option<PayrollRun> {
        self.read(|data| {
            data.runs
                .iter()
                .find(|r| r.period_label == period_label)
                .cloned()
        })
    }

    // Severance settlements --------------------------------------------------

    /// Returns every severance settlement.
    pub fn settlements(&self) -> Vec<SeveranceSettlement> {
        self.read(|data| data.settlements.clone())
    }

    /// Looks up a settlement by id.
    pub fn settlement(&self, id: Uuid) -> Option<SeveranceSettlement> {
        self.read(|data| data.settlements.iter().find(|s| s.id == id).cloned())
    }
}

impl StoreTx<'_> {
    /// Inserts an empty run shell.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` when a run with the same period label already
    /// exists; the label is the storage-level uniqueness key for runs.
    pub fn insert_run(&mut self, run: PayrollRun) -> EngineResult<()> {
        if self
            .data
            .runs
            .iter()
            .any(|r| r.period_label == run.period_label)
        {
            return Err(EngineError::conflict(format!(
                "payroll for period '{}' already exists",
                run.period_label
            )));
        }
        self.data.runs.push(run);
        Ok(())
    }

    /// Appends a payment to a run.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown run and `Conflict` when the run
    /// already has a payment for the same employee.
    pub fn insert_payment(&mut self, run_id: Uuid, payment: EmployeePayment) -> EngineResult<()> {
        let run = self.run_mut(run_id)?;
        if run
            .payments
            .iter()
            .any(|p| p.employee_id == payment.employee_id)
        {
            return Err(EngineError::conflict(format!(
                "employee '{}' already has a payment in period '{}'",
                payment.employee_id, run.period_label
            )));
        }
        run.payments.push(payment);
        Ok(())
    }

    /// Appends a bonus line to a run.
    pub fn insert_bonus_line(&mut self, run_id: Uuid, line: PayrollBonusLine) -> EngineResult<()> {
        self.run_mut(run_id)?.bonuses.push(line);
        Ok(())
    }

    /// Appends a deduction line to a run.
    pub fn insert_deduction_line(
        &mut self,
        run_id: Uuid,
        line: PayrollDeductionLine,
    ) -> EngineResult<()> {
        self.run_mut(run_id)?.deductions.push(line);
        Ok(())
    }

    /// Returns a run with everything written so far in this transaction.
    pub fn run(&self, run_id: Uuid) -> Option<PayrollRun> {
        self.data.runs.iter().find(|r| r.id == run_id).cloned()
    }

    fn run_mut(&mut self, run_id: Uuid) -> EngineResult<&mut PayrollRun> {
        self.data
            .runs
            .iter_mut()
            .find(|r| r.id == run_id)
            .ok_or_else(|| EngineError::not_found(format!("payroll run '{}'", run_id)))
    }

    /// Inserts a severance settlement.
    pub fn insert_settlement(&mut self, settlement: SeveranceSettlement) -> EngineResult<()> {
        if self.data.settlements.iter().any(|s| s.id == settlement.id) {
            return Err(EngineError::conflict(format!(
                "severance settlement '{}' already exists",
                settlement.id
            )));
        }
        self.data.settlements.push(settlement);
        Ok(())
    }

    /// Returns a mutable handle to a settlement.
    pub fn settlement_mut(&mut self, id: Uuid) -> EngineResult<&mut SeveranceSettlement> {
        self.data
            .settlements
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| EngineError::not_found(format!("severance settlement '{}'", id)))
    }

    /// Removes a settlement.
    pub fn remove_settlement(&mut self, id: Uuid) -> EngineResult<SeveranceSettlement> {
        let index = self
            .data
            .settlements
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| EngineError::not_found(format!("severance settlement '{}'", id)))?;
        Ok(self.data.settlements.remove(index))
    }
}
