//! Orchestration for payroll generation, severance settlement and
//! configuration administration.
//!
//! [`PayrollEngine`] ties the pure calculations to the storage
//! collaborators: it loads configuration, iterates the employee roster,
//! and persists each run or settlement as one atomic transaction.

mod generator;
mod severance;

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::config::{BenefitConfiguration, PayrollConfiguration};
use crate::error::EngineResult;
use crate::store::{EmployeeDirectory, MemoryStore};

pub use generator::NewPayrollRun;
pub use severance::{NewSeverance, SeveranceUpdate};

/// The engine facade over storage, directory and calculations.
pub struct PayrollEngine {
    store: Arc<MemoryStore>,
    directory: Arc<dyn EmployeeDirectory>,
}

impl PayrollEngine {
    /// Creates an engine over the given store and employee directory.
    pub fn new(store: Arc<MemoryStore>, directory: Arc<dyn EmployeeDirectory>) -> Self {
        PayrollEngine { store, directory }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    // Configuration administration ------------------------------------------

    /// Makes `config` the single active payroll configuration.
    pub fn set_active_configuration(
        &self,
        config: PayrollConfiguration,
    ) -> EngineResult<PayrollConfiguration> {
        let config = self.store.set_active_payroll_configuration(config)?;
        info!(configuration = %config.id, "payroll configuration activated");
        Ok(config)
    }

    /// Returns the active payroll configuration, if any.
    pub fn active_configuration(&self) -> Option<PayrollConfiguration> {
        self.store.active_payroll_configuration()
    }

    /// Deletes a payroll configuration; the active one is protected.
    pub fn delete_configuration(&self, id: Uuid) -> EngineResult<()> {
        self.store.delete_payroll_configuration(id)?;
        info!(configuration = %id, "payroll configuration deleted");
        Ok(())
    }

    /// Creates a benefit configuration.
    pub fn create_benefit_configuration(
        &self,
        config: BenefitConfiguration,
    ) -> EngineResult<BenefitConfiguration> {
        let config = self.store.insert_benefit_configuration(config)?;
        info!(benefit = %config.id, name = %config.name, "benefit configuration created");
        Ok(config)
    }

    /// Updates a benefit configuration.
    pub fn update_benefit_configuration(
        &self,
        config: BenefitConfiguration,
    ) -> EngineResult<BenefitConfiguration> {
        self.store.update_benefit_configuration(config)
    }

    /// Deletes a benefit configuration.
    pub fn delete_benefit_configuration(&self, id: Uuid) -> EngineResult<()> {
        self.store.delete_benefit_configuration(id)
    }

    /// Returns every benefit configuration.
    pub fn benefit_configurations(&self) -> Vec<BenefitConfiguration> {
        self.store.benefit_configurations()
    }
}
