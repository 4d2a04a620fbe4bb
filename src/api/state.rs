//! Application state for the Payroll and Severance Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::engine::PayrollEngine;

/// Shared application state.
///
/// Contains the engine facade shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The payroll engine.
    engine: Arc<PayrollEngine>,
}

impl AppState {
    /// Creates a new application state over the given engine.
    pub fn new(engine: PayrollEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Returns a reference to the engine.
    pub fn engine(&self) -> &PayrollEngine {
        &self.engine
    }
}
