//! HTTP API module for the Payroll and Severance Engine.
//!
//! This module provides the REST endpoints for payroll generation,
//! severance settlement and configuration administration.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BenefitConfigurationRequest, CreatePayrollRunRequest, CreateSeveranceRequest,
    EstimateSeveranceRequest, GeneratePayrollRequest, MarkPaidRequest,
    PayrollConfigurationRequest, UpdateSeveranceRequest,
};
pub use response::ApiError;
pub use state::AppState;
