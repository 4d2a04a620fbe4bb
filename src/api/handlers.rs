//! HTTP request handlers for the Payroll and Severance Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{BenefitConfiguration, PayrollConfiguration};
use crate::models::{PayrollRun, SeveranceEstimate, SeveranceSettlement};

use super::request::{
    BenefitConfigurationRequest, CreatePayrollRunRequest, CreateSeveranceRequest,
    EstimateSeveranceRequest, GeneratePayrollRequest, MarkPaidRequest,
    PayrollConfigurationRequest, UpdateSeveranceRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/generate", post(generate_payroll))
        .route("/payroll/runs", post(create_payroll_run).get(list_payroll_runs))
        .route("/payroll/runs/:id", get(get_payroll_run))
        .route("/severances/estimate", post(estimate_severance))
        .route("/severances", post(create_severance).get(list_severances))
        .route("/severances/:id", put(update_severance).delete(delete_severance))
        .route("/severances/:id/pay", put(mark_severance_paid))
        .route(
            "/config/payroll",
            put(set_payroll_configuration).get(get_active_configuration),
        )
        .route("/config/payroll/:id", delete(delete_payroll_configuration))
        .route(
            "/config/benefits",
            post(create_benefit_configuration).get(list_benefit_configurations),
        )
        .route(
            "/config/benefits/:id",
            put(update_benefit_configuration).delete(delete_benefit_configuration),
        )
        .with_state(state)
}

/// Handler for `POST /payroll/generate`.
async fn generate_payroll(
    State(state): State<AppState>,
    Json(request): Json<GeneratePayrollRequest>,
) -> Result<(StatusCode, Json<PayrollRun>), ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        pay_date = %request.pay_date,
        "Processing payroll generation request"
    );

    match state
        .engine()
        .generate_payroll(request.pay_date, request.employee_types)
    {
        Ok(run) => {
            info!(
                correlation_id = %correlation_id,
                period = %run.period_label,
                employees = run.payments.len(),
                "Payroll generation completed"
            );
            Ok((StatusCode::CREATED, Json(run)))
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Payroll generation failed");
            Err(err.into())
        }
    }
}

/// Handler for `POST /payroll/runs`.
async fn create_payroll_run(
    State(state): State<AppState>,
    Json(request): Json<CreatePayrollRunRequest>,
) -> Result<(StatusCode, Json<PayrollRun>), ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        period = %request.period_label,
        "Processing manual payroll run request"
    );

    match state.engine().create_payroll_run(request.into()) {
        Ok(run) => Ok((StatusCode::CREATED, Json(run))),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Manual payroll run failed");
            Err(err.into())
        }
    }
}

/// Handler for `GET /payroll/runs`.
async fn list_payroll_runs(State(state): State<AppState>) -> Json<Vec<PayrollRun>> {
    Json(state.engine().store().runs())
}

/// Handler for `GET /payroll/runs/:id`.
async fn get_payroll_run(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PayrollRun>, ApiErrorResponse> {
    state.engine().store().run(id).map(Json).ok_or_else(|| ApiErrorResponse {
        status: StatusCode::NOT_FOUND,
        error: ApiError::new("NOT_FOUND", format!("payroll run '{}'", id)),
    })
}

/// Handler for `POST /severances/estimate`.
async fn estimate_severance(
    State(state): State<AppState>,
    Json(request): Json<EstimateSeveranceRequest>,
) -> Result<Json<SeveranceEstimate>, ApiErrorResponse> {
    let estimate = state.engine().estimate_severance(
        &request.employee_id,
        request.start_date,
        request.end_date,
        &request.reason,
    )?;
    Ok(Json(estimate))
}

/// Handler for `POST /severances`.
async fn create_severance(
    State(state): State<AppState>,
    Json(request): Json<CreateSeveranceRequest>,
) -> Result<(StatusCode, Json<SeveranceSettlement>), ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee = %request.employee_id,
        "Processing severance creation request"
    );

    match state.engine().create_severance(request.into()) {
        Ok(settlement) => Ok((StatusCode::CREATED, Json(settlement))),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Severance creation failed");
            Err(err.into())
        }
    }
}

/// Handler for `GET /severances`.
async fn list_severances(State(state): State<AppState>) -> Json<Vec<SeveranceSettlement>> {
    Json(state.engine().severances())
}

/// Handler for `PUT /severances/:id`.
async fn update_severance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateSeveranceRequest>,
) -> Result<Json<SeveranceSettlement>, ApiErrorResponse> {
    let settlement = state.engine().update_severance(id, request.into())?;
    Ok(Json(settlement))
}

/// Handler for `PUT /severances/:id/pay`.
async fn mark_severance_paid(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    request: Option<Json<MarkPaidRequest>>,
) -> Result<Json<SeveranceSettlement>, ApiErrorResponse> {
    let paid_date = request.and_then(|Json(r)| r.paid_date);
    let settlement = state.engine().mark_severance_paid(id, paid_date)?;
    Ok(Json(settlement))
}

/// Handler for `DELETE /severances/:id`.
async fn delete_severance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiErrorResponse> {
    state.engine().delete_severance(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for `PUT /config/payroll`.
async fn set_payroll_configuration(
    State(state): State<AppState>,
    Json(request): Json<PayrollConfigurationRequest>,
) -> Result<Json<PayrollConfiguration>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    match state
        .engine()
        .set_active_configuration(request.into_configuration())
    {
        Ok(config) => {
            info!(
                correlation_id = %correlation_id,
                configuration = %config.id,
                "Payroll configuration activated"
            );
            Ok(Json(config))
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Configuration update failed");
            Err(err.into())
        }
    }
}

/// Handler for `GET /config/payroll`.
async fn get_active_configuration(
    State(state): State<AppState>,
) -> Result<Json<PayrollConfiguration>, ApiErrorResponse> {
    state
        .engine()
        .active_configuration()
        .map(Json)
        .ok_or_else(|| ApiErrorResponse {
            status: StatusCode::NOT_FOUND,
            error: ApiError::new("NOT_FOUND", "no active payroll configuration"),
        })
}

/// Handler for `DELETE /config/payroll/:id`.
async fn delete_payroll_configuration(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiErrorResponse> {
    state.engine().delete_configuration(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for `POST /config/benefits`.
async fn create_benefit_configuration(
    State(state): State<AppState>,
    Json(request): Json<BenefitConfigurationRequest>,
) -> Result<(StatusCode, Json<BenefitConfiguration>), ApiErrorResponse> {
    let config = state
        .engine()
        .create_benefit_configuration(request.into_configuration(Uuid::new_v4()))?;
    Ok((StatusCode::CREATED, Json(config)))
}

/// Handler for `GET /config/benefits`.
async fn list_benefit_configurations(
    State(state): State<AppState>,
) -> Json<Vec<BenefitConfiguration>> {
    Json(state.engine().benefit_configurations())
}

/// Handler for `PUT /config/benefits/:id`.
async fn update_benefit_configuration(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<BenefitConfigurationRequest>,
) -> Result<Json<BenefitConfiguration>, ApiErrorResponse> {
    let config = state
        .engine()
        .update_benefit_configuration(request.into_configuration(id))?;
    Ok(Json(config))
}

/// Handler for `DELETE /config/benefits/:id`.
async fn delete_benefit_configuration(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiErrorResponse> {
    state.engine().delete_benefit_configuration(id)?;
    Ok(StatusCode::NO_CONTENT)
}
