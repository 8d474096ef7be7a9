//! HTTP request handlers for the payroll API.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::EmployeeFields;

use super::request::PayrollRequest;
use super::response::{ApiError, ApiErrorResponse, PayrollResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll", post(payroll_handler))
        .with_state(state)
}

/// Handler for POST /payroll.
///
/// Runs payroll for every employee in the request. Employees that fail
/// validation are listed under `failures`; the rest are still paid and the
/// response is 200.
async fn payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        policy = %state.metadata().code,
        "Processing payroll request"
    );

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return ApiErrorResponse::bad_request(error).into_response();
        }
    };

    let period = match request.pay_period() {
        Ok(period) => period,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Invalid pay period"
            );
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let entries: Vec<(String, EmployeeFields)> = request
        .employees
        .iter()
        .map(|employee| (employee.id.clone(), EmployeeFields::from(employee)))
        .collect();

    let start_time = Instant::now();
    let run = state.engine().run_fields(
        entries.iter().map(|(id, fields)| (id.as_str(), fields)),
        period,
    );
    let run_id = Uuid::new_v4();
    let response = PayrollResponse::from_run(run_id, &run);

    info!(
        correlation_id = %correlation_id,
        run_id = %run_id,
        period = period.number(),
        employees = entries.len(),
        failed = run.failures.len(),
        gross = %response.summary.gross,
        duration_us = start_time.elapsed().as_micros() as u64,
        "Payroll request completed"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response),
    )
        .into_response()
}
