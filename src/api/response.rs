//! Response types for the payroll API.
//!
//! This module defines the success body of `/payroll` and the error
//! response structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::PayrollRun;
use crate::error::EngineError;
use crate::models::{PayrollSummary, Payslip};

/// Response body for a completed payroll run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollResponse {
    /// Identifier of this run.
    pub run_id: Uuid,
    /// The pay period the run covered.
    pub period_number: u32,
    /// One payslip per employee paid.
    pub payslips: Vec<Payslip>,
    /// Employees that could not be paid.
    pub failures: Vec<EmployeeFailure>,
    /// Rounded company-wide totals.
    pub summary: PayrollSummary,
}

impl PayrollResponse {
    /// Builds the response body for a run.
    pub fn from_run(run_id: Uuid, run: &PayrollRun) -> Self {
        Self {
            run_id,
            period_number: run.period.number(),
            payslips: run.results.iter().map(Payslip::from).collect(),
            failures: run.failures.iter().map(EmployeeFailure::from).collect(),
            summary: PayrollSummary::from(&run.totals),
        }
    }
}

/// An employee skipped by a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeFailure {
    /// The employee identifier.
    pub employee_id: String,
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable reason.
    pub message: String,
}

impl From<&EngineError> for EmployeeFailure {
    fn from(error: &EngineError) -> Self {
        let root = error.root();
        Self {
            employee_id: error.employee_id().unwrap_or_default().to_string(),
            code: error_code(root).to_string(),
            message: root.to_string(),
        }
    }
}

/// Returns the API error code for an engine error.
pub fn error_code(error: &EngineError) -> &'static str {
    match error {
        EngineError::ConfigNotFound { .. }
        | EngineError::ConfigParseError { .. }
        | EngineError::InvalidBandTable { .. }
        | EngineError::InvalidPolicy { .. } => "CONFIG_ERROR",
        EngineError::InvalidAmount { .. } => "INVALID_AMOUNT",
        EngineError::MissingField { .. } => "MISSING_FIELD",
        EngineError::InvalidPayPeriod { .. } => "INVALID_PAY_PERIOD",
        EngineError::Employee { source, .. } => error_code(source),
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl ApiErrorResponse {
    /// Creates a 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let root = error.root();
        let code = error_code(root);
        match root {
            EngineError::InvalidPayPeriod { period } => Self::bad_request(ApiError::with_details(
                code,
                format!("Invalid pay period: {}", period),
                "Pay period numbers run from 1 to 53",
            )),
            EngineError::InvalidAmount { .. } | EngineError::MissingField { .. } => {
                let message = root.to_string();
                Self::bad_request(match error.employee_id() {
                    Some(id) => ApiError::with_details(code, message, format!("Employee '{}'", id)),
                    None => ApiError::new(code, message),
                })
            }
            _ => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(code, "Payroll policy error", root.to_string()),
            },
        }
    }
}
