//! HTTP API module for the payroll engine.
//!
//! This module exposes a payroll run as a REST endpoint.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{EmployeeRequest, PayrollRequest};
pub use response::{ApiError, ApiErrorResponse, EmployeeFailure, PayrollResponse, error_code};
pub use state::AppState;
