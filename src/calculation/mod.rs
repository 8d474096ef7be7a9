//! Calculation logic for the payroll engine.
//!
//! This module contains the pure calculation functions: progressive band
//! slicing shared by both tax tables, income tax with its flat credit,
//! the surtax, and overtime. Each calculator returns its figures together
//! with an [`AuditStep`](crate::models::AuditStep) describing the working.

mod bands;
mod income_tax;
mod overtime;
mod surtax;

pub use bands::{BandSlice, banded_liability, slice_income};
pub use income_tax::{IncomeTaxResult, calculate_income_tax};
pub use overtime::{OvertimeResult, calculate_overtime};
pub use surtax::{SurtaxResult, calculate_surtax};
