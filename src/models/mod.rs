//! Core data models for the Payroll Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod money;
mod pay_period;
mod pay_result;
mod payslip;
mod totals;

pub use employee::{
    EmployeeFields, EmployeeRecord, FIELD_DEPARTMENT, FIELD_HOURS_SCHEDULED, FIELD_HOURS_WORKED,
    FIELD_NAME, FIELD_RATE,
};
pub use money::{DISPLAY_DECIMAL_PLACES, Money};
pub use pay_period::{MAX_PERIOD_NUMBER, PayPeriod};
pub use pay_result::{AnnualFigures, AuditStep, PayPeriodResult, PeriodToDate};
pub use payslip::{PayrollSummary, Payslip};
pub use totals::PayrollTotals;
