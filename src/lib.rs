//! Weekly payroll engine.
//!
//! This crate computes weekly pay for a roster of employees: straight-time
//! and overtime pay, progressive income tax (PAYE) with a flat credit, a
//! tiered surtax (USC), net pay and company-wide totals. Tax tables are
//! loaded from YAML policy files and the engine is exposed over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
