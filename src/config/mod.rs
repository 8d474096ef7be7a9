//! Configuration loading and management for the Payroll Engine.
//!
//! This module provides functionality to load a payroll policy from YAML
//! files: income tax bands and credit, surtax tiers, pay periods per year
//! and the overtime multiplier.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/ie_2024").unwrap();
//! println!("Loaded policy: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    Band, BandTable, DEFAULT_OVERTIME_MULTIPLIER, DEFAULT_PAY_PERIODS_PER_YEAR, IncomeTaxPolicy,
    PayrollPolicy, PolicyMetadata, SurtaxPolicy,
};
