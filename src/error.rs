//! Error types for the Payroll Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading a payroll policy
//! or processing employee records.

use thiserror::Error;

/// The main error type for the Payroll Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::MissingField {
///     field: "rate".to_string(),
/// };
/// assert_eq!(error.to_string(), "Missing required field: rate");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A numeric value was negative, non-numeric or otherwise out of domain.
    #[error("Invalid amount for '{field}' ({value}): {message}")]
    InvalidAmount {
        /// The field holding the value.
        field: String,
        /// The offending value as it was supplied.
        value: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A required attribute was absent from an employee record.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing attribute.
        field: String,
    },

    /// A band or tier table violated its ordering or rate invariants.
    #[error("Invalid band table '{table}': {message}")]
    InvalidBandTable {
        /// The table that failed validation (e.g. "income_tax").
        table: String,
        /// A description of the violation.
        message: String,
    },

    /// A payroll policy value other than a band table was out of domain.
    #[error("Invalid payroll policy: {message}")]
    InvalidPolicy {
        /// A description of the invalid value.
        message: String,
    },

    /// The pay period ordinal was outside the pay year.
    #[error("Invalid pay period: {period}")]
    InvalidPayPeriod {
        /// The rejected period number.
        period: u32,
    },

    /// Processing a single employee failed.
    #[error("Employee '{employee_id}': {source}")]
    Employee {
        /// The identifier of the employee whose record failed.
        employee_id: String,
        /// The underlying failure.
        #[source]
        source: Box<EngineError>,
    },
}

impl EngineError {
    /// Tags this error with the identifier of the employee being processed.
    ///
    /// Errors that are already tagged are returned unchanged.
    pub fn for_employee(self, employee_id: impl Into<String>) -> Self {
        match self {
            tagged @ EngineError::Employee { .. } => tagged,
            other => EngineError::Employee {
                employee_id: employee_id.into(),
                source: Box::new(other),
            },
        }
    }

    /// Returns the employee identifier if this is a per-employee failure.
    pub fn employee_id(&self) -> Option<&str> {
        match self {
            EngineError::Employee { employee_id, .. } => Some(employee_id),
            _ => None,
        }
    }

    /// Returns the innermost error, looking through employee tagging.
    pub fn root(&self) -> &EngineError {
        match self {
            EngineError::Employee { source, .. } => source.root(),
            other => other,
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
